//! Rendering a part selection into one image.
//!
//! Every token is fetched and decoded independently (concurrently when
//! enabled), then the layers are composited in selection order. Fetch order
//! never affects the output.

use std::thread;

use robohash_core::PartSelection;
use tracing::{debug, warn};

use crate::asset::AssetSource;
use crate::composite::composite;
use crate::error::RenderError;
use crate::layer::RgbaLayer;
use crate::png::{encode_rgba, PngConfig};
use crate::resize::{resize, Size};

/// Output of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Composited image at the size of the first layer.
    pub image: RgbaLayer,
    /// Tokens that were composited, in order.
    pub tokens: Vec<String>,
    /// Decision tag of the selection.
    pub tag: String,
}

impl RenderResult {
    /// Resamples the image to `size`.
    pub fn resized(&self, size: Size) -> Result<RgbaLayer, RenderError> {
        resize(&self.image, size)
    }

    /// Encodes the image (optionally resized) as PNG bytes.
    pub fn to_png(&self, size: Option<Size>, config: &PngConfig) -> Result<Vec<u8>, RenderError> {
        match size {
            Some(size) => encode_rgba(&self.resized(size)?, config),
            None => encode_rgba(&self.image, config),
        }
    }
}

/// Composites selections using an asset source.
pub struct Renderer {
    source: Box<dyn AssetSource>,
    parallel: bool,
}

impl Renderer {
    /// Renderer that fetches assets concurrently.
    pub fn new(source: Box<dyn AssetSource>) -> Self {
        Self {
            source,
            parallel: true,
        }
    }

    /// Enables or disables concurrent asset fetch.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Fetches, decodes and composites every part of `selection`.
    ///
    /// Any failed fetch or decode fails the whole render.
    pub fn render(&self, selection: &PartSelection) -> Result<RenderResult, RenderError> {
        let tokens = selection.tokens();
        if tokens.is_empty() {
            return Err(RenderError::EmptySelection);
        }

        debug!(
            parts = tokens.len(),
            parallel = self.parallel,
            tag = %selection.tag(),
            "rendering selection"
        );

        let layers = if self.parallel {
            self.load_parallel(&tokens)?
        } else {
            tokens
                .iter()
                .map(|token| self.load_layer(token))
                .collect::<Result<Vec<_>, _>>()?
        };

        let image = composite(layers)?;
        Ok(RenderResult {
            image,
            tokens,
            tag: selection.tag(),
        })
    }

    fn load_layer(&self, token: &str) -> Result<RgbaLayer, RenderError> {
        let bytes = self.source.load(token)?;
        RgbaLayer::decode_png(&bytes, token)
    }

    fn load_parallel(&self, tokens: &[String]) -> Result<Vec<RgbaLayer>, RenderError> {
        thread::scope(|scope| {
            let handles: Vec<_> = tokens
                .iter()
                .map(|token| (token, scope.spawn(move || self.load_layer(token))))
                .collect();

            // Join every worker before inspecting results so a panic in a
            // later worker cannot escape the scope.
            let joined: Vec<_> = handles
                .into_iter()
                .map(|(token, handle)| (token, handle.join()))
                .collect();

            let mut layers = Vec::with_capacity(joined.len());
            for (token, result) in joined {
                match result {
                    Ok(layer) => layers.push(layer?),
                    Err(_) => {
                        warn!(token = %token, "asset worker panicked");
                        return Err(RenderError::WorkerPanicked(token.clone()));
                    }
                }
            }
            Ok(layers)
        })
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::MemoryAssetSource;
    use pretty_assertions::assert_eq;
    use robohash_core::{select, Catalog, CatalogTree};
    use std::collections::BTreeMap;

    const SIDE: u32 = 16;

    /// Two colors, two categories; each part is a single colored square at a
    /// distinct position so the composite shows which parts were used.
    fn fixture() -> (Catalog, MemoryAssetSource) {
        let mut tree = CatalogTree::new();
        let mut source = MemoryAssetSource::new();
        for color in ["blue", "red"] {
            let mut categories = BTreeMap::new();
            for (c, category) in ["000#Base", "001#Top"].iter().enumerate() {
                let mut parts = Vec::new();
                for p in 0..3u32 {
                    let part = format!("{:03}.png", p);
                    let mut layer = if c == 0 {
                        RgbaLayer::filled(SIDE, SIDE, [p as u8 * 50, 0, 0, 255])
                    } else {
                        RgbaLayer::transparent(SIDE, SIDE)
                    };
                    if c == 1 {
                        layer.set(p, p, [0, 255, 0, 255]);
                    }
                    let token = robohash_core::encode_token(color, category, &part);
                    source.insert(token, encode_rgba(&layer, &PngConfig::default()).unwrap());
                    parts.push(part);
                }
                categories.insert(category.to_string(), parts);
            }
            tree.insert(color.to_string(), categories);
        }
        (Catalog::new(tree).unwrap(), source)
    }

    #[test]
    fn test_parallel_and_sequential_match() {
        let (catalog, source) = fixture();
        let selection = select(&catalog, "alice@example.com", "").unwrap();

        let parallel = Renderer::new(Box::new(source.clone()));
        let sequential = Renderer::new(Box::new(source)).with_parallel(false);

        let a = parallel.render(&selection).unwrap();
        let b = sequential.render(&selection).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.tokens, selection.tokens());
        assert_eq!(a.tag, selection.tag());
        assert_eq!((a.image.width, a.image.height), (SIDE, SIDE));
    }

    #[test]
    fn test_render_is_deterministic() {
        let (catalog, source) = fixture();
        let renderer = Renderer::new(Box::new(source));
        let selection = select(&catalog, "bob", "k").unwrap();

        let first = renderer.render(&selection).unwrap();
        let second = renderer.render(&selection).unwrap();
        let config = PngConfig::default();
        assert_eq!(
            first.to_png(None, &config).unwrap(),
            second.to_png(None, &config).unwrap()
        );
    }

    #[test]
    fn test_top_layer_is_painted_last() {
        let (catalog, source) = fixture();
        let selection = select(&catalog, "carol", "").unwrap();
        let result = Renderer::new(Box::new(source)).render(&selection).unwrap();

        let top = selection.parts[1].index as u32;
        assert_eq!(result.image.get(top, top), [0, 255, 0, 255]);
    }

    #[test]
    fn test_missing_asset_fails_render() {
        let (catalog, _) = fixture();
        let selection = select(&catalog, "dave", "").unwrap();
        let renderer = Renderer::new(Box::new(MemoryAssetSource::new()));
        assert!(matches!(
            renderer.render(&selection),
            Err(RenderError::AssetNotFound(_))
        ));
    }

    #[test]
    fn test_empty_selection_rejected() {
        let selection = PartSelection {
            color: "red".to_string(),
            color_index: 0,
            parts: Vec::new(),
        };
        let renderer = Renderer::new(Box::new(MemoryAssetSource::new()));
        assert!(matches!(
            renderer.render(&selection),
            Err(RenderError::EmptySelection)
        ));
    }

    #[test]
    fn test_to_png_with_resize() {
        let (catalog, source) = fixture();
        let selection = select(&catalog, "erin", "").unwrap();
        let result = Renderer::new(Box::new(source)).render(&selection).unwrap();

        let bytes = result.to_png(Some(Size::new(32, 32)), &PngConfig::default()).unwrap();
        let decoded = RgbaLayer::decode_png(&bytes, "out").unwrap();
        assert_eq!((decoded.width, decoded.height), (32, 32));
    }
}
