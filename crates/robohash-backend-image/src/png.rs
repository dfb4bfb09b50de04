//! Deterministic PNG writer.
//!
//! Uses fixed compression and filter settings so the same composited layer
//! always encodes to byte-identical output.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

use crate::error::RenderError;
use crate::layer::RgbaLayer;

/// PNG export configuration.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Keep fixed for reproducible bytes.
    pub compression: Compression,
    /// Row filter. Keep fixed for reproducible bytes.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Smaller files, slower encode.
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }
}

/// Writes an RGBA layer to any writer.
pub fn write_rgba_to_writer<W: Write>(
    layer: &RgbaLayer,
    writer: W,
    config: &PngConfig,
) -> Result<(), RenderError> {
    if layer.width == 0 || layer.height == 0 {
        return Err(RenderError::InvalidDimensions(format!(
            "cannot encode {}x{} image",
            layer.width, layer.height
        )));
    }

    let mut encoder = Encoder::new(writer, layer.width, layer.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // The png crate adds no timestamps or other variable chunks.
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&layer.pixels)?;
    png_writer.finish()?;

    Ok(())
}

/// Encodes an RGBA layer to PNG bytes.
pub fn encode_rgba(layer: &RgbaLayer, config: &PngConfig) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::new();
    write_rgba_to_writer(layer, &mut out, config)?;
    Ok(out)
}

/// Writes an RGBA layer to a PNG file and returns the BLAKE3 hash of the
/// written bytes.
pub fn write_rgba(layer: &RgbaLayer, path: &Path, config: &PngConfig) -> Result<String, RenderError> {
    let bytes = encode_rgba(layer, config)?;
    std::fs::write(path, &bytes)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}
