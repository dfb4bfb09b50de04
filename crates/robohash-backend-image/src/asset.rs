//! Asset sources: resolve a part token to PNG bytes.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use robohash_core::decode_token;
use tracing::trace;

use crate::error::RenderError;

/// Resolves tokens of the form `color/category/part` to encoded image bytes.
///
/// Implementations are shared across asset worker threads.
pub trait AssetSource: Send + Sync {
    /// Loads the bytes for `token`.
    fn load(&self, token: &str) -> Result<Vec<u8>, RenderError>;
}

/// Reads assets from `<base>/<color>/<category>/<part>`.
#[derive(Debug, Clone)]
pub struct DirectoryAssetSource {
    base: PathBuf,
}

impl DirectoryAssetSource {
    /// Source rooted at one part-set directory, e.g. `sets/set1`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Root directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Maps a token to a file path below the base directory.
    pub fn resolve(&self, token: &str) -> Result<PathBuf, RenderError> {
        let parts = decode_token(token)?;
        let mut path = self.base.clone();
        for component in [&parts.color, &parts.category, &parts.part] {
            check_component(token, component)?;
            path.push(component);
        }
        Ok(path)
    }
}

fn check_component(token: &str, component: &str) -> Result<(), RenderError> {
    let invalid = |reason: &str| RenderError::InvalidAssetPath {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    if component.contains(['/', '\\']) {
        return Err(invalid("component contains a path separator"));
    }
    let mut components = Path::new(component).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid("component is not a plain file name")),
    }
}

impl AssetSource for DirectoryAssetSource {
    fn load(&self, token: &str) -> Result<Vec<u8>, RenderError> {
        let path = self.resolve(token)?;
        trace!(path = %path.display(), "reading asset");
        std::fs::read(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => RenderError::AssetNotFound(token.to_string()),
            _ => RenderError::Io(err),
        })
    }
}

/// In-memory assets keyed by token.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers bytes for `token`, replacing any previous entry.
    pub fn insert(&mut self, token: impl Into<String>, bytes: Vec<u8>) {
        self.assets.insert(token.into(), bytes);
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSource for MemoryAssetSource {
    fn load(&self, token: &str) -> Result<Vec<u8>, RenderError> {
        self.assets
            .get(token)
            .cloned()
            .ok_or_else(|| RenderError::AssetNotFound(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robohash_core::encode_token;

    #[test]
    fn test_resolve_decodes_components() {
        let source = DirectoryAssetSource::new("/sets/set1");
        let token = encode_token("blue", "003#01Body", "007#01body 7.png");
        let path = source.resolve(&token).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/sets/set1/blue/003#01Body/007#01body 7.png")
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let source = DirectoryAssetSource::new("/sets/set1");
        let token = encode_token("blue", "..", "passwd");
        let err = source.resolve(&token).unwrap_err();
        assert!(matches!(err, RenderError::InvalidAssetPath { .. }));
    }

    #[test]
    fn test_resolve_rejects_encoded_separator() {
        let source = DirectoryAssetSource::new("/sets/set1");
        // "a/b" percent-encodes to "a%2Fb" and decodes back to a separator.
        let token = encode_token("blue", "eyes", "a/b.png");
        let err = source.resolve(&token).unwrap_err();
        assert!(matches!(err, RenderError::InvalidAssetPath { .. }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let source = DirectoryAssetSource::new(tmp.path());
        let err = source.load("blue/eyes/missing.png").unwrap_err();
        assert!(matches!(err, RenderError::AssetNotFound(ref t) if t == "blue/eyes/missing.png"));
    }

    #[test]
    fn test_directory_load_reads_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("red").join("000#Mouth");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a b.png"), b"bytes").unwrap();

        let source = DirectoryAssetSource::new(tmp.path());
        let token = encode_token("red", "000#Mouth", "a b.png");
        assert_eq!(source.load(&token).unwrap(), b"bytes");
    }

    #[test]
    fn test_memory_source() {
        let mut source = MemoryAssetSource::new();
        source.insert("red/eyes/a.png", vec![1, 2, 3]);
        assert_eq!(source.len(), 1);
        assert_eq!(source.load("red/eyes/a.png").unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            source.load("red/eyes/b.png"),
            Err(RenderError::AssetNotFound(_))
        ));
    }
}
