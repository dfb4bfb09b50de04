//! Catalog providers.
//!
//! A provider maps a part-set name (e.g. `set1`) to a validated [`Catalog`].
//! Filesystem discovery of PNG sets lives in the image backend; this module
//! holds the trait and the JSON-backed provider.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::{Catalog, CatalogLimits};
use crate::error::RobohashError;

/// Supplies catalogs by part-set name.
pub trait CatalogProvider: Send + Sync {
    /// Loads and validates the catalog for `set`.
    fn catalog(&self, set: &str) -> Result<Catalog, RobohashError>;

    /// Names of the sets this provider knows about, sorted.
    fn set_names(&self) -> Result<Vec<String>, RobohashError>;
}

/// Provider backed by JSON catalog documents.
///
/// Sets are either held in memory or read from `<dir>/<set>.json`.
#[derive(Debug, Clone)]
pub enum JsonCatalogProvider {
    /// Pre-validated catalogs keyed by set name.
    Memory(BTreeMap<String, Catalog>),
    /// Directory of `<set>.json` files, validated on load.
    Directory { dir: PathBuf, limits: CatalogLimits },
}

impl JsonCatalogProvider {
    /// Provider over a directory of `<set>.json` files.
    pub fn directory(dir: impl Into<PathBuf>, limits: CatalogLimits) -> Self {
        JsonCatalogProvider::Directory {
            dir: dir.into(),
            limits,
        }
    }

    /// Provider over a single JSON file, exposed under `set`.
    pub fn single_file(
        path: &Path,
        set: &str,
        limits: &CatalogLimits,
    ) -> Result<Self, RobohashError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Catalog::from_json_with_limits(&json, limits)?;
        let mut sets = BTreeMap::new();
        sets.insert(set.to_string(), catalog);
        Ok(JsonCatalogProvider::Memory(sets))
    }
}

impl CatalogProvider for JsonCatalogProvider {
    fn catalog(&self, set: &str) -> Result<Catalog, RobohashError> {
        match self {
            JsonCatalogProvider::Memory(sets) => sets
                .get(set)
                .cloned()
                .ok_or_else(|| RobohashError::UnknownSet(set.to_string())),
            JsonCatalogProvider::Directory { dir, limits } => {
                if !is_plain_set_name(set) {
                    return Err(RobohashError::UnknownSet(set.to_string()));
                }
                let path = dir.join(format!("{}.json", set));
                if !path.is_file() {
                    return Err(RobohashError::UnknownSet(set.to_string()));
                }
                debug!(path = %path.display(), "loading JSON catalog");
                let json = std::fs::read_to_string(&path)?;
                Catalog::from_json_with_limits(&json, limits)
            }
        }
    }

    fn set_names(&self) -> Result<Vec<String>, RobohashError> {
        match self {
            JsonCatalogProvider::Memory(sets) => Ok(sets.keys().cloned().collect()),
            JsonCatalogProvider::Directory { dir, .. } => {
                let mut names = Vec::new();
                for entry in std::fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|e| e.to_str()) == Some("json") {
                        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                            names.push(stem.to_string());
                        }
                    }
                }
                names.sort();
                Ok(names)
            }
        }
    }
}

/// Set names are single path components: no separators, no `..`.
pub fn is_plain_set_name(set: &str) -> bool {
    !set.is_empty()
        && set != "."
        && set != ".."
        && !set.contains(['/', '\\'])
}
