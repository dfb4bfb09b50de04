//! Part-set discovery from a directory tree.
//!
//! Layout: `<sets_dir>/<set>/<color>/<category>/<part>.png`. Every directory
//! level is sorted by name, so discovery is independent of filesystem order.

use std::path::{Path, PathBuf};

use robohash_core::provider::is_plain_set_name;
use robohash_core::{Catalog, CatalogLimits, CatalogProvider, CatalogTree, RobohashError};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Builds catalogs by walking PNG part-set directories.
#[derive(Debug, Clone)]
pub struct DirectoryCatalogProvider {
    sets_dir: PathBuf,
    limits: CatalogLimits,
}

impl DirectoryCatalogProvider {
    pub fn new(sets_dir: impl Into<PathBuf>, limits: CatalogLimits) -> Self {
        Self {
            sets_dir: sets_dir.into(),
            limits,
        }
    }

    /// Root containing one directory per set.
    pub fn sets_dir(&self) -> &Path {
        &self.sets_dir
    }

    /// Directory of one set, if the name is a plain component.
    pub fn set_dir(&self, set: &str) -> Result<PathBuf, RobohashError> {
        if !is_plain_set_name(set) {
            return Err(RobohashError::UnknownSet(set.to_string()));
        }
        let dir = self.sets_dir.join(set);
        if !dir.is_dir() {
            return Err(RobohashError::UnknownSet(set.to_string()));
        }
        Ok(dir)
    }
}

/// Walks one set directory into an unvalidated catalog tree.
///
/// Only `*.png` files exactly three levels down are collected. Colors or
/// categories with no PNG files are kept with empty lists so validation can
/// report them.
pub fn scan_set_dir(set_dir: &Path) -> Result<CatalogTree, RobohashError> {
    let mut tree = CatalogTree::new();

    for entry in WalkDir::new(set_dir)
        .min_depth(1)
        .max_depth(3)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| RobohashError::Io(e.into()))?;
        let rel = match entry.path().strip_prefix(set_dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };

        let names: Option<Vec<&str>> = rel.iter().map(|c| c.to_str()).collect();
        let Some(names) = names else {
            warn!(path = %entry.path().display(), "skipping non-UTF-8 path in part set");
            continue;
        };

        let file_type = entry.file_type();
        match names.as_slice() {
            [color] if file_type.is_dir() => {
                tree.entry(color.to_string()).or_default();
            }
            [color, category] if file_type.is_dir() => {
                tree.entry(color.to_string())
                    .or_default()
                    .entry(category.to_string())
                    .or_default();
            }
            [color, category, part] if file_type.is_file() && is_png(part) => {
                tree.entry(color.to_string())
                    .or_default()
                    .entry(category.to_string())
                    .or_default()
                    .push(part.to_string());
            }
            _ => {}
        }
    }

    for categories in tree.values_mut() {
        for parts in categories.values_mut() {
            parts.sort();
        }
    }

    Ok(tree)
}

fn is_png(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

impl CatalogProvider for DirectoryCatalogProvider {
    fn catalog(&self, set: &str) -> Result<Catalog, RobohashError> {
        let dir = self.set_dir(set)?;
        let tree = scan_set_dir(&dir)?;
        debug!(set, colors = tree.len(), "scanned part set directory");
        Catalog::with_limits(tree, &self.limits).map_err(RobohashError::from)
    }

    fn set_names(&self) -> Result<Vec<String>, RobohashError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.sets_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
