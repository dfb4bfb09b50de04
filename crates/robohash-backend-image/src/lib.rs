//! RoboHash Image Backend
//!
//! Turns a [`PartSelection`](robohash_core::PartSelection) into a picture:
//! part-set discovery from PNG directories, asset loading, source-over
//! compositing and deterministic PNG output.
//!
//! # Example
//!
//! ```no_run
//! use robohash_backend_image::{
//!     DirectoryAssetSource, DirectoryCatalogProvider, PngConfig, Renderer, Size,
//! };
//! use robohash_core::{select, CatalogLimits, CatalogProvider};
//!
//! let provider = DirectoryCatalogProvider::new("sets", CatalogLimits::strict());
//! let catalog = provider.catalog("set1").unwrap();
//! let selection = select(&catalog, "alice@example.com", "").unwrap();
//!
//! let source = DirectoryAssetSource::new(provider.set_dir("set1").unwrap());
//! let result = Renderer::new(Box::new(source)).render(&selection).unwrap();
//! let png = result
//!     .to_png(Some(Size::new(200, 200)), &PngConfig::default())
//!     .unwrap();
//! std::fs::write("alice.png", png).unwrap();
//! ```
//!
//! # Determinism
//!
//! - Part lists are sorted at discovery, independent of filesystem order
//! - Layers are composited in selection order regardless of fetch order
//! - PNG encoding uses fixed compression and filter settings

pub mod asset;
pub mod composite;
pub mod error;
pub mod layer;
pub mod png;
pub mod provider;
pub mod render;
pub mod resize;

pub use asset::{AssetSource, DirectoryAssetSource, MemoryAssetSource};
pub use composite::composite;
pub use error::RenderError;
pub use layer::RgbaLayer;
pub use png::{encode_rgba, write_rgba, write_rgba_to_writer, PngConfig};
pub use provider::{scan_set_dir, DirectoryCatalogProvider};
pub use render::{RenderResult, Renderer};
pub use resize::{resize, Size};
