//! RoboHash Selection Core
//!
//! This crate deterministically maps an identifier (optionally with a secret
//! key) to an ordered selection of parts, one per category, from a part
//! catalog. The same identifier always yields the same selection on any
//! machine and in any conforming implementation.
//!
//! # Overview
//!
//! ```text
//! (identifier, key) -> HMAC-SHA512 digest -> 8 x 64-bit chunks
//!                   -> color draw + one draw per category (suffix order)
//!                   -> PartSelection -> "color/category/part" tokens
//! ```
//!
//! # Example
//!
//! ```
//! use robohash_core::{select, Catalog};
//!
//! let catalog = Catalog::from_json(r#"{
//!     "blue": { "000#Mouth": ["a.png", "b.png"], "001#Eyes": ["c.png", "d.png", "e.png"] },
//!     "red":  { "000#Mouth": ["a.png", "b.png"], "001#Eyes": ["c.png", "d.png", "e.png"] }
//! }"#).unwrap();
//!
//! let selection = select(&catalog, "alice@example.com", "").unwrap();
//! assert_eq!(selection.tokens().len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`digest`]: HMAC-SHA512 seeded digest
//! - [`prng`]: Chunked bounded-draw generator and entropy budget
//! - [`catalog`]: Catalog model and configuration-time validation
//! - [`selector`]: Category ordering and part selection
//! - [`token`]: Percent-encoded path tokens
//! - [`provider`]: Catalog provider trait and JSON provider
//! - [`config`]: Generator configuration
//! - [`error`]: Error taxonomy and codes

pub mod catalog;
pub mod config;
pub mod digest;
pub mod error;
pub mod prng;
pub mod provider;
pub mod selector;
pub mod token;

// Re-export commonly used types at the crate root
pub use catalog::{Catalog, CatalogLimits, CatalogTree};
pub use config::RobohashConfig;
pub use digest::{seeded_digest, seeded_digest_bytes, Digest512, PUBLIC_KEY};
pub use error::{
    BackendError, ConfigurationError, DigestInput, ErrorCode, GenerationError, RobohashError,
};
pub use prng::{ChunkedPrng, EntropyBudget};
pub use provider::{CatalogProvider, JsonCatalogProvider};
pub use selector::{select, select_parts, sort_categories, suffix_key, PartSelection, SelectedPart};
pub use token::{decode_token, encode_token, TokenParts};
