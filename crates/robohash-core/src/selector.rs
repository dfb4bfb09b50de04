//! Deterministic part selection.
//!
//! Draw order is part of the contract: draw 0 picks the color, then one draw
//! per category in suffix order. The same `(identifier, key, catalog)` always
//! yields the same selection.
//!
//! # Category order
//!
//! Categories are visited by the text after their *last* `#` (the whole name
//! when there is no `#`), not by full name. For example `003#01Body` sorts
//! before `002#Accessory`. The sort is stable and the catalog hands names in
//! ascending full-key order, so two categories with the same suffix are
//! visited in full-key order.

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::digest::seeded_digest;
use crate::error::RobohashError;
use crate::prng::ChunkedPrng;
use crate::token::encode_token;

/// Returns the sort key of a category name: the text after the last `#`.
pub fn suffix_key(name: &str) -> &str {
    match name.rfind('#') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Sorts category names into visit order.
pub fn sort_categories<'a, I>(names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&'a str> = names.into_iter().collect();
    // stable: equal suffixes keep their incoming order
    names.sort_by(|a, b| suffix_key(a).cmp(suffix_key(b)));
    names
}

/// One chosen part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedPart {
    /// Full category name.
    pub category: String,
    /// Chosen part name.
    pub part: String,
    /// Index of the part within the category's list.
    pub index: usize,
}

/// The ordered parts chosen for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartSelection {
    /// Chosen color.
    pub color: String,
    /// Index of the color among the sorted color names.
    pub color_index: usize,
    /// Parts in visit order.
    pub parts: Vec<SelectedPart>,
}

impl PartSelection {
    /// Path-like tokens, one per part, in visit order.
    pub fn tokens(&self) -> Vec<String> {
        self.parts
            .iter()
            .map(|p| encode_token(&self.color, &p.category, &p.part))
            .collect()
    }

    /// Decision tag `color_index,i1,i2,...`.
    ///
    /// Two selections from the same catalog are equal iff their tags are.
    pub fn tag(&self) -> String {
        std::iter::once(self.color_index)
            .chain(self.parts.iter().map(|p| p.index))
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if no parts were selected.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Selects one part per category, consuming draws from `prng`.
///
/// Consumes exactly `catalog.required_draws()` draws on success. If `prng`
/// cannot serve that many, fails with [`RobohashError::ExhaustedEntropy`]
/// before drawing anything.
pub fn select_parts(catalog: &Catalog, prng: &mut ChunkedPrng) -> Result<PartSelection, RobohashError> {
    if catalog.required_draws() > prng.remaining() {
        return Err(RobohashError::ExhaustedEntropy {
            consumed: prng.chunks_consumed(),
        });
    }

    let colors: Vec<_> = catalog.tree().iter().collect();
    let color_index = prng.next_index(colors.len())?;
    let (color, categories) = colors[color_index];

    let mut parts = Vec::with_capacity(categories.len());
    for category in sort_categories(categories.keys().map(String::as_str)) {
        let options = &categories[category];
        let index = prng.next_index(options.len())?;
        parts.push(SelectedPart {
            category: category.to_string(),
            part: options[index].clone(),
            index,
        });
    }

    let selection = PartSelection {
        color: color.to_string(),
        color_index,
        parts,
    };
    debug!(color = %selection.color, tag = %selection.tag(), "parts selected");
    Ok(selection)
}

/// Selects parts for `(identifier, key)` with a fresh generator.
///
/// # Example
/// ```
/// use robohash_core::{select, Catalog};
///
/// let catalog = Catalog::from_json(
///     r#"{"red": {"000#Mouth": ["a.png", "b.png"]}, "blue": {"000#Mouth": ["a.png", "b.png"]}}"#,
/// ).unwrap();
/// let first = select(&catalog, "unittest", "").unwrap();
/// let second = select(&catalog, "unittest", "").unwrap();
/// assert_eq!(first, second);
/// ```
pub fn select(catalog: &Catalog, identifier: &str, key: &str) -> Result<PartSelection, RobohashError> {
    let mut prng = ChunkedPrng::new(seeded_digest(identifier, key));
    select_parts(catalog, &mut prng)
}
