//! Part catalog model and configuration-time validation.
//!
//! A catalog maps color name -> category name -> ordered part names:
//!
//! ```json
//! {
//!   "blue": { "000#Mouth": ["000#mouth 0.png"], "001#Eyes": ["000#eyes 0.png"] },
//!   "red":  { "000#Mouth": ["000#mouth 0.png"], "001#Eyes": ["000#eyes 0.png"] }
//! }
//! ```
//!
//! Every invariant the selector relies on is checked once, when the
//! [`Catalog`] is built. A valid catalog can never fail a draw.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, RobohashError};
use crate::prng::EntropyBudget;

/// Raw nested mapping: color -> category -> parts.
pub type CatalogTree = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Limits a catalog is validated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogLimits {
    /// Digest capacity the catalog must fit in.
    pub budget: EntropyBudget,
    /// Minimum bits of choice every color must offer, if any.
    pub min_choice_bits: Option<f64>,
}

impl CatalogLimits {
    /// Default minimum choice for published part sets.
    pub const DEFAULT_MIN_CHOICE_BITS: f64 = 12.0;

    /// Limits with the default minimum choice enforced.
    pub fn strict() -> Self {
        Self {
            budget: EntropyBudget::SHA512,
            min_choice_bits: Some(Self::DEFAULT_MIN_CHOICE_BITS),
        }
    }

    /// Sets the minimum choice bits.
    pub fn with_min_choice_bits(mut self, bits: Option<f64>) -> Self {
        self.min_choice_bits = bits;
        self
    }
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            budget: EntropyBudget::SHA512,
            min_choice_bits: None,
        }
    }
}

/// A validated, immutable part catalog.
///
/// Read-only after construction, so one instance can be shared across any
/// number of concurrent selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogTree", into = "CatalogTree")]
pub struct Catalog {
    tree: CatalogTree,
    budget: EntropyBudget,
}

impl Catalog {
    /// Validates `tree` against the default limits.
    pub fn new(tree: CatalogTree) -> Result<Self, ConfigurationError> {
        Self::with_limits(tree, &CatalogLimits::default())
    }

    /// Validates `tree` against explicit limits.
    pub fn with_limits(tree: CatalogTree, limits: &CatalogLimits) -> Result<Self, ConfigurationError> {
        let (reference_color, reference) = tree.iter().next().ok_or(ConfigurationError::NoColors)?;

        if reference.is_empty() {
            return Err(ConfigurationError::NoCategories);
        }
        let expected: Vec<String> = reference.keys().cloned().collect();

        for (color, categories) in &tree {
            if color.is_empty() || color.contains('/') {
                return Err(ConfigurationError::InvalidColorName(color.clone()));
            }
            if !categories.keys().eq(expected.iter()) {
                return Err(ConfigurationError::CategoryMismatch {
                    color: color.clone(),
                    reference: reference_color.clone(),
                    expected: expected.clone(),
                    found: categories.keys().cloned().collect(),
                });
            }
            for (category, parts) in categories {
                if parts.is_empty() {
                    return Err(ConfigurationError::EmptyPartList {
                        color: color.clone(),
                        category: category.clone(),
                    });
                }
            }
        }

        limits.budget.check_served()?;
        limits.budget.check_draws(expected.len())?;

        let catalog = Self {
            tree,
            budget: limits.budget,
        };

        if let Some(minimum) = limits.min_choice_bits {
            for color in catalog.tree.keys() {
                let bits = catalog.color_choice_bits(color);
                if bits < minimum {
                    return Err(ConfigurationError::InsufficientParts {
                        color: color.clone(),
                        bits,
                        minimum,
                    });
                }
            }
        }

        Ok(catalog)
    }

    /// Parses and validates a JSON catalog.
    pub fn from_json(json: &str) -> Result<Self, RobohashError> {
        let tree: CatalogTree = serde_json::from_str(json)?;
        Ok(Self::new(tree)?)
    }

    /// Parses a JSON catalog and validates it against explicit limits.
    pub fn from_json_with_limits(json: &str, limits: &CatalogLimits) -> Result<Self, RobohashError> {
        let tree: CatalogTree = serde_json::from_str(json)?;
        Ok(Self::with_limits(tree, limits)?)
    }

    /// Serializes the catalog to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, RobohashError> {
        Ok(serde_json::to_string_pretty(&self.tree)?)
    }

    /// Color names in ascending byte order.
    pub fn color_names(&self) -> Vec<&str> {
        self.tree.keys().map(String::as_str).collect()
    }

    /// Categories of `color`, keyed by full category name.
    pub fn categories(&self, color: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.tree.get(color)
    }

    /// Number of categories (identical for every color).
    pub fn category_count(&self) -> usize {
        self.tree.values().next().map_or(0, BTreeMap::len)
    }

    /// Draws one selection consumes: the color plus one per category.
    pub fn required_draws(&self) -> usize {
        1 + self.category_count()
    }

    /// The entropy budget this catalog was validated against.
    pub fn budget(&self) -> EntropyBudget {
        self.budget
    }

    /// Bits of choice offered by the poorest color.
    pub fn choice_bits(&self) -> f64 {
        self.tree
            .keys()
            .map(|color| self.color_choice_bits(color))
            .fold(f64::INFINITY, f64::min)
    }

    fn color_choice_bits(&self, color: &str) -> f64 {
        let color_bits = (self.tree.len() as f64).log2();
        let part_bits: f64 = self
            .tree
            .get(color)
            .map(|categories| categories.values().map(|parts| (parts.len() as f64).log2()).sum())
            .unwrap_or(0.0);
        color_bits + part_bits
    }

    /// The underlying tree.
    pub fn tree(&self) -> &CatalogTree {
        &self.tree
    }
}

impl TryFrom<CatalogTree> for Catalog {
    type Error = ConfigurationError;

    fn try_from(tree: CatalogTree) -> Result<Self, Self::Error> {
        Self::new(tree)
    }
}

impl From<Catalog> for CatalogTree {
    fn from(catalog: Catalog) -> Self {
        catalog.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree(colors: &[&str], categories: &[(&str, usize)]) -> CatalogTree {
        colors
            .iter()
            .map(|color| {
                let cats = categories
                    .iter()
                    .map(|(name, n)| {
                        let parts = (0..*n).map(|i| format!("{}.png", i)).collect();
                        (name.to_string(), parts)
                    })
                    .collect();
                (color.to_string(), cats)
            })
            .collect()
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = Catalog::new(tree(&["red", "blue"], &[("a#x", 3), ("b#y", 4)])).unwrap();
        assert_eq!(catalog.color_names(), vec!["blue", "red"]);
        assert_eq!(catalog.category_count(), 2);
        assert_eq!(catalog.required_draws(), 3);
        assert!(catalog.categories("red").is_some());
        assert!(catalog.categories("green").is_none());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(
            Catalog::new(CatalogTree::new()),
            Err(ConfigurationError::NoColors)
        );
    }

    #[test]
    fn test_color_name_with_slash_rejected() {
        assert_eq!(
            Catalog::new(tree(&["dark/red"], &[("a", 2)])),
            Err(ConfigurationError::InvalidColorName("dark/red".to_string()))
        );
    }

    #[test]
    fn test_color_without_categories_rejected() {
        assert_eq!(
            Catalog::new(tree(&["red"], &[])),
            Err(ConfigurationError::NoCategories)
        );
    }

    #[test]
    fn test_seven_categories_accepted() {
        let cats: Vec<(String, usize)> = (0..7).map(|i| (format!("c{}", i), 2)).collect();
        let cats: Vec<(&str, usize)> = cats.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        let catalog = Catalog::new(tree(&["red"], &cats)).unwrap();
        assert_eq!(catalog.required_draws(), 8);
    }

    #[test]
    fn test_eight_categories_rejected_at_configuration() {
        let cats: Vec<(String, usize)> = (0..8).map(|i| (format!("c{}", i), 2)).collect();
        let cats: Vec<(&str, usize)> = cats.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        assert_eq!(
            Catalog::new(tree(&["red"], &cats)),
            Err(ConfigurationError::TooManyCategories {
                categories: 8,
                required: 9,
                max_draws: 8,
            })
        );
    }

    #[test]
    fn test_wider_budget_rejected_before_draw_check() {
        let cats: Vec<(String, usize)> = (0..10).map(|i| (format!("c{}", i), 2)).collect();
        let cats: Vec<(&str, usize)> = cats.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        let limits = CatalogLimits {
            budget: EntropyBudget {
                digest_bits: 1024,
                chunk_bits: 64,
                max_draws: 16,
            },
            min_choice_bits: None,
        };
        assert!(matches!(
            Catalog::with_limits(tree(&["red"], &cats), &limits),
            Err(ConfigurationError::InvalidBudget(_))
        ));
    }

    #[test]
    fn test_category_mismatch_rejected() {
        let mut t = tree(&["blue", "red"], &[("a", 2), ("b", 2)]);
        t.get_mut("red").unwrap().remove("b");
        let err = Catalog::new(t).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::CategoryMismatch {
                color: "red".to_string(),
                reference: "blue".to_string(),
                expected: vec!["a".to_string(), "b".to_string()],
                found: vec!["a".to_string()],
            }
        );
    }

    #[test]
    fn test_empty_part_list_rejected() {
        let t = tree(&["red"], &[("a", 2), ("b", 0)]);
        assert_eq!(
            Catalog::new(t),
            Err(ConfigurationError::EmptyPartList {
                color: "red".to_string(),
                category: "b".to_string(),
            })
        );
    }

    #[test]
    fn test_choice_bits() {
        // log2(2) + log2(4) + log2(8) = 1 + 2 + 3
        let catalog = Catalog::new(tree(&["blue", "red"], &[("a", 4), ("b", 8)])).unwrap();
        assert!((catalog.choice_bits() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_choice_bits_enforced() {
        let limits = CatalogLimits::strict();
        let err = Catalog::with_limits(tree(&["blue", "red"], &[("a", 4), ("b", 8)]), &limits)
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InsufficientParts { .. }));

        let rich = tree(&["blue", "red"], &[("a", 16), ("b", 16), ("c", 16)]);
        assert!(Catalog::with_limits(rich, &limits).is_ok());
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{"red": {"a": ["1.png"]}, "blue": {"b": ["1.png"]}}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert_eq!(err.code().code(), "R004");

        let err = Catalog::from_json("{not json").unwrap_err();
        assert_eq!(err.code().code(), "R006");
    }

    #[test]
    fn test_serde_round_trip_revalidates() {
        let catalog = Catalog::new(tree(&["red"], &[("a", 2)])).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(catalog, parsed);

        let invalid: Result<Catalog, _> = serde_json::from_str(r#"{"red": {"a": []}}"#);
        assert!(invalid.is_err());
    }
}
