//! Test fixtures: the golden catalog and on-disk part sets.

use std::fs;
use std::path::{Path, PathBuf};

use robohash_backend_image::{encode_rgba, PngConfig, RgbaLayer};
use robohash_core::{sort_categories, Catalog};
use tempfile::TempDir;

/// Golden catalog: five colors, five categories with 7, 9, 11, 10 and 8 parts.
pub const GOLDEN_CATALOG_JSON: &str = include_str!("../fixtures/golden_catalog.json");

/// Side length of generated part images.
pub const PART_SIDE: u32 = 32;

/// Parses the golden catalog.
pub fn golden_catalog() -> Catalog {
    Catalog::from_json(GOLDEN_CATALOG_JSON).expect("golden catalog must be valid")
}

/// Expected output for one golden input.
#[derive(Debug, Clone, Copy)]
pub struct GoldenCase {
    pub identifier: &'static str,
    pub key: &'static str,
    pub tag: &'static str,
    pub tokens: [&'static str; 5],
}

/// Golden selections over [`golden_catalog`].
pub const GOLDEN_CASES: &[GoldenCase] = &[
    GoldenCase {
        identifier: "unittest",
        key: "",
        tag: "0,7,3,3,5,4",
        tokens: [
            "blue/003%2301Body/007%2301body%207.png",
            "blue/004%2302Face/003%2302face%203.png",
            "blue/002%23Accessory/003%23accessory%203.png",
            "blue/001%23Eyes/005%23eyes%205.png",
            "blue/000%23Mouth/004%23mouth%204.png",
        ],
    },
    GoldenCase {
        identifier: "unittest",
        key: "secret",
        tag: "4,4,2,6,6,3",
        tokens: [
            "yellow/003%2301Body/004%2301body%204.png",
            "yellow/004%2302Face/002%2302face%202.png",
            "yellow/002%23Accessory/006%23accessory%206.png",
            "yellow/001%23Eyes/006%23eyes%206.png",
            "yellow/000%23Mouth/003%23mouth%203.png",
        ],
    },
    GoldenCase {
        identifier: "alice@example.com",
        key: "",
        tag: "1,6,1,8,5,3",
        tokens: [
            "green/003%2301Body/006%2301body%206.png",
            "green/004%2302Face/001%2302face%201.png",
            "green/002%23Accessory/008%23accessory%208.png",
            "green/001%23Eyes/005%23eyes%205.png",
            "green/000%23Mouth/003%23mouth%203.png",
        ],
    },
];

/// A temporary `sets/` directory populated with PNG part images.
pub struct PartSetFixture {
    pub root: TempDir,
    pub sets_dir: PathBuf,
}

impl PartSetFixture {
    /// Creates an empty sets directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let sets_dir = root.path().join("sets");
        fs::create_dir_all(&sets_dir).expect("Failed to create sets dir");
        Self { root, sets_dir }
    }

    /// Sets directory path.
    pub fn path(&self) -> &Path {
        &self.sets_dir
    }

    /// Writes every part of `catalog` as a PNG under `sets/<set>/`.
    ///
    /// Each part draws a small opaque block whose position and color encode
    /// its color, category and part index, so composites are distinguishable.
    pub fn add_set(&self, set: &str, catalog: &Catalog) -> PathBuf {
        let set_dir = self.sets_dir.join(set);
        for (color_index, color) in catalog.color_names().into_iter().enumerate() {
            let categories = catalog.categories(color).expect("color listed by catalog");
            let ordered = sort_categories(categories.keys().map(String::as_str));
            for (category_index, category) in ordered.into_iter().enumerate() {
                let dir = set_dir.join(color).join(category);
                fs::create_dir_all(&dir).expect("Failed to create category dir");
                for (part_index, part) in categories[category].iter().enumerate() {
                    let layer = part_layer(color_index, category_index, part_index);
                    let bytes = encode_rgba(&layer, &PngConfig::default())
                        .expect("Failed to encode part");
                    fs::write(dir.join(part), bytes).expect("Failed to write part");
                }
            }
        }
        set_dir
    }

    /// Writes the golden catalog as `set1`.
    pub fn with_golden_set() -> Self {
        let fixture = Self::new();
        fixture.add_set("set1", &golden_catalog());
        fixture
    }
}

impl Default for PartSetFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Part image for the given indices.
pub fn part_layer(color_index: usize, category_index: usize, part_index: usize) -> RgbaLayer {
    let mut layer = RgbaLayer::transparent(PART_SIDE, PART_SIDE);
    let x0 = (category_index * 6) as u32;
    let y0 = (part_index * 2) as u32;
    let rgba = [
        (color_index * 50) as u8,
        (category_index * 40) as u8,
        (part_index * 20) as u8,
        255,
    ];
    for y in y0..(y0 + 4).min(PART_SIDE) {
        for x in x0..(x0 + 4).min(PART_SIDE) {
            layer.set(x, y, rgba);
        }
    }
    layer
}
