#![no_main]

use libfuzzer_sys::fuzz_target;
use robohash_core::{select, Catalog, CatalogTree};

// Any catalog that validates must select without error for any identifier.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (json, identifier) = text.split_once('\n').unwrap_or((text, ""));
    let Ok(tree) = serde_json::from_str::<CatalogTree>(json) else {
        return;
    };
    if let Ok(catalog) = Catalog::new(tree) {
        let selection = select(&catalog, identifier, "").expect("valid catalog selects");
        assert_eq!(selection.len(), catalog.category_count());
    }
});
