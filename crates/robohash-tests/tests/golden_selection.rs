//! Golden-value tests for the seeded digest and part selection.
//!
//! Expected values were computed independently and must never change:
//! any difference here breaks every previously issued avatar.

use pretty_assertions::assert_eq;
use robohash_core::{
    select, seeded_digest, ChunkedPrng, Catalog, CatalogLimits, ConfigurationError,
    RobohashError,
};
use robohash_tests::fixtures::{golden_catalog, GOLDEN_CASES, GOLDEN_CATALOG_JSON};

// ============================================================================
// Digest
// ============================================================================

#[test]
fn digest_of_unittest_with_public_key() {
    assert_eq!(
        seeded_digest("unittest", "").to_hex(),
        "89402f7c8787e4d2610a42c072e11e0d6757882553388abbeb49e3443e96d72e\
         e3c3624bb1abb8d8a1bee63d7ddaa80c7917cc66cac764e64fca082e850e1f9a"
    );
}

#[test]
fn digest_chunks_are_big_endian() {
    let digest = seeded_digest("unittest", "");
    let chunks: Vec<u64> = (0..8).map(|i| digest.chunk(i).unwrap()).collect();
    assert_eq!(
        chunks,
        vec![
            9889956993601889490,
            6992474765774626317,
            7446570202771786427,
            16954332154460297006,
            16412069544311109848,
            11655006037460297740,
            8725667544914420966,
            5749416870185672602,
        ]
    );
    assert_eq!(digest.chunk(8), None);
}

#[test]
fn bounded_draws_follow_chunks() {
    let mut prng = ChunkedPrng::from_input("unittest", "");
    let draws: Vec<u64> = [5, 8, 10, 11, 9, 7, 3, 1000]
        .iter()
        .map(|&m| prng.next_bounded(m).unwrap())
        .collect();
    assert_eq!(draws, vec![0, 5, 7, 3, 5, 4, 2, 602]);
    assert!(matches!(
        prng.next_bounded(5),
        Err(RobohashError::ExhaustedEntropy { .. })
    ));
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn golden_selections() {
    let catalog = golden_catalog();
    for case in GOLDEN_CASES {
        let selection = select(&catalog, case.identifier, case.key).unwrap();
        assert_eq!(
            selection.tokens(),
            case.tokens.to_vec(),
            "tokens for ({:?}, {:?})",
            case.identifier,
            case.key
        );
        assert_eq!(selection.tag(), case.tag);
    }
}

#[test]
fn categories_visit_in_suffix_order() {
    let catalog = golden_catalog();
    let selection = select(&catalog, "unittest", "").unwrap();
    let categories: Vec<&str> = selection.parts.iter().map(|p| p.category.as_str()).collect();
    assert_eq!(
        categories,
        vec!["003#01Body", "004#02Face", "002#Accessory", "001#Eyes", "000#Mouth"]
    );
}

#[test]
fn selection_consumes_one_draw_per_category_plus_color() {
    let catalog = golden_catalog();
    assert_eq!(catalog.required_draws(), 6);

    let mut prng = ChunkedPrng::from_input("unittest", "");
    robohash_core::select_parts(&catalog, &mut prng).unwrap();
    assert_eq!(prng.chunks_consumed(), 6);
    assert_eq!(prng.remaining(), 2);
}

#[test]
fn golden_catalog_passes_strict_limits() {
    let catalog = Catalog::from_json_with_limits(GOLDEN_CATALOG_JSON, &CatalogLimits::strict());
    let catalog = catalog.unwrap();
    assert!(catalog.choice_bits() > CatalogLimits::DEFAULT_MIN_CHOICE_BITS);
}

#[test]
fn catalog_json_round_trip_preserves_selection() {
    let catalog = golden_catalog();
    let reparsed = Catalog::from_json(&catalog.to_json_pretty().unwrap()).unwrap();
    assert_eq!(
        select(&catalog, "bob", "k").unwrap(),
        select(&reparsed, "bob", "k").unwrap()
    );
}

#[test]
fn eight_categories_exceed_draw_budget() {
    let categories: Vec<String> = (0..8)
        .map(|i| format!("\"{:03}#C{}\": [\"a.png\"]", i, i))
        .collect();
    let json = format!("{{\"red\": {{{}}}}}", categories.join(", "));
    let err = Catalog::from_json(&json).unwrap_err();
    assert!(matches!(
        err,
        RobohashError::Configuration(ConfigurationError::TooManyCategories { .. })
    ));
}
