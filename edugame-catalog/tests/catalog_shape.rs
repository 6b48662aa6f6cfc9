use std::collections::BTreeSet;

use edugame_catalog::{
    CatalogData, CatalogLoader, CategoryRegistry, StaticCatalogLoader, StrategyKind,
    default_registry,
};

#[test]
fn every_bucket_is_a_fixed_point_of_its_normalizer() {
    for entry in default_registry().categories() {
        for bucket in entry.buckets() {
            let once = entry.normalize_age(bucket);
            assert_eq!(once, bucket, "{} bucket {bucket}", entry.id());
            assert_eq!(entry.normalize_age(&once), once);
        }
    }
}

#[test]
fn bundled_categories_have_display_metadata() {
    for entry in default_registry().categories() {
        let meta = entry.meta();
        assert!(!meta.title.is_empty(), "{} has no title", entry.id());
        assert!(!meta.icon.is_empty(), "{} has no icon", entry.id());
        assert!(meta.color.starts_with("from-"), "{} color", entry.id());
        assert!(entry.game_count() > 0, "{} has no games", entry.id());
    }
}

#[test]
fn quirky_categories_use_their_strategies() {
    let registry = default_registry();
    let strategy_of = |key: &str| registry.get(key).map(|entry| entry.strategy_kind());
    assert_eq!(strategy_of("finance"), Some(StrategyKind::Finance));
    assert_eq!(strategy_of("sustainability"), Some(StrategyKind::Sustainability));
    assert_eq!(strategy_of("brain"), Some(StrategyKind::Default));
    assert_eq!(strategy_of("brain-health"), Some(StrategyKind::Default));
}

#[test]
fn aliases_never_appear_as_categories() {
    let registry = default_registry();
    let canonical: BTreeSet<_> = registry.categories().map(|entry| entry.id()).collect();
    let all_keys: BTreeSet<_> = registry.keys().collect();
    let aliases: BTreeSet<_> = registry.aliases().map(|(alias, _)| alias).collect();

    assert!(canonical.is_disjoint(&aliases));
    assert_eq!(canonical.len() + aliases.len(), all_keys.len());
    assert!(aliases.contains("brain-health"));
    for (_, target) in registry.aliases() {
        assert!(canonical.contains(target));
    }
}

#[test]
fn bundled_data_survives_a_serde_round_trip() {
    let data = StaticCatalogLoader.load_catalog().unwrap();
    let json = serde_json::to_string(&data).unwrap();
    let reparsed = CatalogData::from_json(&json).unwrap();
    assert_eq!(data, reparsed);

    let rebuilt = CategoryRegistry::from_data(reparsed).unwrap();
    let ids: Vec<_> = rebuilt.categories().map(|entry| entry.id().to_string()).collect();
    let bundled: Vec<_> = default_registry()
        .categories()
        .map(|entry| entry.id().to_string())
        .collect();
    assert_eq!(ids, bundled);
}

#[test]
fn sustainability_merged_bucket_covers_per_age_games() {
    let entry = default_registry().get("sustainability").unwrap();
    let merged: BTreeSet<_> = entry.games_in("all").map(|(key, _)| key).collect();
    for bucket in ["kids", "teens"] {
        for (key, _) in entry.games_in(bucket) {
            assert!(merged.contains(key), "{key} missing from merged bucket");
        }
    }
}
