use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::lookup::StrategyKind;

/// Games of one age bucket, keyed by game id.
pub type GameTable = BTreeMap<String, GameContent>;

/// The renderable unit a successful resolution hands back.
///
/// The resolver never looks inside; `component` names whatever the rendering
/// layer instantiates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContent {
    pub component: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

/// Display-only attributes shown next to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryMeta {
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

/// Two-level content tree: bucket, then game id.
///
/// `dedicated` holds per-audience tables some categories consult before the
/// regular buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContentTree {
    #[serde(default)]
    pub buckets: BTreeMap<String, GameTable>,
    #[serde(default)]
    pub dedicated: BTreeMap<String, GameTable>,
}

impl ContentTree {
    #[must_use]
    pub fn get(&self, bucket: &str, key: &str) -> Option<&GameContent> {
        self.buckets.get(bucket)?.get(key)
    }

    #[must_use]
    pub fn get_dedicated(&self, table: &str, key: &str) -> Option<&GameContent> {
        self.dedicated.get(table)?.get(key)
    }

    #[must_use]
    pub fn bucket(&self, bucket: &str) -> Option<&GameTable> {
        self.buckets.get(bucket)
    }

    /// Merge every bucket into one table, first occurrence (in key order) wins.
    #[must_use]
    pub fn merged(&self) -> GameTable {
        let mut merged = GameTable::new();
        for table in self.buckets.values() {
            for (key, content) in table {
                merged
                    .entry(key.clone())
                    .or_insert_with(|| content.clone());
            }
        }
        merged
    }
}

/// A category as authored in catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryData {
    pub id: String,
    #[serde(default)]
    pub strategy: StrategyKind,
    pub meta: CategoryMeta,
    pub games: BTreeMap<String, GameTable>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dedicated: BTreeMap<String, GameTable>,
}

impl CategoryData {
    #[must_use]
    pub fn tree(&self) -> ContentTree {
        ContentTree {
            buckets: self.games.clone(),
            dedicated: self.dedicated.clone(),
        }
    }
}

/// Container for the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogData {
    pub categories: Vec<CategoryData>,
    /// Alternate category keys, alias to target.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl CatalogData {
    /// Create empty catalog data (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load catalog data from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid catalog data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(component: &str) -> GameContent {
        GameContent {
            component: component.to_string(),
            title: component.to_string(),
            summary: String::new(),
        }
    }

    #[test]
    fn catalog_data_from_json() {
        let json = r#"{
            "categories": [
                {
                    "id": "finance",
                    "strategy": "finance",
                    "meta": { "title": "Financial Literacy", "icon": "💰" },
                    "games": {
                        "adults": {
                            "income-vs-expense-reality": {
                                "component": "IncomeVsExpenseReality",
                                "title": "Income vs Expense Reality"
                            }
                        }
                    }
                }
            ],
            "aliases": { "money": "finance" }
        }"#;

        let data = CatalogData::from_json(json).unwrap();
        assert_eq!(data.categories.len(), 1);
        let finance = &data.categories[0];
        assert_eq!(finance.strategy, StrategyKind::Finance);
        assert_eq!(finance.meta.color, "");
        let game = &finance.games["adults"]["income-vs-expense-reality"];
        assert_eq!(game.component, "IncomeVsExpenseReality");
        assert!(game.summary.is_empty());
        assert_eq!(data.aliases["money"], "finance");
    }

    #[test]
    fn strategy_defaults_when_omitted() {
        let json = r#"{ "categories": [ { "id": "brain", "meta": { "title": "Brain" }, "games": {} } ] }"#;
        let data = CatalogData::from_json(json).unwrap();
        assert_eq!(data.categories[0].strategy, StrategyKind::Default);
        assert!(data.aliases.is_empty());
    }

    #[test]
    fn merged_prefers_first_bucket_in_key_order() {
        let mut tree = ContentTree::default();
        tree.buckets.insert(
            "kids".to_string(),
            GameTable::from([("shared".to_string(), content("KidsShared"))]),
        );
        tree.buckets.insert(
            "teens".to_string(),
            GameTable::from([
                ("shared".to_string(), content("TeensShared")),
                ("only-teens".to_string(), content("OnlyTeens")),
            ]),
        );

        let merged = tree.merged();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["shared"].component, "KidsShared");
        assert_eq!(merged["only-teens"].component, "OnlyTeens");
    }

    #[test]
    fn tree_lookups_miss_without_panicking() {
        let tree = ContentTree::default();
        assert!(tree.get("kids", "anything").is_none());
        assert!(tree.get_dedicated("kids", "anything").is_none());
        assert!(tree.bucket("kids").is_none());
    }
}
