//! Per-category age normalization and game lookup strategies.
//!
//! Categories disagree on bucket names and on how game keys are cased, so
//! each one picks a [`CategoryStrategy`] instead of sharing a single switch.

use serde::{Deserialize, Serialize};

use crate::age::{
    is_kids_family, is_teens_family, normalize_default, normalize_finance,
    normalize_sustainability,
};
use crate::constants::{DEDICATED_KIDS, DEDICATED_TEENS, MERGED_BUCKET};
use crate::data::{ContentTree, GameContent};

/// Normalization plus lookup, supplied once per category.
pub trait CategoryStrategy: Send + Sync {
    /// Map a raw age-group token onto this category's bucket name.
    fn normalize_age(&self, raw: &str) -> String;

    /// Find a game in `tree`.
    ///
    /// `bucket` is the output of [`Self::normalize_age`] for `raw_age`; the raw
    /// token is passed along for strategies that route on it directly.
    fn lookup_game<'a>(
        &self,
        tree: &'a ContentTree,
        bucket: &str,
        raw_age: &str,
        key: &str,
    ) -> Option<&'a GameContent>;

    /// Dedicated table consulted ahead of the buckets for `raw_age`, if any.
    fn dedicated_table(&self, _raw_age: &str) -> Option<&'static str> {
        None
    }

    /// Normalize then look up, returning the bucket that was used.
    fn resolve<'a>(
        &self,
        tree: &'a ContentTree,
        raw_age: &str,
        key: &str,
    ) -> (String, Option<&'a GameContent>) {
        let bucket = self.normalize_age(raw_age);
        let found = self.lookup_game(tree, &bucket, raw_age, key);
        (bucket, found)
    }
}

/// Direct `tree[bucket][key]` index.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl CategoryStrategy for DefaultStrategy {
    fn normalize_age(&self, raw: &str) -> String {
        normalize_default(raw)
    }

    fn lookup_game<'a>(
        &self,
        tree: &'a ContentTree,
        bucket: &str,
        _raw_age: &str,
        key: &str,
    ) -> Option<&'a GameContent> {
        tree.get(bucket, key)
    }
}

/// Finance keys were authored with mixed casing: lowercase first, then raw.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinanceStrategy;

impl CategoryStrategy for FinanceStrategy {
    fn normalize_age(&self, raw: &str) -> String {
        normalize_finance(raw)
    }

    fn lookup_game<'a>(
        &self,
        tree: &'a ContentTree,
        bucket: &str,
        _raw_age: &str,
        key: &str,
    ) -> Option<&'a GameContent> {
        let lowered = key.to_lowercase();
        tree.get(bucket, &lowered).or_else(|| {
            log::trace!("finance lookup retrying with raw key {key:?}");
            tree.get(bucket, key)
        })
    }
}

/// Dedicated audience tables first, then the canonical bucket, then `all`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SustainabilityStrategy;

impl CategoryStrategy for SustainabilityStrategy {
    fn normalize_age(&self, raw: &str) -> String {
        normalize_sustainability(raw)
    }

    fn lookup_game<'a>(
        &self,
        tree: &'a ContentTree,
        bucket: &str,
        raw_age: &str,
        key: &str,
    ) -> Option<&'a GameContent> {
        let key = key.to_lowercase();
        if key.is_empty() {
            return None;
        }

        if let Some(table) = self.dedicated_table(raw_age) {
            if let Some(found) = tree.get_dedicated(table, &key) {
                return Some(found);
            }
            log::trace!("sustainability dedicated {table} table missed {key:?}");
        }

        tree.get(bucket, &key).or_else(|| {
            log::trace!("sustainability bucket {bucket:?} missed {key:?}, trying merged");
            tree.get(MERGED_BUCKET, &key)
        })
    }

    fn dedicated_table(&self, raw_age: &str) -> Option<&'static str> {
        if is_kids_family(raw_age) {
            Some(DEDICATED_KIDS)
        } else if is_teens_family(raw_age) {
            Some(DEDICATED_TEENS)
        } else {
            None
        }
    }
}

static DEFAULT_STRATEGY: DefaultStrategy = DefaultStrategy;
static FINANCE_STRATEGY: FinanceStrategy = FinanceStrategy;
static SUSTAINABILITY_STRATEGY: SustainabilityStrategy = SustainabilityStrategy;

/// Serialized selector naming which strategy a category uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    Default,
    Finance,
    Sustainability,
}

impl StrategyKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Finance => "finance",
            Self::Sustainability => "sustainability",
        }
    }

    #[must_use]
    pub fn strategy(self) -> &'static dyn CategoryStrategy {
        match self {
            Self::Default => &DEFAULT_STRATEGY,
            Self::Finance => &FINANCE_STRATEGY,
            Self::Sustainability => &SUSTAINABILITY_STRATEGY,
        }
    }

    /// Whether categories using this strategy read a merged `all` bucket.
    #[must_use]
    pub const fn uses_merged_bucket(self) -> bool {
        matches!(self, Self::Sustainability)
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameTable;

    fn content(component: &str) -> GameContent {
        GameContent {
            component: component.to_string(),
            title: component.to_string(),
            summary: String::new(),
        }
    }

    fn table(entries: &[(&str, &str)]) -> GameTable {
        entries
            .iter()
            .map(|(key, component)| ((*key).to_string(), content(component)))
            .collect()
    }

    fn component_of(found: Option<&GameContent>) -> Option<&str> {
        found.map(|c| c.component.as_str())
    }

    #[test]
    fn default_lookup_is_a_direct_index() {
        let mut tree = ContentTree::default();
        tree.buckets
            .insert("teen".to_string(), table(&[("focus-flow", "FocusFlow")]));

        let strategy = StrategyKind::Default.strategy();
        let (bucket, found) = strategy.resolve(&tree, "teens", "focus-flow");
        assert_eq!(bucket, "teen");
        assert_eq!(component_of(found), Some("FocusFlow"));

        assert!(strategy.resolve(&tree, "teen", "Focus-Flow").1.is_none());
        assert!(strategy.resolve(&tree, "kids", "focus-flow").1.is_none());
    }

    #[test]
    fn finance_tries_lowercase_then_raw() {
        let mut tree = ContentTree::default();
        tree.buckets.insert(
            "adults".to_string(),
            table(&[
                ("income-vs-expense-reality", "IncomeVsExpenseReality"),
                ("Budget-Builder-Pro", "BudgetBuilderPro"),
            ]),
        );

        let strategy = StrategyKind::Finance.strategy();
        let exact = strategy.resolve(&tree, "adults", "income-vs-expense-reality").1;
        let mixed = strategy.resolve(&tree, "adults", "Income-Vs-Expense-Reality").1;
        assert_eq!(component_of(exact), Some("IncomeVsExpenseReality"));
        assert_eq!(exact, mixed);

        let raw_only = strategy.resolve(&tree, "adults", "Budget-Builder-Pro").1;
        assert_eq!(component_of(raw_only), Some("BudgetBuilderPro"));
        assert!(strategy.resolve(&tree, "adults", "budget-builder-pro").1.is_none());
    }

    #[test]
    fn sustainability_prefers_dedicated_tables() {
        let mut tree = ContentTree::default();
        tree.dedicated
            .insert("kids".to_string(), table(&[("shared", "DedicatedKids")]));
        tree.buckets
            .insert("kids".to_string(), table(&[("shared", "BucketKids")]));

        let strategy = StrategyKind::Sustainability.strategy();
        assert_eq!(
            component_of(strategy.resolve(&tree, "kid", "SHARED").1),
            Some("DedicatedKids")
        );
    }

    #[test]
    fn sustainability_bucket_wins_over_merged() {
        let mut tree = ContentTree::default();
        tree.buckets
            .insert("teens".to_string(), table(&[("collide", "BucketTeens")]));
        tree.buckets
            .insert("all".to_string(), table(&[("collide", "MergedAll")]));

        let strategy = StrategyKind::Sustainability.strategy();
        let (bucket, found) = strategy.resolve(&tree, "young-adult", "collide");
        assert_eq!(bucket, "teens");
        assert_eq!(component_of(found), Some("BucketTeens"));
    }

    #[test]
    fn sustainability_falls_back_to_merged() {
        let mut tree = ContentTree::default();
        tree.buckets
            .insert("all".to_string(), table(&[("carbon-quest", "CarbonQuest")]));

        let strategy = StrategyKind::Sustainability.strategy();
        assert_eq!(
            component_of(strategy.resolve(&tree, "adults", "carbon-quest").1),
            Some("CarbonQuest")
        );
        assert!(strategy.resolve(&tree, "adults", "").1.is_none());
        assert!(strategy.resolve(&tree, "adults", "missing").1.is_none());
    }

    #[test]
    fn sustainability_teen_token_uses_dedicated_teens() {
        let mut tree = ContentTree::default();
        tree.dedicated
            .insert("teens".to_string(), table(&[("eco-debate", "EcoDebate")]));

        let strategy = StrategyKind::Sustainability.strategy();
        let (bucket, found) = strategy.resolve(&tree, "teen", "eco-debate");
        assert_eq!(bucket, "teen");
        assert_eq!(component_of(found), Some("EcoDebate"));
        assert!(strategy.resolve(&tree, "kids", "eco-debate").1.is_none());
    }

    #[test]
    fn only_sustainability_routes_to_dedicated_tables() {
        let sustainability = StrategyKind::Sustainability.strategy();
        assert_eq!(sustainability.dedicated_table("kid"), Some("kids"));
        assert_eq!(sustainability.dedicated_table("young-adult"), Some("teens"));
        assert_eq!(sustainability.dedicated_table("adults"), None);
        assert_eq!(StrategyKind::Default.strategy().dedicated_table("kids"), None);
        assert_eq!(StrategyKind::Finance.strategy().dedicated_table("teens"), None);
    }

    #[test]
    fn strategy_kind_keys_round_trip_through_serde() {
        for kind in [
            StrategyKind::Default,
            StrategyKind::Finance,
            StrategyKind::Sustainability,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.key()));
            assert_eq!(kind.to_string(), kind.key());
        }
        assert!(StrategyKind::Sustainability.uses_merged_bucket());
        assert!(!StrategyKind::Finance.uses_merged_bucket());
    }
}
