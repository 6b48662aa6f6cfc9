//! Immutable category registry built once from catalog data.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::CatalogLoader;
use crate::constants::MERGED_BUCKET;
use crate::data::{CatalogData, CategoryData, CategoryMeta, ContentTree, GameContent, GameTable};
use crate::lookup::{CategoryStrategy, StrategyKind};

const BUNDLED_CATALOG_DATA: &str = include_str!("../assets/data/catalog.json");

pub(crate) const fn bundled_catalog_json() -> &'static str {
    BUNDLED_CATALOG_DATA
}

/// Failures while turning catalog data into a registry.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to load catalog data: {0}")]
    Load(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("category '{0}' is defined more than once")]
    DuplicateCategory(String),
    #[error("category id must not be empty")]
    EmptyCategoryId,
    #[error("category '{category}' has an empty game key in bucket '{bucket}'")]
    EmptyGameKey { category: String, bucket: String },
    #[error("alias '{alias}' points at unknown category '{target}'")]
    UnknownAliasTarget { alias: String, target: String },
    #[error("alias '{0}' shadows an existing category")]
    AliasShadowsCategory(String),
}

/// One category: canonical id, display metadata, content and strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    id: String,
    meta: CategoryMeta,
    tree: ContentTree,
    strategy: StrategyKind,
    merged_synthesized: bool,
}

impl CategoryEntry {
    fn from_data(data: CategoryData) -> Result<Self, CatalogError> {
        if data.id.is_empty() {
            return Err(CatalogError::EmptyCategoryId);
        }
        let mut tree = data.tree();
        let empty_key = tree
            .buckets
            .iter()
            .chain(tree.dedicated.iter())
            .find(|(_, table)| table.contains_key(""));
        if let Some((bucket, _)) = empty_key {
            return Err(CatalogError::EmptyGameKey {
                category: data.id,
                bucket: bucket.clone(),
            });
        }
        let merged_synthesized =
            data.strategy.uses_merged_bucket() && !tree.buckets.contains_key(MERGED_BUCKET);
        if merged_synthesized {
            let merged = tree.merged();
            tree.buckets.insert(MERGED_BUCKET.to_string(), merged);
        }
        Ok(Self {
            id: data.id,
            meta: data.meta,
            tree,
            strategy: data.strategy,
            merged_synthesized,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn meta(&self) -> &CategoryMeta {
        &self.meta
    }

    #[must_use]
    pub const fn tree(&self) -> &ContentTree {
        &self.tree
    }

    #[must_use]
    pub const fn strategy_kind(&self) -> StrategyKind {
        self.strategy
    }

    #[must_use]
    pub fn strategy(&self) -> &'static dyn CategoryStrategy {
        self.strategy.strategy()
    }

    #[must_use]
    pub fn normalize_age(&self, raw: &str) -> String {
        self.strategy().normalize_age(raw)
    }

    /// Normalize `raw_age` and look `key` up with this category's strategy.
    #[must_use]
    pub fn lookup(&self, raw_age: &str, key: &str) -> (String, Option<&GameContent>) {
        self.strategy().resolve(&self.tree, raw_age, key)
    }

    pub fn buckets(&self) -> impl Iterator<Item = &str> {
        self.tree.buckets.keys().map(String::as_str)
    }

    pub fn dedicated_tables(&self) -> impl Iterator<Item = &str> {
        self.tree.dedicated.keys().map(String::as_str)
    }

    /// Dedicated table this category's strategy consults for `raw_age`, when
    /// the catalog actually defines it.
    #[must_use]
    pub fn dedicated_table_for(&self, raw_age: &str) -> Option<&str> {
        let table = self.strategy().dedicated_table(raw_age)?;
        self.tree
            .dedicated
            .get_key_value(table)
            .map(|(name, _)| name.as_str())
    }

    /// Games stored in `bucket`, in key order. Dedicated tables are not included.
    pub fn games_in<'a>(
        &'a self,
        bucket: &str,
    ) -> impl Iterator<Item = (&'a str, &'a GameContent)> + use<'a> {
        table_games(self.tree.bucket(bucket))
    }

    /// Games stored in the dedicated `table`, in key order.
    pub fn dedicated_games<'a>(
        &'a self,
        table: &str,
    ) -> impl Iterator<Item = (&'a str, &'a GameContent)> + use<'a> {
        table_games(self.tree.dedicated.get(table))
    }

    /// Whether the `all` bucket was built by the registry rather than authored.
    #[must_use]
    pub const fn merged_synthesized(&self) -> bool {
        self.merged_synthesized
    }

    /// Distinct authored game definitions. A synthesized `all` bucket only
    /// repeats other buckets, so it is not counted.
    #[must_use]
    pub fn game_count(&self) -> usize {
        self.tree
            .buckets
            .iter()
            .filter(|(bucket, _)| !(self.merged_synthesized && bucket.as_str() == MERGED_BUCKET))
            .chain(self.tree.dedicated.iter())
            .map(|(_, table)| table.len())
            .sum()
    }
}

fn table_games(table: Option<&GameTable>) -> impl Iterator<Item = (&str, &GameContent)> {
    table
        .into_iter()
        .flat_map(GameTable::iter)
        .map(|(key, content)| (key.as_str(), content))
}

/// Category key to entry. Aliases share their target's entry.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    entries: BTreeMap<String, Arc<CategoryEntry>>,
    aliases: BTreeSet<String>,
}

impl CategoryRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry, aliases included, in one pass.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate or empty category ids, empty game keys,
    /// and aliases that are dangling or collide with a category id.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        let mut entries = BTreeMap::new();
        for category in data.categories {
            let entry = CategoryEntry::from_data(category)?;
            if entries.contains_key(&entry.id) {
                return Err(CatalogError::DuplicateCategory(entry.id));
            }
            entries.insert(entry.id.clone(), Arc::new(entry));
        }

        let mut aliases = BTreeSet::new();
        for (alias, target) in data.aliases {
            if entries.contains_key(&alias) {
                return Err(CatalogError::AliasShadowsCategory(alias));
            }
            let Some(entry) = entries.get(&target).map(Arc::clone) else {
                return Err(CatalogError::UnknownAliasTarget { alias, target });
            };
            entries.insert(alias.clone(), entry);
            aliases.insert(alias);
        }

        Ok(Self { entries, aliases })
    }

    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_data(CatalogData::from_json(json)?)
    }

    /// # Errors
    ///
    /// Returns an error if the loader fails or the loaded catalog is invalid.
    pub fn from_loader<L: CatalogLoader>(loader: &L) -> Result<Self, CatalogError> {
        let data = loader
            .load_catalog()
            .map_err(|err| CatalogError::Load(Box::new(err)))?;
        Self::from_data(data)
    }

    /// # Errors
    ///
    /// Returns an error if the bundled catalog fails validation.
    pub fn load_bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG_DATA)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CategoryEntry> {
        self.entries.get(key).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn is_alias(&self, key: &str) -> bool {
        self.aliases.contains(key)
    }

    /// Canonical entries in key order, aliases skipped.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries
            .iter()
            .filter(|(key, _)| !self.aliases.contains(key.as_str()))
            .map(|(_, entry)| entry.as_ref())
    }

    /// Every accepted key, aliases included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().filter_map(|alias| {
            self.entries
                .get(alias)
                .map(|entry| (alias.as_str(), entry.id()))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() - self.aliases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide registry built from the bundled catalog.
#[must_use]
pub fn default_registry() -> &'static CategoryRegistry {
    static REGISTRY: OnceLock<CategoryRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        CategoryRegistry::load_bundled().unwrap_or_else(|err| {
            log::error!("bundled catalog failed to load: {err}");
            CategoryRegistry::empty()
        })
    })
}
