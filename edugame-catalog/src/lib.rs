//! Edugame Catalog
//!
//! Resolves a `{category, age group, game id}` triple to the content
//! definition the rendering layer should show. The crate owns the category
//! registry, the per-category age normalizers and lookup strategies, and
//! the bundled catalog data. It knows nothing about rendering.

pub mod age;
pub mod constants;
pub mod data;
pub mod lookup;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use age::{
    Normalizer, is_accepted_age_group, is_kids_family, is_teens_family, normalize_default,
    normalize_finance, normalize_sustainability,
};
pub use data::{CatalogData, CategoryData, CategoryMeta, ContentTree, GameContent, GameTable};
pub use lookup::{
    CategoryStrategy, DefaultStrategy, FinanceStrategy, StrategyKind, SustainabilityStrategy,
};
pub use registry::{CatalogError, CategoryEntry, CategoryRegistry, default_registry};
pub use resolver::{
    GameCatalogResolver, Resolution, ResolutionKind, ResolveError, ResolveRequest, ResolvedGame,
    resolve,
};

/// Source of raw catalog data for [`CategoryRegistry::from_loader`].
///
/// The library ships [`StaticCatalogLoader`] for the bundled JSON; the
/// `edugame` binary adds a file-backed loader for `--catalog`.
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the full catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog data cannot be read or parsed.
    fn load_catalog(&self) -> Result<CatalogData, Self::Error>;
}

/// Loader backed by the catalog compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalogLoader;

impl CatalogLoader for StaticCatalogLoader {
    type Error = serde_json::Error;

    fn load_catalog(&self) -> Result<CatalogData, Self::Error> {
        CatalogData::from_json(registry::bundled_catalog_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Default)]
    struct FixtureLoader {
        data: CatalogData,
    }

    impl CatalogLoader for FixtureLoader {
        type Error = Infallible;

        fn load_catalog(&self) -> Result<CatalogData, Self::Error> {
            Ok(self.data.clone())
        }
    }

    #[derive(Debug)]
    struct BrokenLoader;

    #[derive(Debug, thiserror::Error)]
    #[error("catalog source offline")]
    struct Offline;

    impl CatalogLoader for BrokenLoader {
        type Error = Offline;

        fn load_catalog(&self) -> Result<CatalogData, Self::Error> {
            Err(Offline)
        }
    }

    #[test]
    fn registry_builds_from_any_loader() {
        let empty = CategoryRegistry::from_loader(&FixtureLoader::default()).unwrap();
        assert!(empty.is_empty());

        let bundled = CategoryRegistry::from_loader(&StaticCatalogLoader).unwrap();
        assert_eq!(bundled.len(), default_registry().len());
    }

    #[test]
    fn loader_failures_are_wrapped() {
        let err = CategoryRegistry::from_loader(&BrokenLoader).unwrap_err();
        assert!(matches!(err, CatalogError::Load(_)));
        assert_eq!(
            err.to_string(),
            "failed to load catalog data: catalog source offline"
        );
    }

    #[test]
    fn bundled_resolver_answers_free_function() {
        let via_fn = resolve("finance", "adults", "income-vs-expense-reality");
        let via_resolver =
            GameCatalogResolver::bundled().resolve("finance", "adults", "income-vs-expense-reality");
        assert!(via_fn.is_found());
        assert_eq!(via_fn, via_resolver);
    }
}
