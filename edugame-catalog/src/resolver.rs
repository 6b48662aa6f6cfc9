//! Top-level `{category, age group, game id}` resolution.
//!
//! The resolver runs its checks in order: parameters present, category known,
//! age group in the global acceptance set. Only then does it hand over to the
//! category's strategy for normalization and lookup. Every outcome is a
//! [`Resolution`] variant; nothing here panics or returns `Err` for a miss.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::age::is_accepted_age_group;
use crate::data::{CategoryMeta, GameContent};
use crate::registry::{CategoryRegistry, default_registry};

/// Inbound request, typically lifted from a URL path.
///
/// Absent and empty fields are treated alike. `context_hint` is forwarded to
/// the resolved game untouched; content that shares a game id with another
/// entry uses it to tell the two apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_hint: Option<String>,
}

impl ResolveRequest {
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        age_group: impl Into<String>,
        game_id: impl Into<String>,
    ) -> Self {
        Self {
            category: Some(category.into()),
            age_group: Some(age_group.into()),
            game_id: Some(game_id.into()),
            context_hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.context_hint = Some(hint.into());
        self
    }
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedGame<'a> {
    /// Canonical category id; aliases resolve to their target's id.
    pub category: &'a str,
    /// Bucket the category's normalizer produced.
    pub bucket: String,
    pub content: &'a GameContent,
    pub meta: &'a CategoryMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_hint: Option<String>,
}

/// Every way a resolution can end.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Resolution<'a> {
    MissingParameters,
    UnknownCategory {
        category: String,
    },
    InvalidAgeGroup {
        age_group: String,
    },
    /// `category` and `bucket` are canonical, so an alias and its target
    /// fail identically.
    GameNotFound {
        category: String,
        bucket: String,
        game_id: String,
    },
    Found(ResolvedGame<'a>),
}

/// Fieldless view of [`Resolution`], handy for comparing and counting outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionKind {
    MissingParameters,
    UnknownCategory,
    InvalidAgeGroup,
    GameNotFound,
    Found,
}

impl ResolutionKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MissingParameters => "missing-parameters",
            Self::UnknownCategory => "unknown-category",
            Self::InvalidAgeGroup => "invalid-age-group",
            Self::GameNotFound => "game-not-found",
            Self::Found => "found",
        }
    }
}

impl std::fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure outcomes as an error type, for callers that prefer `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("category, age group and game id are all required")]
    MissingParameters,
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("age group '{0}' is not supported")]
    InvalidAgeGroup(String),
    #[error("no game '{game_id}' in category '{category}' for age group '{bucket}'")]
    GameNotFound {
        category: String,
        bucket: String,
        game_id: String,
    },
}

impl<'a> Resolution<'a> {
    pub const fn kind(&self) -> ResolutionKind {
        match self {
            Self::MissingParameters => ResolutionKind::MissingParameters,
            Self::UnknownCategory { .. } => ResolutionKind::UnknownCategory,
            Self::InvalidAgeGroup { .. } => ResolutionKind::InvalidAgeGroup,
            Self::GameNotFound { .. } => ResolutionKind::GameNotFound,
            Self::Found(_) => ResolutionKind::Found,
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[must_use]
    pub const fn found(&self) -> Option<&ResolvedGame<'a>> {
        match self {
            Self::Found(game) => Some(game),
            _ => None,
        }
    }

    /// The matching [`ResolveError`], or `None` for `Found`.
    #[must_use]
    pub fn error(&self) -> Option<ResolveError> {
        match self {
            Self::Found(_) => None,
            Self::MissingParameters => Some(ResolveError::MissingParameters),
            Self::UnknownCategory { category } => {
                Some(ResolveError::UnknownCategory(category.clone()))
            }
            Self::InvalidAgeGroup { age_group } => {
                Some(ResolveError::InvalidAgeGroup(age_group.clone()))
            }
            Self::GameNotFound {
                category,
                bucket,
                game_id,
            } => Some(ResolveError::GameNotFound {
                category: category.clone(),
                bucket: bucket.clone(),
                game_id: game_id.clone(),
            }),
        }
    }

    /// # Errors
    ///
    /// Returns the failure outcome as a [`ResolveError`].
    pub fn into_result(self) -> Result<ResolvedGame<'a>, ResolveError> {
        match self {
            Self::Found(game) => Ok(game),
            Self::MissingParameters => Err(ResolveError::MissingParameters),
            Self::UnknownCategory { category } => Err(ResolveError::UnknownCategory(category)),
            Self::InvalidAgeGroup { age_group } => Err(ResolveError::InvalidAgeGroup(age_group)),
            Self::GameNotFound {
                category,
                bucket,
                game_id,
            } => Err(ResolveError::GameNotFound {
                category,
                bucket,
                game_id,
            }),
        }
    }
}

impl std::fmt::Display for Resolution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found(game) => write!(
                f,
                "{} ({}/{})",
                game.content.title, game.category, game.bucket
            ),
            other => match other.error() {
                Some(err) => write!(f, "{err}"),
                None => Ok(()),
            },
        }
    }
}

/// Entry point consumed by the rendering layer.
#[derive(Debug, Clone, Copy)]
pub struct GameCatalogResolver<'r> {
    registry: &'r CategoryRegistry,
}

impl GameCatalogResolver<'static> {
    /// Resolver over the bundled catalog.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(default_registry())
    }
}

impl<'r> GameCatalogResolver<'r> {
    #[must_use]
    pub const fn new(registry: &'r CategoryRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &'r CategoryRegistry {
        self.registry
    }

    pub fn resolve(&self, category: &str, age_group: &str, game_id: &str) -> Resolution<'r> {
        self.resolve_request(&ResolveRequest::new(category, age_group, game_id))
    }

    pub fn resolve_request(&self, request: &ResolveRequest) -> Resolution<'r> {
        let (Some(category), Some(age_group), Some(game_id)) = (
            present(request.category.as_deref()),
            present(request.age_group.as_deref()),
            present(request.game_id.as_deref()),
        ) else {
            log::debug!("resolve rejected, missing parameters: {request:?}");
            return Resolution::MissingParameters;
        };
        log::debug!("resolving category={category} age_group={age_group} game_id={game_id}");

        let registry: &'r CategoryRegistry = self.registry;
        let Some(entry) = registry.get(category) else {
            log::debug!("unknown category {category:?}");
            return Resolution::UnknownCategory {
                category: category.to_string(),
            };
        };
        if !is_accepted_age_group(age_group) {
            log::debug!("age group {age_group:?} outside the accepted set");
            return Resolution::InvalidAgeGroup {
                age_group: age_group.to_string(),
            };
        }

        let (bucket, content) = entry.lookup(age_group, game_id);
        match content {
            Some(content) => Resolution::Found(ResolvedGame {
                category: entry.id(),
                bucket,
                content,
                meta: entry.meta(),
                context_hint: request.context_hint.clone(),
            }),
            None => {
                log::debug!(
                    "no game {game_id:?} in {} bucket {bucket:?} ({} strategy)",
                    entry.id(),
                    entry.strategy_kind()
                );
                Resolution::GameNotFound {
                    category: entry.id().to_string(),
                    bucket,
                    game_id: game_id.to_string(),
                }
            }
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Resolve against the bundled catalog.
pub fn resolve(category: &str, age_group: &str, game_id: &str) -> Resolution<'static> {
    GameCatalogResolver::bundled().resolve(category, age_group, game_id)
}
