//! Age-group normalization.
//!
//! Each category indexes its content tree with its own bucket names, so there
//! is no single canonical vocabulary. Every function here maps a raw token to
//! the bucket one family of categories uses, is total, and returns unknown
//! tokens unchanged so the following lookup misses predictably.

use crate::constants::{
    ACCEPTED_AGE_GROUPS, AGE_KID, AGE_KIDS, AGE_TEEN, AGE_TEENS, AGE_YOUNG_ADULT, KIDS_FAMILY,
    TEENS_FAMILY,
};

/// Signature shared by every normalizer.
pub type Normalizer = fn(&str) -> String;

/// Policy used by most categories: `teens` and `young-adult` collapse to `teen`.
#[must_use]
pub fn normalize_default(raw: &str) -> String {
    match raw {
        AGE_TEENS | AGE_YOUNG_ADULT => AGE_TEEN.to_string(),
        other => other.to_string(),
    }
}

/// Finance keeps `young-adult` as its own bucket and only folds `teens`.
#[must_use]
pub fn normalize_finance(raw: &str) -> String {
    match raw {
        AGE_TEENS | AGE_TEEN => AGE_TEEN.to_string(),
        AGE_YOUNG_ADULT => AGE_YOUNG_ADULT.to_string(),
        other => other.to_string(),
    }
}

/// Sustainability uses plural buckets (`kids`, `teens`) and lowercases input.
#[must_use]
pub fn normalize_sustainability(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    match lowered.as_str() {
        AGE_YOUNG_ADULT => AGE_TEENS.to_string(),
        AGE_KID => AGE_KIDS.to_string(),
        _ => lowered,
    }
}

/// Whether `raw` is one of the tokens the resolver lets through.
#[must_use]
pub fn is_accepted_age_group(raw: &str) -> bool {
    ACCEPTED_AGE_GROUPS.contains(&raw)
}

#[must_use]
pub fn is_kids_family(raw: &str) -> bool {
    KIDS_FAMILY.contains(&raw)
}

#[must_use]
pub fn is_teens_family(raw: &str) -> bool {
    TEENS_FAMILY.contains(&raw)
}
