//! Shared vocabulary for age-group tokens and catalog layout.
//!
//! Content trees were authored by different teams, so the same age band is
//! spelled several ways. Keeping the spellings here means every normalizer
//! and the resolver's acceptance gate agree on the literal strings.

// Age-group tokens -----------------------------------------------------------
pub const AGE_KID: &str = "kid";
pub const AGE_KIDS: &str = "kids";
pub const AGE_TEEN: &str = "teen";
pub const AGE_TEENS: &str = "teens";
pub const AGE_YOUNG_ADULT: &str = "young-adult";
pub const AGE_ADULT: &str = "adult";
pub const AGE_ADULTS: &str = "adults";

/// Tokens the resolver accepts before any category-specific normalization.
///
/// Matching is exact. `kid` is absent even though the sustainability
/// normalizer understands it.
pub const ACCEPTED_AGE_GROUPS: [&str; 6] = [
    AGE_KIDS,
    AGE_TEEN,
    AGE_TEENS,
    AGE_YOUNG_ADULT,
    AGE_ADULT,
    AGE_ADULTS,
];

/// Raw tokens routed to a category's dedicated kids table.
pub const KIDS_FAMILY: [&str; 2] = [AGE_KIDS, AGE_KID];

/// Raw tokens routed to a category's dedicated teens table.
pub const TEENS_FAMILY: [&str; 3] = [AGE_TEENS, AGE_TEEN, AGE_YOUNG_ADULT];

// Catalog layout -------------------------------------------------------------

/// Bucket holding every game of a category merged across age groups.
pub const MERGED_BUCKET: &str = "all";

/// Dedicated-table key for kids content.
pub const DEDICATED_KIDS: &str = AGE_KIDS;

/// Dedicated-table key for teens content.
pub const DEDICATED_TEENS: &str = AGE_TEENS;
