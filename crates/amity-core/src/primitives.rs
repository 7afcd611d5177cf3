//! # Scoring Primitives
//!
//! Hardcoded runtime constants for the Amity engine.
//!
//! Recommendation weights are compiled into the binary and immutable at
//! runtime so that a fixed graph snapshot always produces the same ranking.

/// Points per friend of the subject who already counts the candidate as a
/// friend (a two-hop path through the friend graph).
///
/// This is the dominant recommendation signal.
pub const FRIEND_OF_FRIEND_WEIGHT: i64 = 10;

/// Points per mutual friend between subject and candidate.
pub const MUTUAL_FRIEND_WEIGHT: i64 = 5;

/// Points per interest tag shared between subject and candidate.
pub const SHARED_INTEREST_WEIGHT: i64 = 3;

/// Minimum friend count before the popularity fallback applies.
///
/// Candidates untouched by the proximity and interest signals only receive a
/// baseline score when their total friend count exceeds this threshold.
pub const POPULARITY_THRESHOLD: usize = 5;

/// Divisor for the popularity fallback baseline (integer division).
pub const POPULARITY_DIVISOR: i64 = 2;

/// Maximum number of candidates prefetched from the store's shared-interest
/// index per recommendation query.
///
/// All queries must be computationally bounded.
pub const CANDIDATE_PREFETCH: usize = 64;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for a member display name.
///
/// Longer names are rejected on save. This prevents memory exhaustion from
/// malicious or malformed input.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum length for a single interest tag.
pub const MAX_INTEREST_LENGTH: usize = 64;

/// Maximum number of interest tags per member.
pub const MAX_INTERESTS: usize = 100;
