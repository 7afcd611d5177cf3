//! # Core Type Definitions
//!
//! This module contains all core types for the Amity relationship engine:
//! - Member identity (`MemberId`)
//! - The member record and its four edge sets (`Member`)
//! - The derived pairwise status (`RelationshipStatus`)
//! - Error types (`AmityError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Keep every edge set as a `BTreeSet` so iteration order is stable

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// =============================================================================
// MEMBER IDENTITY
// =============================================================================

/// Unique identifier for a member of the network.
///
/// Opaque to the engine; assigned by the registration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub u64);

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// MEMBER
// =============================================================================

/// A member record: identity, profile, and the four relationship edge sets.
///
/// Edge-set invariants (maintained by the state machine, checked by tests):
/// - `friends` is symmetric across members
/// - `sent_requests` and `received_requests` are inverse views of the same
///   directed edge
/// - a friend edge and a request edge never coexist for the same pair
/// - `blocked` is directed; creating it purges friend/request edges first
/// - no set ever contains the member's own id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's unique identifier.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Free-text interest tags, deduplicated and deterministically ordered.
    pub interests: BTreeSet<String>,
    /// Symmetric friendship edges.
    pub friends: BTreeSet<MemberId>,
    /// Outgoing pending friend requests.
    pub sent_requests: BTreeSet<MemberId>,
    /// Incoming pending friend requests.
    pub received_requests: BTreeSet<MemberId>,
    /// Members this member has blocked (directed).
    pub blocked: BTreeSet<MemberId>,
}

impl Member {
    /// Create a new member with no relationships.
    #[must_use]
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            interests: BTreeSet::new(),
            friends: BTreeSet::new(),
            sent_requests: BTreeSet::new(),
            received_requests: BTreeSet::new(),
            blocked: BTreeSet::new(),
        }
    }

    /// Create a new member with interest tags.
    #[must_use]
    pub fn with_interests<I, T>(id: MemberId, name: impl Into<String>, interests: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut member = Self::new(id, name);
        member.interests = interests.into_iter().map(Into::into).collect();
        member
    }

    /// Number of interest tags shared with another member.
    #[must_use]
    pub fn shared_interest_count(&self, other: &Self) -> usize {
        self.interests.intersection(&other.interests).count()
    }

    /// Check whether any relationship edge (friend, request, block) exists
    /// toward the given member.
    #[must_use]
    pub fn has_edge_to(&self, other: MemberId) -> bool {
        self.friends.contains(&other)
            || self.sent_requests.contains(&other)
            || self.received_requests.contains(&other)
            || self.blocked.contains(&other)
    }
}

// =============================================================================
// RELATIONSHIP STATUS
// =============================================================================

/// Derived pairwise status for an ordered (viewer, subject) pair.
///
/// This is a computed projection over the viewer's edge sets and is never
/// persisted. Blocking is reported out-of-band via `is_blocked` because a
/// block can coexist with no other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipStatus {
    /// No friend or request edge between the pair.
    None,
    /// The pair holds a symmetric friend edge.
    Friend,
    /// The viewer has a pending request toward the subject.
    RequestSent,
    /// The subject has a pending request toward the viewer.
    RequestReceived,
}

impl std::fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "NONE",
            Self::Friend => "FRIEND",
            Self::RequestSent => "REQUEST_SENT",
            Self::RequestReceived => "REQUEST_RECEIVED",
        };
        write!(f, "{s}")
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors reported by the Amity engine.
///
/// Every precondition failure is its own variant so callers can target the
/// exact condition. All variants are recoverable by the caller; the engine
/// never retries internally and never panics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmityError {
    /// The member id does not resolve in the store.
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    /// An operation referenced the same member on both sides.
    #[error("Operation not allowed on self: {0}")]
    SelfReferenceNotAllowed(MemberId),

    /// The pair already holds a friend edge.
    #[error("Members {0} and {1} are already friends")]
    AlreadyFriends(MemberId, MemberId),

    /// A request in the same direction is already pending.
    #[error("Friend request {0} -> {1} is already pending")]
    DuplicateRequest(MemberId, MemberId),

    /// A request in the opposite direction is already pending.
    #[error("Reciprocal friend request {1} -> {0} is already pending")]
    ReciprocalRequestExists(MemberId, MemberId),

    /// No pending request exists in the given direction.
    #[error("No pending friend request {0} -> {1}")]
    RequestNotFound(MemberId, MemberId),

    /// An active block (in either direction) forbids the operation.
    #[error("Operation between {0} and {1} is blocked")]
    Blocked(MemberId, MemberId),

    /// A member record failed validation limits.
    #[error("Invalid member record: {0}")]
    InvalidMember(String),

    /// A serialization or deserialization error occurred in the store.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred in the store.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
