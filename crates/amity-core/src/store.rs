//! # Relationship Store
//!
//! This module defines the `RelationshipStore` trait — the narrow contract
//! the engine consumes for member persistence and candidate prefetch — and
//! the in-memory `MemberGraph` implementation.
//!
//! All data structures use `BTreeMap` for deterministic ordering.

use crate::primitives::{MAX_INTEREST_LENGTH, MAX_INTERESTS, MAX_NAME_LENGTH};
use crate::{AmityError, Member, MemberId};
use std::collections::BTreeMap;

// =============================================================================
// RELATIONSHIP STORE TRAIT
// =============================================================================

/// The RelationshipStore trait defines the storage operations the engine
/// consumes.
///
/// Every write must surface as fully applied or fully failed — no partial
/// writes may become visible. `save_pair` is the transactional boundary for
/// mutations that touch two member records at once.
///
/// All fallible operations return `Result<T, AmityError>` to support both
/// in-memory and persistent storage backends uniformly.
pub trait RelationshipStore {
    /// Fetch a member by id. Returns owned data for storage compatibility.
    fn get_member(&self, id: MemberId) -> Result<Option<Member>, AmityError>;

    /// Insert or replace a single member record.
    fn save_member(&mut self, member: Member) -> Result<(), AmityError>;

    /// Insert or replace two member records as a single logical unit.
    ///
    /// Both records commit together or not at all. Relationship mutations
    /// touch edge state on two entities and rely on this boundary so no
    /// observer sees a half-applied change.
    fn save_pair(&mut self, first: Member, second: Member) -> Result<(), AmityError>;

    /// Candidate prefetch for the recommendation engine.
    ///
    /// Returns up to `limit` members ordered by descending shared-interest
    /// count with the given member, ties broken by ascending id. Members with
    /// zero overlap are included (they remain candidates for the popularity
    /// fallback); the member itself is excluded.
    fn find_members_by_shared_interest(
        &self,
        id: MemberId,
        limit: usize,
    ) -> Result<Vec<Member>, AmityError>;

    /// Total number of member records.
    fn member_count(&self) -> Result<usize, AmityError>;
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate a member record against the input limits before it is saved.
///
/// Rejects oversized names, oversized interest tags, too many tags, and any
/// self-edge in the four relationship sets.
pub fn validate_member(member: &Member) -> Result<(), AmityError> {
    if member.name.len() > MAX_NAME_LENGTH {
        return Err(AmityError::InvalidMember(format!(
            "name exceeds {MAX_NAME_LENGTH} bytes"
        )));
    }
    if member.interests.len() > MAX_INTERESTS {
        return Err(AmityError::InvalidMember(format!(
            "more than {MAX_INTERESTS} interest tags"
        )));
    }
    if member
        .interests
        .iter()
        .any(|tag| tag.len() > MAX_INTEREST_LENGTH)
    {
        return Err(AmityError::InvalidMember(format!(
            "interest tag exceeds {MAX_INTEREST_LENGTH} bytes"
        )));
    }
    if member.has_edge_to(member.id) {
        return Err(AmityError::InvalidMember(format!(
            "member {} holds a self-edge",
            member.id
        )));
    }
    Ok(())
}

/// Rank members by shared-interest overlap with a subject.
///
/// Shared ordering logic for all store backends: overlap descending, then
/// id ascending. Zero-overlap members are kept.
pub(crate) fn rank_by_shared_interest(
    subject: &Member,
    candidates: impl Iterator<Item = Member>,
    limit: usize,
) -> Vec<Member> {
    let mut ranked: Vec<(usize, Member)> = candidates
        .filter(|m| m.id != subject.id)
        .map(|m| (subject.shared_interest_count(&m), m))
        .collect();

    ranked.sort_by(|(overlap_a, a), (overlap_b, b)| {
        overlap_b.cmp(overlap_a).then(a.id.cmp(&b.id))
    });
    ranked.truncate(limit);
    ranked.into_iter().map(|(_, m)| m).collect()
}

// =============================================================================
// IN-MEMORY MEMBER GRAPH
// =============================================================================

/// The in-memory store backend.
///
/// Uses `BTreeMap` exclusively for deterministic ordering.
/// No `HashMap` allowed.
#[derive(Debug, Clone, Default)]
pub struct MemberGraph {
    /// Member storage: MemberId -> Member
    members: BTreeMap<MemberId, Member>,
}

impl MemberGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RelationshipStore for MemberGraph {
    fn get_member(&self, id: MemberId) -> Result<Option<Member>, AmityError> {
        Ok(self.members.get(&id).cloned())
    }

    fn save_member(&mut self, member: Member) -> Result<(), AmityError> {
        validate_member(&member)?;
        self.members.insert(member.id, member);
        Ok(())
    }

    fn save_pair(&mut self, first: Member, second: Member) -> Result<(), AmityError> {
        // Validate both before touching the map so a failure leaves the
        // graph untouched.
        validate_member(&first)?;
        validate_member(&second)?;
        self.members.insert(first.id, first);
        self.members.insert(second.id, second);
        Ok(())
    }

    fn find_members_by_shared_interest(
        &self,
        id: MemberId,
        limit: usize,
    ) -> Result<Vec<Member>, AmityError> {
        let subject = self
            .members
            .get(&id)
            .ok_or(AmityError::MemberNotFound(id))?;

        Ok(rank_by_shared_interest(
            subject,
            self.members.values().cloned(),
            limit,
        ))
    }

    fn member_count(&self) -> Result<usize, AmityError> {
        Ok(self.members.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================
