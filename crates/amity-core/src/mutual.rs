//! # Mutual Connection Counter
//!
//! Pure intersection count over two members' friend sets. Used by both the
//! caller-facing read surface and the recommendation engine.

use crate::store::RelationshipStore;
use crate::{AmityError, Member, MemberId};

/// The MutualConnectionCounter computes the number of friends two members
/// have in common.
pub struct MutualConnectionCounter;

impl MutualConnectionCounter {
    /// Count mutual friends between two member records.
    ///
    /// Symmetric, no side effects. The two members themselves never count,
    /// even if a self-edge were ever present in a stored record.
    #[must_use]
    pub fn count_between(a: &Member, b: &Member) -> usize {
        a.friends
            .intersection(&b.friends)
            .filter(|&&id| id != a.id && id != b.id)
            .count()
    }

    /// Count mutual friends by id, resolving both members through the store.
    pub fn count<S: RelationshipStore>(
        store: &S,
        a: MemberId,
        b: MemberId,
    ) -> Result<usize, AmityError> {
        let first = store
            .get_member(a)?
            .ok_or(AmityError::MemberNotFound(a))?;
        let second = store
            .get_member(b)?
            .ok_or(AmityError::MemberNotFound(b))?;
        Ok(Self::count_between(&first, &second))
    }
}

// =============================================================================
// TESTS
// =============================================================================
