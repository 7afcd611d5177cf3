//! # Network Façade
//!
//! `Network` wraps a `RelationshipStore` behind a `parking_lot::RwLock` and
//! exposes the caller-facing operation surface: six mutations and three
//! reads, plus the mutual-connection count.
//!
//! ## Concurrency model
//!
//! - Pure reads (`status`, `is_blocked`, `mutual_count`, `recommend`) take
//!   the read lock and run in parallel with each other. A `recommend` result
//!   may be stale by the time it is used; recommendations are advisory.
//! - Mutations take the write lock for their full load-validate-commit span,
//!   so the edge changes on both affected members become visible atomically
//!   and two racing mutations on the same pair serialize. The loser of a
//!   race re-evaluates its preconditions against the winner's committed
//!   state.
//!
//! There is no background work, retry loop, or cancellation surface here;
//! store timeouts are the backend's concern.

use crate::mutual::MutualConnectionCounter;
use crate::recommend::{Recommendation, RecommendationEngine};
use crate::relationship::RelationshipStateMachine;
use crate::store::RelationshipStore;
use crate::{AmityError, Member, MemberId, RelationshipStatus};
use parking_lot::RwLock;

/// Thread-safe handle over a relationship store.
///
/// Share across request handlers as `Arc<Network<S>>`.
#[derive(Debug, Default)]
pub struct Network<S: RelationshipStore> {
    store: RwLock<S>,
}

impl<S: RelationshipStore> Network<S> {
    /// Wrap an existing store.
    pub fn new(store: S) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// Consume the façade and return the inner store.
    pub fn into_inner(self) -> S {
        self.store.into_inner()
    }

    // -------------------------------------------------------------------------
    // REGISTRATION SURFACE (consumed by the external registration layer)
    // -------------------------------------------------------------------------

    /// Insert or replace a member record.
    pub fn save_member(&self, member: Member) -> Result<(), AmityError> {
        self.store.write().save_member(member)
    }

    /// Fetch a member snapshot.
    pub fn get_member(&self, id: MemberId) -> Result<Option<Member>, AmityError> {
        self.store.read().get_member(id)
    }

    /// Total number of member records.
    pub fn member_count(&self) -> Result<usize, AmityError> {
        self.store.read().member_count()
    }

    // -------------------------------------------------------------------------
    // MUTATIONS
    // -------------------------------------------------------------------------

    /// Send a friend request. See `RelationshipStateMachine::send_request`.
    pub fn send_request(&self, from: MemberId, to: MemberId) -> Result<(), AmityError> {
        RelationshipStateMachine::send_request(&mut *self.store.write(), from, to)
    }

    /// Accept a pending friend request.
    pub fn accept_request(&self, from: MemberId, to: MemberId) -> Result<(), AmityError> {
        RelationshipStateMachine::accept_request(&mut *self.store.write(), from, to)
    }

    /// Reject a pending friend request (silent on stale requests).
    pub fn reject_request(&self, from: MemberId, to: MemberId) -> Result<(), AmityError> {
        RelationshipStateMachine::reject_request(&mut *self.store.write(), from, to)
    }

    /// Remove a friendship symmetrically (no-op when absent).
    pub fn remove_friend(&self, a: MemberId, b: MemberId) -> Result<(), AmityError> {
        RelationshipStateMachine::remove_friend(&mut *self.store.write(), a, b)
    }

    /// Block a member, purging any friend or request edges first.
    pub fn block(&self, blocker: MemberId, blocked: MemberId) -> Result<(), AmityError> {
        RelationshipStateMachine::block(&mut *self.store.write(), blocker, blocked)
    }

    /// Remove a directed block edge.
    pub fn unblock(&self, blocker: MemberId, blocked: MemberId) -> Result<(), AmityError> {
        RelationshipStateMachine::unblock(&mut *self.store.write(), blocker, blocked)
    }

    // -------------------------------------------------------------------------
    // READS
    // -------------------------------------------------------------------------

    /// Derived relationship status for an ordered (viewer, subject) pair.
    pub fn status(
        &self,
        viewer: MemberId,
        subject: MemberId,
    ) -> Result<RelationshipStatus, AmityError> {
        RelationshipStateMachine::status(&*self.store.read(), viewer, subject)
    }

    /// Directed block check from `a` to `b`.
    pub fn is_blocked(&self, a: MemberId, b: MemberId) -> Result<bool, AmityError> {
        RelationshipStateMachine::is_blocked(&*self.store.read(), a, b)
    }

    /// Mutual friend count between two members.
    pub fn mutual_count(&self, a: MemberId, b: MemberId) -> Result<usize, AmityError> {
        MutualConnectionCounter::count(&*self.store.read(), a, b)
    }

    /// Ranked friend recommendations for a member.
    pub fn recommend(
        &self,
        member: MemberId,
        limit: usize,
    ) -> Result<Vec<Recommendation>, AmityError> {
        RecommendationEngine::recommend(&*self.store.read(), member, limit)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemberGraph;
    use std::sync::Arc;

    fn network_with(ids: &[u64]) -> Network<MemberGraph> {
        let network = Network::new(MemberGraph::new());
        for &id in ids {
            network
                .save_member(Member::new(MemberId(id), format!("m{id}")))
                .expect("save");
        }
        network
    }

    #[test]
    fn full_lifecycle_through_facade() {
        let network = network_with(&[1, 2]);

        network.send_request(MemberId(1), MemberId(2)).expect("send");
        assert_eq!(
            network.status(MemberId(2), MemberId(1)).expect("status"),
            RelationshipStatus::RequestReceived
        );

        network
            .accept_request(MemberId(1), MemberId(2))
            .expect("accept");
        assert_eq!(
            network.status(MemberId(1), MemberId(2)).expect("status"),
            RelationshipStatus::Friend
        );

        network.remove_friend(MemberId(1), MemberId(2)).expect("remove");
        assert_eq!(
            network.status(MemberId(1), MemberId(2)).expect("status"),
            RelationshipStatus::None
        );
    }

    #[test]
    fn facade_is_shareable_across_threads() {
        let network = Arc::new(network_with(&[1, 2, 3]));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let net = Arc::clone(&network);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let _ = net.status(MemberId(1), MemberId(2));
                        let _ = net.recommend(MemberId(1), 5);
                    }
                })
            })
            .collect();

        network.send_request(MemberId(1), MemberId(2)).expect("send");
        for handle in handles {
            handle.join().expect("reader thread");
        }

        assert_eq!(
            network.status(MemberId(1), MemberId(2)).expect("status"),
            RelationshipStatus::RequestSent
        );
    }

    #[test]
    fn into_inner_returns_store() {
        let network = network_with(&[1]);
        let store = network.into_inner();
        assert_eq!(store.member_count().expect("count"), 1);
    }
}
