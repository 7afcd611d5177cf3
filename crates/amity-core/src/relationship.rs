//! # Relationship State Machine
//!
//! Enforces legal transitions among relationship states for an ordered pair
//! of members. This is the single source of truth for "can A do X to B
//! right now."
//!
//! States per ordered pair: none, request pending (either direction),
//! friends — plus an orthogonal directed block flag. No state is terminal;
//! every state is revisitable.
//!
//! All mutations load both affected members, re-check preconditions against
//! the loaded snapshot, and commit through `RelationshipStore::save_pair` so
//! the two-entity change lands as a single logical unit.
//!
//! ## Idempotence policies
//!
//! - `reject_request` succeeds silently when the request is already absent:
//!   rejecting a stale request should not surface an error to the rejecting
//!   party.
//! - `remove_friend` is a no-op when no friendship exists.
//! - `block` and `unblock` succeed silently when the block edge is already
//!   present / already absent.
//! - `send_request` and `accept_request` are strict and report the exact
//!   failed precondition.

use crate::store::RelationshipStore;
use crate::{AmityError, Member, MemberId, RelationshipStatus};

/// The RelationshipStateMachine consolidates all pairwise relationship
/// mutations and reads.
pub struct RelationshipStateMachine;

impl RelationshipStateMachine {
    /// Load both members of a pair, failing with `MemberNotFound` for
    /// whichever id does not resolve.
    fn load_pair<S: RelationshipStore>(
        store: &S,
        a: MemberId,
        b: MemberId,
    ) -> Result<(Member, Member), AmityError> {
        let first = store
            .get_member(a)?
            .ok_or(AmityError::MemberNotFound(a))?;
        let second = store
            .get_member(b)?
            .ok_or(AmityError::MemberNotFound(b))?;
        Ok((first, second))
    }

    /// Send a friend request from one member to another.
    ///
    /// Creates the directed request edge (both directional views). Fails if
    /// the pair is already friends, a request is already pending in either
    /// direction, or either direction holds an active block.
    pub fn send_request<S: RelationshipStore>(
        store: &mut S,
        from: MemberId,
        to: MemberId,
    ) -> Result<(), AmityError> {
        if from == to {
            return Err(AmityError::SelfReferenceNotAllowed(from));
        }
        let (mut sender, mut receiver) = Self::load_pair(store, from, to)?;

        if sender.friends.contains(&to) {
            return Err(AmityError::AlreadyFriends(from, to));
        }
        if sender.sent_requests.contains(&to) {
            return Err(AmityError::DuplicateRequest(from, to));
        }
        if sender.received_requests.contains(&to) {
            return Err(AmityError::ReciprocalRequestExists(from, to));
        }
        if sender.blocked.contains(&to) || receiver.blocked.contains(&from) {
            return Err(AmityError::Blocked(from, to));
        }

        sender.sent_requests.insert(to);
        receiver.received_requests.insert(from);
        store.save_pair(sender, receiver)
    }

    /// Accept a pending friend request.
    ///
    /// `from` is the original sender, `to` the accepting receiver. Atomically
    /// removes the request edge (both directional views) and installs the
    /// symmetric friend edge on both members.
    pub fn accept_request<S: RelationshipStore>(
        store: &mut S,
        from: MemberId,
        to: MemberId,
    ) -> Result<(), AmityError> {
        if from == to {
            return Err(AmityError::SelfReferenceNotAllowed(from));
        }
        let (mut sender, mut receiver) = Self::load_pair(store, from, to)?;

        if !sender.sent_requests.contains(&to) || !receiver.received_requests.contains(&from) {
            return Err(AmityError::RequestNotFound(from, to));
        }

        sender.sent_requests.remove(&to);
        receiver.received_requests.remove(&from);
        sender.friends.insert(to);
        receiver.friends.insert(from);
        store.save_pair(sender, receiver)
    }

    /// Reject a pending friend request.
    ///
    /// Removes the request edge only; no friend edge is created. Succeeds
    /// silently when the request is already absent.
    pub fn reject_request<S: RelationshipStore>(
        store: &mut S,
        from: MemberId,
        to: MemberId,
    ) -> Result<(), AmityError> {
        if from == to {
            return Err(AmityError::SelfReferenceNotAllowed(from));
        }
        let (mut sender, mut receiver) = Self::load_pair(store, from, to)?;

        sender.sent_requests.remove(&to);
        receiver.received_requests.remove(&from);
        store.save_pair(sender, receiver)
    }

    /// Remove a friendship symmetrically.
    ///
    /// A no-op when no friend edge exists.
    pub fn remove_friend<S: RelationshipStore>(
        store: &mut S,
        a: MemberId,
        b: MemberId,
    ) -> Result<(), AmityError> {
        if a == b {
            return Err(AmityError::SelfReferenceNotAllowed(a));
        }
        let (mut first, mut second) = Self::load_pair(store, a, b)?;

        first.friends.remove(&b);
        second.friends.remove(&a);
        store.save_pair(first, second)
    }

    /// Block a member.
    ///
    /// Purges any friend edge and any request edge (both directions) between
    /// the pair, then records the directed block edge. Idempotent: blocking
    /// an already-blocked member succeeds silently.
    pub fn block<S: RelationshipStore>(
        store: &mut S,
        blocker: MemberId,
        blocked: MemberId,
    ) -> Result<(), AmityError> {
        if blocker == blocked {
            return Err(AmityError::SelfReferenceNotAllowed(blocker));
        }
        let (mut first, mut second) = Self::load_pair(store, blocker, blocked)?;

        first.friends.remove(&blocked);
        second.friends.remove(&blocker);
        first.sent_requests.remove(&blocked);
        first.received_requests.remove(&blocked);
        second.sent_requests.remove(&blocker);
        second.received_requests.remove(&blocker);
        first.blocked.insert(blocked);

        store.save_pair(first, second)
    }

    /// Remove the directed block edge only.
    ///
    /// Does not restore any prior friendship or request state. Idempotent
    /// once both ids resolve; only the blocker's record is written.
    pub fn unblock<S: RelationshipStore>(
        store: &mut S,
        blocker: MemberId,
        blocked: MemberId,
    ) -> Result<(), AmityError> {
        let (mut member, _) = Self::load_pair(store, blocker, blocked)?;

        member.blocked.remove(&blocked);
        store.save_member(member)
    }

    /// Derive the relationship status for an ordered (viewer, subject) pair.
    ///
    /// Pure read over the viewer's edge sets; does not consult block state.
    pub fn status<S: RelationshipStore>(
        store: &S,
        viewer: MemberId,
        subject: MemberId,
    ) -> Result<RelationshipStatus, AmityError> {
        let (member, _) = Self::load_pair(store, viewer, subject)?;

        let status = if member.friends.contains(&subject) {
            RelationshipStatus::Friend
        } else if member.sent_requests.contains(&subject) {
            RelationshipStatus::RequestSent
        } else if member.received_requests.contains(&subject) {
            RelationshipStatus::RequestReceived
        } else {
            RelationshipStatus::None
        };
        Ok(status)
    }

    /// Pure read of the directed block edge from `a` to `b`.
    ///
    /// Callers needing symmetric exclusion must check both directions.
    pub fn is_blocked<S: RelationshipStore>(
        store: &S,
        a: MemberId,
        b: MemberId,
    ) -> Result<bool, AmityError> {
        let (member, _) = Self::load_pair(store, a, b)?;
        Ok(member.blocked.contains(&b))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemberGraph;

    fn graph_with(ids: &[u64]) -> MemberGraph {
        let mut graph = MemberGraph::new();
        for &id in ids {
            graph
                .save_member(Member::new(MemberId(id), format!("m{id}")))
                .expect("save");
        }
        graph
    }

    fn member(graph: &MemberGraph, id: u64) -> Member {
        graph
            .get_member(MemberId(id))
            .expect("get")
            .expect("member exists")
    }

    #[test]
    fn send_request_creates_both_views() {
        let mut graph = graph_with(&[1, 2]);

        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");

        assert!(member(&graph, 1).sent_requests.contains(&MemberId(2)));
        assert!(member(&graph, 2).received_requests.contains(&MemberId(1)));
    }

    #[test]
    fn send_request_to_self_fails() {
        let mut graph = graph_with(&[1]);
        let result = RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(1));
        assert_eq!(result, Err(AmityError::SelfReferenceNotAllowed(MemberId(1))));
    }

    #[test]
    fn send_request_unknown_member_fails() {
        let mut graph = graph_with(&[1]);
        let result = RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(9));
        assert_eq!(result, Err(AmityError::MemberNotFound(MemberId(9))));
    }

    #[test]
    fn duplicate_request_rejected() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");

        let result = RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2));
        assert_eq!(
            result,
            Err(AmityError::DuplicateRequest(MemberId(1), MemberId(2)))
        );
    }

    #[test]
    fn reciprocal_request_rejected() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");

        let result = RelationshipStateMachine::send_request(&mut graph, MemberId(2), MemberId(1));
        assert_eq!(
            result,
            Err(AmityError::ReciprocalRequestExists(MemberId(2), MemberId(1)))
        );
    }

    #[test]
    fn request_to_friend_rejected() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");
        RelationshipStateMachine::accept_request(&mut graph, MemberId(1), MemberId(2))
            .expect("accept");

        let result = RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2));
        assert_eq!(
            result,
            Err(AmityError::AlreadyFriends(MemberId(1), MemberId(2)))
        );
    }

    #[test]
    fn request_blocked_in_either_direction() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::block(&mut graph, MemberId(2), MemberId(1)).expect("block");

        // Receiver has blocked the sender.
        let result = RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2));
        assert_eq!(result, Err(AmityError::Blocked(MemberId(1), MemberId(2))));

        // Sender has blocked the receiver.
        let result = RelationshipStateMachine::send_request(&mut graph, MemberId(2), MemberId(1));
        assert_eq!(result, Err(AmityError::Blocked(MemberId(2), MemberId(1))));
    }

    #[test]
    fn accept_round_trip_yields_friend_status_both_ways() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");
        RelationshipStateMachine::accept_request(&mut graph, MemberId(1), MemberId(2))
            .expect("accept");

        assert_eq!(
            RelationshipStateMachine::status(&graph, MemberId(1), MemberId(2)).expect("status"),
            RelationshipStatus::Friend
        );
        assert_eq!(
            RelationshipStateMachine::status(&graph, MemberId(2), MemberId(1)).expect("status"),
            RelationshipStatus::Friend
        );

        // Request views are cleared as a side effect of the accept.
        assert!(member(&graph, 1).sent_requests.is_empty());
        assert!(member(&graph, 2).received_requests.is_empty());
    }

    #[test]
    fn accept_without_request_fails() {
        let mut graph = graph_with(&[1, 2]);
        let result = RelationshipStateMachine::accept_request(&mut graph, MemberId(1), MemberId(2));
        assert_eq!(
            result,
            Err(AmityError::RequestNotFound(MemberId(1), MemberId(2)))
        );
    }

    #[test]
    fn accept_wrong_direction_fails() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");

        // The request runs 1 -> 2; accepting 2 -> 1 must not match it.
        let result = RelationshipStateMachine::accept_request(&mut graph, MemberId(2), MemberId(1));
        assert_eq!(
            result,
            Err(AmityError::RequestNotFound(MemberId(2), MemberId(1)))
        );
    }

    #[test]
    fn reject_clears_request_without_friendship() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");
        RelationshipStateMachine::reject_request(&mut graph, MemberId(1), MemberId(2))
            .expect("reject");

        assert!(member(&graph, 1).sent_requests.is_empty());
        assert!(member(&graph, 2).received_requests.is_empty());
        assert!(member(&graph, 1).friends.is_empty());
    }

    #[test]
    fn reject_stale_request_is_silent() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::reject_request(&mut graph, MemberId(1), MemberId(2))
            .expect("reject is idempotent-tolerant");
    }

    #[test]
    fn remove_friend_is_symmetric() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");
        RelationshipStateMachine::accept_request(&mut graph, MemberId(1), MemberId(2))
            .expect("accept");
        RelationshipStateMachine::remove_friend(&mut graph, MemberId(2), MemberId(1))
            .expect("remove");

        assert!(member(&graph, 1).friends.is_empty());
        assert!(member(&graph, 2).friends.is_empty());
    }

    #[test]
    fn remove_missing_friend_is_noop() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::remove_friend(&mut graph, MemberId(1), MemberId(2))
            .expect("remove is idempotent-tolerant");
    }

    #[test]
    fn block_purges_friendship_and_requests() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");
        RelationshipStateMachine::accept_request(&mut graph, MemberId(1), MemberId(2))
            .expect("accept");
        RelationshipStateMachine::block(&mut graph, MemberId(1), MemberId(2)).expect("block");

        let a = member(&graph, 1);
        let b = member(&graph, 2);
        assert!(a.friends.is_empty());
        assert!(b.friends.is_empty());
        assert!(a.blocked.contains(&MemberId(2)));
        // Block is directed.
        assert!(!b.blocked.contains(&MemberId(1)));
    }

    #[test]
    fn block_is_idempotent() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::block(&mut graph, MemberId(1), MemberId(2)).expect("block");
        let snapshot = (member(&graph, 1), member(&graph, 2));

        RelationshipStateMachine::block(&mut graph, MemberId(1), MemberId(2)).expect("reblock");
        assert_eq!((member(&graph, 1), member(&graph, 2)), snapshot);
    }

    #[test]
    fn unblock_restores_nothing() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");
        RelationshipStateMachine::accept_request(&mut graph, MemberId(1), MemberId(2))
            .expect("accept");
        RelationshipStateMachine::block(&mut graph, MemberId(1), MemberId(2)).expect("block");
        RelationshipStateMachine::unblock(&mut graph, MemberId(1), MemberId(2)).expect("unblock");

        assert!(!RelationshipStateMachine::is_blocked(&graph, MemberId(1), MemberId(2))
            .expect("is_blocked"));
        // The purged friendship stays gone.
        assert!(member(&graph, 1).friends.is_empty());
        assert_eq!(
            RelationshipStateMachine::status(&graph, MemberId(1), MemberId(2)).expect("status"),
            RelationshipStatus::None
        );
    }

    #[test]
    fn unblock_unknown_target_fails() {
        let mut graph = graph_with(&[1]);
        let result = RelationshipStateMachine::unblock(&mut graph, MemberId(1), MemberId(99));
        assert_eq!(result, Err(AmityError::MemberNotFound(MemberId(99))));
    }

    #[test]
    fn status_unknown_member_fails_either_side() {
        let graph = graph_with(&[1]);

        let result = RelationshipStateMachine::status(&graph, MemberId(1), MemberId(99));
        assert_eq!(result, Err(AmityError::MemberNotFound(MemberId(99))));

        let result = RelationshipStateMachine::status(&graph, MemberId(99), MemberId(1));
        assert_eq!(result, Err(AmityError::MemberNotFound(MemberId(99))));
    }

    #[test]
    fn is_blocked_unknown_target_fails() {
        let graph = graph_with(&[1]);
        let result = RelationshipStateMachine::is_blocked(&graph, MemberId(1), MemberId(99));
        assert_eq!(result, Err(AmityError::MemberNotFound(MemberId(99))));
    }

    #[test]
    fn status_reports_request_direction() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::send_request(&mut graph, MemberId(1), MemberId(2))
            .expect("send");

        assert_eq!(
            RelationshipStateMachine::status(&graph, MemberId(1), MemberId(2)).expect("status"),
            RelationshipStatus::RequestSent
        );
        assert_eq!(
            RelationshipStateMachine::status(&graph, MemberId(2), MemberId(1)).expect("status"),
            RelationshipStatus::RequestReceived
        );
    }

    #[test]
    fn status_ignores_block_state() {
        let mut graph = graph_with(&[1, 2]);
        RelationshipStateMachine::block(&mut graph, MemberId(1), MemberId(2)).expect("block");

        assert_eq!(
            RelationshipStateMachine::status(&graph, MemberId(1), MemberId(2)).expect("status"),
            RelationshipStatus::None
        );
        assert!(RelationshipStateMachine::is_blocked(&graph, MemberId(1), MemberId(2))
            .expect("is_blocked"));
    }
}
