//! # Recommendation Engine
//!
//! Produces a ranked "people you may know" list for a member.
//!
//! Scoring is additive across independent integer signals (see
//! `primitives`): two-hop graph proximity, mutual-friend bonus, shared
//! interests, and a popularity fallback for candidates with no proximity or
//! interest signal. Candidates blocked in either direction, current friends,
//! pending requests, and the subject itself are never eligible.
//!
//! Ranking is deterministic for a fixed graph snapshot: score descending,
//! then candidate id ascending.

use crate::mutual::MutualConnectionCounter;
use crate::primitives::{
    CANDIDATE_PREFETCH, FRIEND_OF_FRIEND_WEIGHT, MUTUAL_FRIEND_WEIGHT, POPULARITY_DIVISOR,
    POPULARITY_THRESHOLD, SHARED_INTEREST_WEIGHT,
};
use crate::store::RelationshipStore;
use crate::{AmityError, Member, MemberId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single ranked recommendation.
///
/// The score is exposed so callers can explain why a candidate ranked where
/// it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The recommended member.
    pub member: MemberId,
    /// Additive signal score; higher ranks first.
    pub score: i64,
}

/// The RecommendationEngine ranks eligible candidates for a member.
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Return up to `limit` candidates ranked by descending score.
    ///
    /// Fails only with `MemberNotFound` for the subject id; every other
    /// input is data already validated to exist. A `limit` of zero returns
    /// an empty result.
    pub fn recommend<S: RelationshipStore>(
        store: &S,
        member: MemberId,
        limit: usize,
    ) -> Result<Vec<Recommendation>, AmityError> {
        let subject = store
            .get_member(member)?
            .ok_or(AmityError::MemberNotFound(member))?;

        if limit == 0 {
            return Ok(Vec::new());
        }

        // Signal 1 groundwork: count two-hop paths through the subject's
        // friends. BTreeMap keeps candidate iteration deterministic.
        let mut two_hop_paths: BTreeMap<MemberId, i64> = BTreeMap::new();
        for &friend_id in &subject.friends {
            let Some(friend) = store.get_member(friend_id)? else {
                continue;
            };
            for &candidate_id in &friend.friends {
                let paths = two_hop_paths.entry(candidate_id).or_insert(0);
                *paths = paths.saturating_add(1);
            }
        }

        // Candidate pool: two-hop neighbors plus the store's shared-interest
        // prefetch (which also feeds the popularity fallback).
        let prefetched = store.find_members_by_shared_interest(member, CANDIDATE_PREFETCH)?;
        let mut records: BTreeMap<MemberId, Member> =
            prefetched.into_iter().map(|m| (m.id, m)).collect();

        let mut pool: BTreeSet<MemberId> = two_hop_paths.keys().copied().collect();
        pool.extend(records.keys().copied());

        let mut ranked: Vec<Recommendation> = Vec::new();
        for candidate_id in pool {
            if !Self::passes_subject_side(&subject, candidate_id) {
                continue;
            }
            let candidate = match records.remove(&candidate_id) {
                Some(c) => c,
                None => match store.get_member(candidate_id)? {
                    Some(c) => c,
                    None => continue,
                },
            };
            // Block effects apply in both directions.
            if candidate.blocked.contains(&member) {
                continue;
            }

            let paths = two_hop_paths.get(&candidate_id).copied().unwrap_or(0);
            let mutual = MutualConnectionCounter::count_between(&subject, &candidate) as i64;
            let overlap = subject.shared_interest_count(&candidate) as i64;

            let mut score = paths
                .saturating_mul(FRIEND_OF_FRIEND_WEIGHT)
                .saturating_add(mutual.saturating_mul(MUTUAL_FRIEND_WEIGHT))
                .saturating_add(overlap.saturating_mul(SHARED_INTEREST_WEIGHT));

            // Popularity fallback: only for candidates the proximity and
            // interest signals left untouched.
            if score == 0 && candidate.friends.len() > POPULARITY_THRESHOLD {
                score = (candidate.friends.len() as i64) / POPULARITY_DIVISOR;
            }

            if score > 0 {
                ranked.push(Recommendation {
                    member: candidate_id,
                    score,
                });
            }
        }

        ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.member.cmp(&b.member)));
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Eligibility checks visible from the subject's own edge sets:
    /// self, current friends, pending requests either direction, and
    /// outbound blocks.
    fn passes_subject_side(subject: &Member, candidate: MemberId) -> bool {
        candidate != subject.id
            && !subject.friends.contains(&candidate)
            && !subject.sent_requests.contains(&candidate)
            && !subject.received_requests.contains(&candidate)
            && !subject.blocked.contains(&candidate)
    }
}

// =============================================================================
// TESTS
// =============================================================================
