//! # amity-core
//!
//! The relationship & recommendation engine for Amity - THE LOGIC.
//!
//! This crate maintains the social relationship graph between members of a
//! network: friendship lifecycle, blocking, and interest-based friend
//! recommendation.
//!
//! ## Architectural Constraints
//!
//! - The state machine is the single source of truth for legal pairwise
//!   transitions; relationship status is always derived, never stored
//! - Mutations touch two member records and commit through a single
//!   transactional store boundary (`RelationshipStore::save_pair`)
//! - Rankings are deterministic for a fixed graph snapshot: integer
//!   arithmetic only, `BTreeMap`/`BTreeSet` ordering, ties broken by id
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod mutual;
pub mod network;
pub mod primitives;
pub mod recommend;
pub mod relationship;
pub mod storage;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{AmityError, Member, MemberId, RelationshipStatus};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use mutual::MutualConnectionCounter;
pub use network::Network;
pub use recommend::{Recommendation, RecommendationEngine};
pub use relationship::RelationshipStateMachine;
pub use storage::RedbStore;
pub use store::{MemberGraph, RelationshipStore, validate_member};
