//! # redb-backed Member Storage
//!
//! A disk-backed `RelationshipStore` using the redb embedded database:
//! - ACID transactions
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//! - Zero configuration
//!
//! `save_pair` groups both member records into a single write transaction.
//! This is the transactional boundary relationship mutations rely on: a
//! reader either sees both sides of an edge change or neither.

use crate::store::{RelationshipStore, rank_by_shared_interest, validate_member};
use crate::{AmityError, Member, MemberId};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

/// Table for members: MemberId(u64) -> serialized Member bytes
const MEMBERS: TableDefinition<u64, &[u8]> = TableDefinition::new("members");

/// A disk-backed member store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

fn io_err(e: impl std::fmt::Display) -> AmityError {
    AmityError::Io(e.to_string())
}

fn codec_err(e: impl std::fmt::Display) -> AmityError {
    AmityError::Serialization(e.to_string())
}

impl RedbStore {
    /// Open or create a member database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AmityError> {
        let db = Database::create(path.as_ref()).map_err(io_err)?;

        // Initialize the table if it doesn't exist
        {
            let write_txn = db.begin_write().map_err(io_err)?;
            let _ = write_txn.open_table(MEMBERS).map_err(io_err)?;
            write_txn.commit().map_err(io_err)?;
        }

        Ok(Self { db })
    }

    /// Compact the database (optional optimization).
    pub fn compact(&mut self) -> Result<(), AmityError> {
        self.db.compact().map_err(io_err)?;
        Ok(())
    }

    /// Load and deserialize every member record in id order.
    fn scan_members(&self) -> Result<Vec<Member>, AmityError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(MEMBERS).map_err(io_err)?;

        let mut members = Vec::new();
        for entry in table.iter().map_err(io_err)? {
            let (_, value) = entry.map_err(io_err)?;
            let member: Member = postcard::from_bytes(value.value()).map_err(codec_err)?;
            members.push(member);
        }
        Ok(members)
    }
}

impl RelationshipStore for RedbStore {
    fn get_member(&self, id: MemberId) -> Result<Option<Member>, AmityError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(MEMBERS).map_err(io_err)?;

        match table.get(id.0).map_err(io_err)? {
            Some(data) => {
                let member = postcard::from_bytes(data.value()).map_err(codec_err)?;
                Ok(Some(member))
            }
            None => Ok(None),
        }
    }

    fn save_member(&mut self, member: Member) -> Result<(), AmityError> {
        validate_member(&member)?;
        let bytes = postcard::to_allocvec(&member).map_err(codec_err)?;

        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(MEMBERS).map_err(io_err)?;
            table.insert(member.id.0, bytes.as_slice()).map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)?;
        Ok(())
    }

    fn save_pair(&mut self, first: Member, second: Member) -> Result<(), AmityError> {
        // Validate and serialize both records before the transaction opens
        // so a failure leaves the database untouched.
        validate_member(&first)?;
        validate_member(&second)?;
        let first_bytes = postcard::to_allocvec(&first).map_err(codec_err)?;
        let second_bytes = postcard::to_allocvec(&second).map_err(codec_err)?;

        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(MEMBERS).map_err(io_err)?;
            table
                .insert(first.id.0, first_bytes.as_slice())
                .map_err(io_err)?;
            table
                .insert(second.id.0, second_bytes.as_slice())
                .map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)?;
        Ok(())
    }

    fn find_members_by_shared_interest(
        &self,
        id: MemberId,
        limit: usize,
    ) -> Result<Vec<Member>, AmityError> {
        let subject = self
            .get_member(id)?
            .ok_or(AmityError::MemberNotFound(id))?;
        let members = self.scan_members()?;

        Ok(rank_by_shared_interest(&subject, members.into_iter(), limit))
    }

    fn member_count(&self) -> Result<usize, AmityError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(MEMBERS).map_err(io_err)?;
        let count = table.len().map_err(io_err)?;
        Ok(count as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================
