//! Persistence boundary for teams and squad members.
//!
//! The engine and the team flows never talk to a datastore directly; they
//! call through [`TeamStore`] so the web layer can plug in its own backend.
//! [`MemoryStore`] is the in-process implementation used by tests and local
//! tooling.

mod memory;

pub use memory::{MemoryStore, StoredMember};

use thiserror::Error;

use crate::models::TeamPlayer;

/// Failures surfaced by a [`TeamStore`] backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no stored member for player '{player_key}' instance {instance}")]
    MemberMissing { player_key: String, instance: u32 },

    #[error("member for player '{player_key}' instance {instance} already stored")]
    MemberExists { player_key: String, instance: u32 },

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Synchronous persistence callbacks for one team's state.
///
/// Members are keyed by (manager, player key, instance). All calls happen
/// inside a single request; the store is expected to serialize concurrent
/// requests itself (last writer wins).
pub trait TeamStore {
    /// Records the member's new squad slot; `None` means out of the squad.
    /// Upserts, so a slot write never depends on insertion order.
    fn persist_slot_change(
        &mut self,
        member: &TeamPlayer,
        slot: Option<usize>,
    ) -> Result<(), StoreError>;

    /// Stores a newly purchased member. Fails if the stint already exists.
    fn insert_member(&mut self, member: &TeamPlayer) -> Result<(), StoreError>;

    /// Re-stores an existing member after a field change.
    fn update_member(&mut self, member: &TeamPlayer) -> Result<(), StoreError>;

    /// Deletes a stint outright (undoing a purchase).
    fn delete_member(&mut self, member: &TeamPlayer) -> Result<(), StoreError>;

    /// Records the team's current funds.
    fn persist_funds(&mut self, manager: &str, funds: f64) -> Result<(), StoreError>;
}
