//! In-memory [`TeamStore`] used by tests and local tooling.

use std::collections::HashMap;

use log::debug;

use crate::models::TeamPlayer;
use crate::store::{StoreError, TeamStore};

type MemberKey = (String, String, u32);

/// What the store keeps per member stint.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMember {
    pub name: String,
    pub club: String,
    pub price: f64,
    pub slot: Option<usize>,
}

/// Hash-map backed store. Also counts slot writes so tests can check how
/// much persistence an operation caused.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    members: HashMap<MemberKey, StoredMember>,
    funds: HashMap<String, f64>,
    slot_writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// The stored stint for (manager, player key, instance), if any.
    pub fn member(&self, manager: &str, player_key: &str, instance: u32) -> Option<&StoredMember> {
        self.members
            .get(&(manager.to_string(), player_key.to_string(), instance))
    }

    /// The recorded funds for a manager, if any.
    pub fn funds_of(&self, manager: &str) -> Option<f64> {
        self.funds.get(manager).copied()
    }

    /// Number of slot writes since construction.
    pub fn slot_writes(&self) -> usize {
        self.slot_writes
    }

    /// Number of stored member stints across all managers.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    fn key_for(member: &TeamPlayer) -> MemberKey {
        (
            member.manager.clone(),
            member.player_key.clone(),
            member.instance,
        )
    }

    fn record_for(member: &TeamPlayer, slot: Option<usize>) -> StoredMember {
        StoredMember {
            name: member.name.clone(),
            club: member.club.clone(),
            price: member.price,
            slot,
        }
    }
}

impl TeamStore for MemoryStore {
    fn persist_slot_change(
        &mut self,
        member: &TeamPlayer,
        slot: Option<usize>,
    ) -> Result<(), StoreError> {
        debug!(
            "slot write: {} instance {} -> {:?}",
            member.player_key, member.instance, slot
        );
        self.members
            .insert(Self::key_for(member), Self::record_for(member, slot));
        self.slot_writes += 1;
        Ok(())
    }

    fn insert_member(&mut self, member: &TeamPlayer) -> Result<(), StoreError> {
        let key = Self::key_for(member);
        if self.members.contains_key(&key) {
            return Err(StoreError::MemberExists {
                player_key: member.player_key.clone(),
                instance: member.instance,
            });
        }
        self.members
            .insert(key, Self::record_for(member, member.squad_num));
        Ok(())
    }

    fn update_member(&mut self, member: &TeamPlayer) -> Result<(), StoreError> {
        let key = Self::key_for(member);
        if !self.members.contains_key(&key) {
            return Err(StoreError::MemberMissing {
                player_key: member.player_key.clone(),
                instance: member.instance,
            });
        }
        self.members
            .insert(key, Self::record_for(member, member.squad_num));
        Ok(())
    }

    fn delete_member(&mut self, member: &TeamPlayer) -> Result<(), StoreError> {
        let key = Self::key_for(member);
        match self.members.remove(&key) {
            Some(_) => Ok(()),
            None => Err(StoreError::MemberMissing {
                player_key: member.player_key.clone(),
                instance: member.instance,
            }),
        }
    }

    fn persist_funds(&mut self, manager: &str, funds: f64) -> Result<(), StoreError> {
        self.funds.insert(manager.to_string(), funds);
        Ok(())
    }
}
