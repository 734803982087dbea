//! Roster state and the slot engine built on top of it.
//!
//! `Roster` owns the 17 slot occupants for one team during one request.
//! The exchange rules live in `exchange`, placement search in `placement`,
//! and the static slot tables in `slots`.

mod exchange;
mod placement;
pub mod slots;

pub use slots::{
    eligible_positions, is_bench, is_starting, is_valid_slot, preferred_slots, rotation_targets,
    slot_accepts, BENCH_START, PIVOT_SLOTS, SQUAD_SIZE,
};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TeamError};
use crate::models::TeamPlayer;

/// The ordered occupants of one team's 17 squad slots.
///
/// Every slot always holds something: a real player or the vacant sentinel.
/// A roster is built from persisted state at the start of a request, mutated
/// in memory with each change persisted through a [`crate::store::TeamStore`],
/// and discarded when the request ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<TeamPlayer>,
}

impl Roster {
    /// A roster with every slot vacant.
    pub fn empty() -> Self {
        Roster {
            members: (0..SQUAD_SIZE).map(TeamPlayer::vacant).collect(),
        }
    }

    /// Builds a roster from loaded members, each placed at its own
    /// `squad_num`. Remaining slots are filled with the vacant sentinel.
    pub fn from_members(members: Vec<TeamPlayer>) -> Result<Self> {
        let mut roster = Roster::empty();
        for member in members {
            let slot = member.squad_num.unwrap_or(SQUAD_SIZE);
            roster.place_at(slot, member)?;
        }
        Ok(roster)
    }

    /// Puts a member into a vacant slot, fixing up its `squad_num`.
    pub fn place_at(&mut self, slot: usize, mut member: TeamPlayer) -> Result<()> {
        if !is_valid_slot(slot) {
            return Err(TeamError::SlotOutOfRange { slot });
        }
        if !self.members[slot].is_vacant() {
            return Err(TeamError::SlotOccupied { slot });
        }
        member.squad_num = Some(slot);
        self.members[slot] = member;
        Ok(())
    }

    /// Empties a slot, returning the member that occupied it.
    pub fn clear_slot(&mut self, slot: usize) -> Result<TeamPlayer> {
        if !is_valid_slot(slot) {
            return Err(TeamError::SlotOutOfRange { slot });
        }
        let member = std::mem::replace(&mut self.members[slot], TeamPlayer::vacant(slot));
        Ok(member)
    }

    /// The occupant of a slot, vacant sentinel included.
    pub fn occupant(&self, slot: usize) -> Option<&TeamPlayer> {
        self.members.get(slot)
    }

    pub(crate) fn occupant_mut(&mut self, slot: usize) -> Option<&mut TeamPlayer> {
        self.members.get_mut(slot)
    }

    /// True when the slot exists and holds the vacant sentinel.
    ///
    /// Distinct from [`TeamPlayer::is_vacant`], which asks the same question
    /// of an occupant already in hand.
    pub fn is_slot_vacant(&self, slot: usize) -> bool {
        matches!(self.members.get(slot), Some(member) if member.is_vacant())
    }

    /// All 17 occupants in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &TeamPlayer> {
        self.members.iter()
    }
}
