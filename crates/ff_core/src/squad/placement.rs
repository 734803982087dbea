//! Finding a free squad number for a newly bought player.

use log::{debug, info};

use crate::error::{Result, TeamError};
use crate::models::Position;
use crate::squad::slots::{preferred_slots, rotation_targets, BENCH_START, SQUAD_SIZE};
use crate::squad::Roster;
use crate::store::TeamStore;

impl Roster {
    /// Locates a free slot for a player of `pos`, considering only slots
    /// with index at or below `max_slot` (auction placements pass 11 to
    /// force the starting eleven; transfers pass the squad size).
    ///
    /// Three stages, first hit wins:
    /// 1. the position's preferred slots in their authored order;
    /// 2. for CB, MF and ST: rotate some vacant outfield slot (3..=10,
    ///    ascending) onto one of the position's shared slots via
    ///    [`Roster::swap_players`], then place there; a successful rotation
    ///    always leaves the target slot vacant;
    /// 3. the first free bench slot in 11..max_slot.
    ///
    /// Rotations are real, persisted moves: probing can reshuffle other
    /// players even though the new player's placement then fails at a later
    /// stage only by running out of bench space.
    pub fn find_free_squad_num(
        &mut self,
        store: &mut dyn TeamStore,
        pos: Position,
        max_slot: usize,
    ) -> Result<usize> {
        for &slot in preferred_slots(pos) {
            if slot <= max_slot && self.is_slot_vacant(slot) {
                debug!("placing {} at preferred slot {}", pos, slot);
                return Ok(slot);
            }
        }

        let targets = rotation_targets(pos);
        if !targets.is_empty() {
            for vacant in 3..=10 {
                if !self.is_slot_vacant(vacant) {
                    continue;
                }
                for &target in targets {
                    if target > max_slot {
                        continue;
                    }
                    match self.swap_players(store, vacant, target) {
                        Ok(()) => {
                            debug_assert!(self.is_slot_vacant(target));
                            info!(
                                "freed slot {} for {} by rotating the vacancy at {}",
                                target, pos, vacant
                            );
                            return Ok(target);
                        }
                        // This vacancy cannot reach the target; try the next.
                        Err(TeamError::InvalidExchange { .. }) => {}
                        Err(err) => return Err(err),
                    }
                }
            }
        }

        for slot in BENCH_START..max_slot.min(SQUAD_SIZE) {
            if self.is_slot_vacant(slot) {
                debug!("placing {} at bench slot {}", pos, slot);
                return Ok(slot);
            }
        }

        Err(TeamError::NoSpace { position: pos })
    }
}
