//! Exchange legality and execution: direct two-way swaps and three-way
//! rotations brokered through the shared slots 5 and 9.

use log::debug;

use crate::error::{Result, TeamError};
use crate::models::Position;
use crate::squad::slots::{is_bench, is_starting, is_valid_slot, slot_accepts, PIVOT_SLOTS};
use crate::squad::Roster;
use crate::store::TeamStore;

impl Roster {
    /// Whether the occupants of two slots can trade places directly.
    ///
    /// A slot paired with itself is rejected as a pointless exchange. Two
    /// occupants with the same position always trade; otherwise each must be
    /// acceptable in the other's slot, with the vacant marker acceptable
    /// anywhere. Out-of-range slots never trade.
    pub fn can_swap_two(&self, slot_a: usize, slot_b: usize) -> bool {
        self.swap_legal(slot_a, slot_b, None)
    }

    /// Direct-swap legality, optionally evaluated as if `tentative` had
    /// already been exchanged. The overlay keeps pivot probing pure: the
    /// real occupant table is never touched.
    fn swap_legal(&self, slot_a: usize, slot_b: usize, tentative: Option<(usize, usize)>) -> bool {
        if slot_a == slot_b || !is_valid_slot(slot_a) || !is_valid_slot(slot_b) {
            return false;
        }
        let pos_a = self.position_under(slot_a, tentative);
        let pos_b = self.position_under(slot_b, tentative);
        if pos_a == pos_b {
            return true;
        }
        (pos_a.is_any() || slot_accepts(slot_b, pos_a))
            && (pos_b.is_any() || slot_accepts(slot_a, pos_b))
    }

    /// Position at `slot`, read through the tentative exchange if the slot
    /// is one of its two ends.
    fn position_under(&self, slot: usize, tentative: Option<(usize, usize)>) -> Position {
        let read = match tentative {
            Some((x, y)) if slot == x => y,
            Some((x, y)) if slot == y => x,
            _ => slot,
        };
        self.occupant(read).map_or(Position::Any, |m| m.pos)
    }

    /// Searches for a pivot slot able to broker an indirect exchange.
    ///
    /// For each candidate in slot order 5 then 9: the lower slot must trade
    /// directly with the pivot, and the pivot must then trade with the
    /// higher slot once the first trade is (hypothetically) done. The first
    /// candidate satisfying both wins.
    pub fn find_pivot(&self, slot_a: usize, slot_b: usize) -> Option<usize> {
        let low = slot_a.min(slot_b);
        let high = slot_a.max(slot_b);
        PIVOT_SLOTS.into_iter().find(|&pivot| {
            self.swap_legal(low, pivot, None) && self.swap_legal(pivot, high, Some((low, pivot)))
        })
    }

    /// Whether two slots can be exchanged at all, directly or via a pivot.
    pub fn can_swap(&self, slot_a: usize, slot_b: usize) -> bool {
        self.can_swap_two(slot_a, slot_b) || self.find_pivot(slot_a, slot_b).is_some()
    }

    /// Whether exchanging two slots is a legal matchday substitution: one
    /// slot in the starting eleven, one on the bench, the bench slot
    /// actually holding a player, and the exchange itself possible.
    pub fn can_substitute(&self, slot_a: usize, slot_b: usize) -> bool {
        self.can_swap(slot_a, slot_b)
            && is_starting(slot_a.min(slot_b))
            && is_bench(slot_a.max(slot_b))
            && !self.is_slot_vacant(slot_a.max(slot_b))
    }

    /// Exchanges the occupants of two slots, persisting every moved player.
    ///
    /// Falls back to a pivoted rotation when the direct swap is illegal:
    /// (low, pivot) then (pivot, high), two exchanges persisted in sequence.
    /// If persistence fails partway through a rotation the store keeps the
    /// writes that succeeded; the request-scoped roster should be discarded
    /// rather than reused after an error.
    pub fn swap_players(
        &mut self,
        store: &mut dyn TeamStore,
        slot_a: usize,
        slot_b: usize,
    ) -> Result<()> {
        for slot in [slot_a, slot_b] {
            if !is_valid_slot(slot) {
                return Err(TeamError::SlotOutOfRange { slot });
            }
        }

        if self.can_swap_two(slot_a, slot_b) {
            debug!("swapping slots {} and {} directly", slot_a, slot_b);
            self.exchange(store, slot_a, slot_b)
        } else if let Some(pivot) = self.find_pivot(slot_a, slot_b) {
            let low = slot_a.min(slot_b);
            let high = slot_a.max(slot_b);
            debug!("rotating slots {} and {} through pivot {}", low, high, pivot);
            self.exchange(store, low, pivot)?;
            self.exchange(store, pivot, high)
        } else {
            Err(TeamError::InvalidExchange {
                slot_a,
                pos_a: self.position_under(slot_a, None),
                slot_b,
                pos_b: self.position_under(slot_b, None),
            })
        }
    }

    /// One two-way exchange. Memory first, then a slot write per real
    /// occupant; the vacant sentinel moves in memory only.
    fn exchange(&mut self, store: &mut dyn TeamStore, slot_a: usize, slot_b: usize) -> Result<()> {
        self.members.swap(slot_a, slot_b);
        self.members[slot_a].squad_num = Some(slot_a);
        self.members[slot_b].squad_num = Some(slot_b);
        for slot in [slot_a, slot_b] {
            if !self.members[slot].is_vacant() {
                store.persist_slot_change(&self.members[slot], Some(slot))?;
            }
        }
        Ok(())
    }
}
