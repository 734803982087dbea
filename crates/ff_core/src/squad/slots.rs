//! Squad slot layout: which slot numbers exist, which are bench slots, and
//! which positions each slot may hold.
//!
//! The preferred-slot lists are product data carried over from the paper
//! rules: their order is the placement priority, not numeric order, and
//! slots 5 and 9 deliberately appear in two lists each. Everything else in
//! this module is derived from those lists.

use crate::models::Position;

/// Total roster size: starting eleven plus six bench slots.
pub const SQUAD_SIZE: usize = 17;

/// First bench slot. Slots below this are the starting eleven.
pub const BENCH_START: usize = 11;

/// The only slots eligible for two positions, used to broker rotations.
pub const PIVOT_SLOTS: [usize; 2] = [5, 9];

#[inline]
pub const fn is_valid_slot(slot: usize) -> bool {
    slot < SQUAD_SIZE
}

#[inline]
pub const fn is_starting(slot: usize) -> bool {
    slot < BENCH_START
}

#[inline]
pub const fn is_bench(slot: usize) -> bool {
    slot >= BENCH_START && slot < SQUAD_SIZE
}

/// Starting slots a position may occupy, in placement-priority order.
///
/// Midfielders fill the plain midfield slots before falling back to the
/// shared slots 5 and 9; strikers prefer 10 over the shared 9.
pub fn preferred_slots(pos: Position) -> &'static [usize] {
    match pos {
        Position::GK => &[0],
        Position::FB => &[1, 2],
        Position::CB => &[3, 4, 5],
        Position::MF => &[6, 7, 8, 5, 9],
        Position::ST => &[10, 9],
        Position::Any => &[],
    }
}

/// Shared slots worth freeing up by rotation when a position's preferred
/// slots are all taken. Goalkeepers and full backs have none.
pub fn rotation_targets(pos: Position) -> &'static [usize] {
    match pos {
        Position::CB => &[5],
        Position::MF => &[5, 9],
        Position::ST => &[9],
        _ => &[],
    }
}

/// Whether a slot may hold a player of the given position.
///
/// Bench slots hold anything. Starting slots hold exactly the positions
/// whose preferred list names them. The vacant marker fits anywhere.
pub fn slot_accepts(slot: usize, pos: Position) -> bool {
    if !is_valid_slot(slot) {
        return false;
    }
    match pos {
        Position::Any => true,
        _ => is_bench(slot) || preferred_slots(pos).contains(&slot),
    }
}

/// Every position a slot may hold, for the squad and auction pages.
///
/// Starting slots list their playing positions; bench slots list all five
/// plus the vacant marker.
pub fn eligible_positions(slot: usize) -> Vec<Position> {
    let mut eligible: Vec<Position> = Position::ALL
        .iter()
        .copied()
        .filter(|&pos| slot_accepts(slot, pos))
        .collect();
    if is_bench(slot) {
        eligible.push(Position::Any);
    }
    eligible
}
