//! # ff_core - Fantasy Football Squad Engine
//!
//! This library manages the 17-slot squads of a fantasy football league:
//! buying, selling and transferring players, and the position-aware slot
//! exchanges behind matchday substitutions.
//!
//! ## Features
//! - Position-eligibility rules for a 4-4-2 starting eleven plus bench
//! - Direct and pivoted (three-player) slot exchanges
//! - Placement search that rotates the squad to open a preferred slot
//! - Pluggable persistence behind the [`TeamStore`] trait

// Loop style - can fix incrementally
#![allow(clippy::needless_range_loop)]
// Game page APIs carry several knobs per call (price, bounds, club checks)
#![allow(clippy::too_many_arguments)]

pub mod error;
pub mod models;
pub mod squad;
pub mod store;

// Re-export the error type used across the crate
pub use error::{Result, TeamError};

// Re-export the domain model
pub use models::{
    MemberExport, PlayerListing, PlayerStatus, Position, Team, TeamExport, TeamPlayer,
};

// Re-export the roster engine types and layout constants
pub use squad::{Roster, BENCH_START, SQUAD_SIZE};

// Re-export persistence
pub use store::{MemoryStore, StoreError, TeamStore};
