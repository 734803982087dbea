use thiserror::Error;

use crate::models::Position;
use crate::store::StoreError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TeamError>;

/// Errors raised by team and squad operations.
///
/// Message texts are user-facing: the admin tools and transfer pages surface
/// them verbatim.
#[derive(Error, Debug)]
pub enum TeamError {
    /// Neither a direct swap nor a pivoted rotation can exchange the slots.
    #[error("Swapping players {slot_a} ({pos_a}) and {slot_b} ({pos_b}) invalid")]
    InvalidExchange {
        slot_a: usize,
        pos_a: Position,
        slot_b: usize,
        pos_b: Position,
    },

    /// No eligible slot is free for the position within the allowed range.
    #[error("No space for {position} in team")]
    NoSpace { position: Position },

    /// A slot index outside 0..17 was passed to a mutating operation.
    #[error("Squad number {slot} is outside the squad")]
    SlotOutOfRange { slot: usize },

    /// A placement targeted a slot that already holds a player.
    #[error("Slot {slot} is already occupied")]
    SlotOccupied { slot: usize },

    #[error("Player costs {price} but only {funds} available")]
    InsufficientFunds { price: f64, funds: f64 },

    /// The team already fields the maximum number of players from the club.
    #[error("No slots free for club '{club}'")]
    ClubFull { club: String },

    #[error("Failed to find player '{player_key}' in team")]
    PlayerNotFound { player_key: String },

    #[error("Player '{player_key}' already belongs to this team")]
    DuplicatePlayer { player_key: String },

    #[error("Invalid manager name: {reason}")]
    InvalidManagerName { reason: String },

    #[error("Failed to serialize team export: {0}")]
    Serialization(String),

    /// Persistence failure, propagated unmodified from the store.
    #[error(transparent)]
    Store(#[from] StoreError),
}
