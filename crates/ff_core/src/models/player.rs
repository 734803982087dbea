use serde::{Deserialize, Serialize};

use crate::models::{PlayerStatus, Position};
use crate::squad::slots::{is_bench, is_starting};

/// Club code for players without a real club: placeholders created during
/// transfers and the vacant sentinel. There is always squad room for them.
pub const NON_CLUB: &str = "NON";

/// Display name carried by the vacant sentinel.
pub const VACANT_NAME: &str = "None";

/// A player as listed league-wide, before any team owns them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerListing {
    pub player_key: String,
    pub name: String,
    pub club: String,
    pub pos: Position,
    #[serde(default)]
    pub status: PlayerStatus,
}

impl PlayerListing {
    pub fn new(player_key: &str, name: &str, club: &str, pos: Position) -> Self {
        PlayerListing {
            player_key: player_key.to_string(),
            name: name.to_string(),
            club: club.to_string(),
            pos,
            status: PlayerStatus::default(),
        }
    }
}

/// One stint of a player inside one team's squad.
///
/// The same player can pass through a team more than once; each pass gets a
/// fresh `instance` number so the stored stints stay distinct. `squad_num`
/// is `None` once the player has been transferred out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamPlayer {
    pub player_key: String,
    pub name: String,
    pub manager: String,
    /// Club at the time of purchase; fixed for the stint.
    pub club: String,
    /// Club the player currently plays for, updated by the weekly feeds.
    pub current_club: String,
    pub pos: Position,
    pub price: f64,
    pub squad_num: Option<usize>,
    pub instance: u32,
    pub status: PlayerStatus,
}

impl TeamPlayer {
    /// Builds the squad member created when `listing` is bought.
    pub fn from_listing(
        listing: &PlayerListing,
        manager: &str,
        price: f64,
        squad_num: usize,
        instance: u32,
    ) -> Self {
        TeamPlayer {
            player_key: listing.player_key.clone(),
            name: listing.name.clone(),
            manager: manager.to_string(),
            club: listing.club.clone(),
            current_club: listing.club.clone(),
            pos: listing.pos,
            price,
            squad_num: Some(squad_num),
            instance,
            status: listing.status,
        }
    }

    /// The sentinel occupying an empty slot. Never persisted.
    pub fn vacant(squad_num: usize) -> Self {
        TeamPlayer {
            player_key: String::new(),
            name: VACANT_NAME.to_string(),
            manager: String::new(),
            club: NON_CLUB.to_string(),
            current_club: NON_CLUB.to_string(),
            pos: Position::Any,
            price: 0.0,
            squad_num: Some(squad_num),
            instance: 0,
            status: PlayerStatus::Ineligible,
        }
    }

    /// True for the vacant sentinel, false for any real player.
    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.pos.is_any()
    }

    /// True when assigned to a starting-eleven slot.
    pub fn is_starting(&self) -> bool {
        matches!(self.squad_num, Some(slot) if is_starting(slot))
    }

    /// True when assigned to a bench slot.
    pub fn is_substitute(&self) -> bool {
        matches!(self.squad_num, Some(slot) if is_bench(slot))
    }
}
