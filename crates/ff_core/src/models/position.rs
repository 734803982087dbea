use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Squad position.
///
/// A real player holds one of the five playing positions for the whole
/// season. `Any` is the synthetic marker carried by the vacant sentinel so
/// that empty slots can be moved through any exchange.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    FB,
    CB,
    MF,
    ST,
    #[serde(rename = "--")]
    Any,
}

impl Position {
    /// The five playing positions, in the canonical page order.
    pub const ALL: [Position; 5] = [
        Position::GK,
        Position::FB,
        Position::CB,
        Position::MF,
        Position::ST,
    ];

    /// Two-character label as stored and displayed ("MF", "ST", "--").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::FB => "FB",
            Position::CB => "CB",
            Position::MF => "MF",
            Position::ST => "ST",
            Position::Any => "--",
        }
    }

    /// Full name for page headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Position::GK => "Goalkeeper",
            Position::FB => "Full Back",
            Position::CB => "Centre Back",
            Position::MF => "Midfielder",
            Position::ST => "Striker",
            Position::Any => "Any",
        }
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Position::Any)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for Position {
    type Err = String;

    /// Accepts the stored labels plus the single-letter aliases used by
    /// older query strings ("M" for MF, "S" for ST).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GK" => Ok(Position::GK),
            "FB" => Ok(Position::FB),
            "CB" => Ok(Position::CB),
            "MF" | "M" => Ok(Position::MF),
            "ST" | "S" => Ok(Position::ST),
            "--" => Ok(Position::Any),
            _ => Err(format!("Unknown position: {}", s)),
        }
    }
}

/// Week-to-week availability of a player, as shown on the team page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    #[default]
    Fit,
    Injured,
    Suspended,
    Doubtful,
    Ineligible,
    #[serde(rename = "Late Fitness Test")]
    LateFitnessTest,
    International,
}

impl PlayerStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerStatus::Fit => "Fit",
            PlayerStatus::Injured => "Injured",
            PlayerStatus::Suspended => "Suspended",
            PlayerStatus::Doubtful => "Doubtful",
            PlayerStatus::Ineligible => "Ineligible",
            PlayerStatus::LateFitnessTest => "Late Fitness Test",
            PlayerStatus::International => "International",
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PlayerStatus {
    type Err = String;

    /// Accepts the scraped status strings, including the historic
    /// "Ineligable" spelling found in older feeds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fit" => Ok(PlayerStatus::Fit),
            "Injured" => Ok(PlayerStatus::Injured),
            "Suspended" => Ok(PlayerStatus::Suspended),
            "Doubtful" => Ok(PlayerStatus::Doubtful),
            "Ineligible" | "Ineligable" => Ok(PlayerStatus::Ineligible),
            "Late Fitness Test" => Ok(PlayerStatus::LateFitnessTest),
            "International" => Ok(PlayerStatus::International),
            _ => Err(format!("Unknown player status: {}", s)),
        }
    }
}
