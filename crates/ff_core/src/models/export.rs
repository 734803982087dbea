use serde::{Deserialize, Serialize};

use crate::error::{Result, TeamError};
use crate::models::{Team, TeamPlayer};

/// Flat, page-friendly view of one squad member or ex-player.
///
/// Positions and statuses become their display labels and a missing squad
/// number becomes `-1`, so templates and scripts can consume the JSON
/// without knowing the engine's types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberExport {
    pub name: String,
    pub player_key: String,
    pub pos: String,
    pub club: String,
    pub current_club: String,
    pub price: f64,
    pub squad_num: i64,
    pub status: String,
}

impl From<&TeamPlayer> for MemberExport {
    fn from(member: &TeamPlayer) -> Self {
        MemberExport {
            name: member.name.clone(),
            player_key: member.player_key.clone(),
            pos: member.pos.to_string(),
            club: member.club.clone(),
            current_club: member.current_club.clone(),
            price: member.price,
            squad_num: member.squad_num.map_or(-1, |slot| slot as i64),
            status: member.status.display_name().to_string(),
        }
    }
}

/// Everything a team page needs in one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamExport {
    pub manager: String,
    pub safe_manager: String,
    pub name: String,
    pub funds: f64,
    pub players: Vec<MemberExport>,
    pub ex_players: Vec<MemberExport>,
}

impl From<&Team> for TeamExport {
    fn from(team: &Team) -> Self {
        TeamExport {
            manager: team.manager().to_string(),
            safe_manager: team.safe_manager().to_string(),
            name: team.name().to_string(),
            funds: team.funds(),
            players: team.players().map(MemberExport::from).collect(),
            ex_players: team.ex_players().iter().map(MemberExport::from).collect(),
        }
    }
}

impl TeamExport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| TeamError::Serialization(e.to_string()))
    }
}
