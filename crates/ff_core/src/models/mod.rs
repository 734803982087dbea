//! Domain types: players, positions, teams and their export views.

pub mod export;
pub mod player;
pub mod position;
pub mod team;


pub use export::{MemberExport, TeamExport};
pub use player::{PlayerListing, TeamPlayer, NON_CLUB, VACANT_NAME};
pub use position::{PlayerStatus, Position};
pub use team::Team;
