use log::info;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TeamError};
use crate::models::{PlayerListing, Position, TeamPlayer, NON_CLUB};
use crate::squad::slots::{is_valid_slot, SQUAD_SIZE};
use crate::squad::Roster;
use crate::store::TeamStore;

/// One manager's team: identity, funds, the 17-slot roster and the players
/// that have passed through it.
///
/// Mutating operations take a [`TeamStore`] and persist as they go, matching
/// the request-scoped lifecycle: load, mutate, discard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    manager: String,
    safe_manager: String,
    name: String,
    funds: f64,
    roster: Roster,
    ex_players: Vec<TeamPlayer>,
}

impl Team {
    /// Funds every new team starts the season with, in millions.
    pub const STARTING_FUNDS: f64 = 100.0;

    /// Suffix pool for generated team names.
    pub const TEAM_NAMES: [&'static str; 6] = [
        "United",
        "Hotspur",
        "Albion",
        "Rovers",
        "Athletic",
        "Rangers",
    ];

    /// At most this many squad members may share a real club.
    pub const CLUB_LIMIT: usize = 2;

    /// Creates and persists a brand-new team with an empty roster.
    ///
    /// With no explicit name the team is called "{manager} {suffix}" with a
    /// random suffix from [`Team::TEAM_NAMES`].
    pub fn create(store: &mut dyn TeamStore, manager: &str, name: Option<&str>) -> Result<Team> {
        Team::validate_manager(manager)?;
        let name = match name {
            Some(name) => name.to_string(),
            None => Team::random_name(manager),
        };
        let team = Team {
            manager: manager.to_string(),
            safe_manager: Team::safe_manager_key(manager),
            name,
            funds: Team::STARTING_FUNDS,
            roster: Roster::empty(),
            ex_players: Vec::new(),
        };
        store.persist_funds(&team.manager, team.funds)?;
        info!("created team '{}' for manager {}", team.name, team.manager);
        Ok(team)
    }

    /// Rebuilds a team from persisted state. `members` are the current
    /// squad (each with its slot); `ex_players` the transferred-out stints.
    pub fn from_saved(
        manager: &str,
        name: &str,
        funds: f64,
        members: Vec<TeamPlayer>,
        ex_players: Vec<TeamPlayer>,
    ) -> Result<Team> {
        Ok(Team {
            manager: manager.to_string(),
            safe_manager: Team::safe_manager_key(manager),
            name: name.to_string(),
            funds,
            roster: Roster::from_members(members)?,
            ex_players,
        })
    }

    /// Checks a manager name: it must start with a letter and contain only
    /// letters, digits, apostrophes, hyphens and spaces.
    pub fn validate_manager(manager: &str) -> Result<()> {
        match manager.chars().next() {
            None => {
                return Err(TeamError::InvalidManagerName {
                    reason: "name is empty".to_string(),
                })
            }
            Some(first) if !first.is_ascii_alphabetic() => {
                return Err(TeamError::InvalidManagerName {
                    reason: "name must start with a letter".to_string(),
                })
            }
            Some(_) => {}
        }
        if let Some(bad) = manager.chars().find(|&c| !is_manager_char(c)) {
            return Err(TeamError::InvalidManagerName {
                reason: format!("character '{}' is not allowed", bad),
            });
        }
        Ok(())
    }

    /// Reduces a manager name to the alphanumeric form used in element ids
    /// and store keys. Idempotent, so safe to apply to its own output.
    pub fn safe_manager_key(manager: &str) -> String {
        manager
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect()
    }

    /// "{manager} {suffix}" with a random suffix from the name pool.
    pub fn random_name(manager: &str) -> String {
        let mut rng = rand::thread_rng();
        let suffix = Team::TEAM_NAMES.choose(&mut rng).copied().unwrap_or("United");
        format!("{} {}", manager, suffix)
    }

    pub fn manager(&self) -> &str {
        &self.manager
    }

    pub fn safe_manager(&self) -> &str {
        &self.safe_manager
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn funds(&self) -> f64 {
        self.funds
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The current squad in slot order, vacant sentinels included.
    pub fn players(&self) -> impl Iterator<Item = &TeamPlayer> {
        self.roster.iter()
    }

    /// Stints that have been transferred out.
    pub fn ex_players(&self) -> &[TeamPlayer] {
        &self.ex_players
    }

    /// Current squad followed by ex-players.
    pub fn all_players(&self) -> impl Iterator<Item = &TeamPlayer> {
        self.roster.iter().chain(self.ex_players.iter())
    }

    /// The current squad member for a player key, if present.
    pub fn get_player(&self, player_key: &str) -> Option<&TeamPlayer> {
        self.roster
            .iter()
            .find(|p| !p.is_vacant() && p.player_key == player_key)
    }

    /// True when the team can still sign a player from `club`. There is
    /// always room for unattached ("NON") players.
    pub fn club_free(&self, club: &str) -> bool {
        let matches = self.roster.iter().filter(|p| p.club == club).count();
        matches < Team::CLUB_LIMIT || club == NON_CLUB
    }

    /// Adds `diff` (possibly negative) to the team's funds, floored at
    /// zero, and persists the new balance.
    pub fn update_funds(&mut self, store: &mut dyn TeamStore, diff: f64) -> Result<()> {
        self.funds += diff;
        if self.funds < 0.0 {
            self.funds = 0.0;
        }
        store.persist_funds(&self.manager, self.funds)?;
        Ok(())
    }

    /// Buys `listing` for `price` and places it in the squad.
    ///
    /// `max_slot` bounds the placement search (11 forces the starting
    /// eleven); `check_clubs` enforces the per-club limit and is switched
    /// off when a placeholder is being replaced by its real counterpart.
    /// Returns the squad number the player received.
    pub fn add_player(
        &mut self,
        store: &mut dyn TeamStore,
        listing: &PlayerListing,
        price: f64,
        max_slot: usize,
        check_clubs: bool,
    ) -> Result<usize> {
        if self.funds - price < 0.0 && self.funds - price > -0.1 {
            // Rounding can leave funds that should exactly match the price
            // a fraction short; treat a sub-0.1 shortfall as exact.
            self.funds = price;
        }
        if self.funds < price {
            return Err(TeamError::InsufficientFunds {
                price,
                funds: self.funds,
            });
        }
        if check_clubs && !self.club_free(&listing.club) {
            return Err(TeamError::ClubFull {
                club: listing.club.clone(),
            });
        }

        let slot = self.roster.find_free_squad_num(store, listing.pos, max_slot)?;
        let instance = self
            .ex_players
            .iter()
            .filter(|p| p.player_key == listing.player_key)
            .count() as u32;
        let member = TeamPlayer::from_listing(listing, &self.manager, price, slot, instance);

        store.insert_member(&member)?;
        self.roster.place_at(slot, member)?;
        self.update_funds(store, -price)?;
        info!(
            "{} signed {} for {} at slot {}",
            self.manager, listing.name, price, slot
        );
        Ok(slot)
    }

    /// Removes the player at `slot`. A vacant slot is a no-op.
    ///
    /// With `undo` the purchase is reversed: the price is refunded and the
    /// stint deleted. Otherwise the stint keeps its record (slot cleared)
    /// and joins the ex-player list.
    pub fn remove_player(&mut self, store: &mut dyn TeamStore, slot: usize, undo: bool) -> Result<()> {
        if !is_valid_slot(slot) {
            return Err(TeamError::SlotOutOfRange { slot });
        }
        if self.roster.is_slot_vacant(slot) {
            return Ok(());
        }
        let mut member = self.roster.clear_slot(slot)?;
        if undo {
            self.update_funds(store, member.price)?;
            store.delete_member(&member)?;
            info!("{} undid the signing of {}", self.manager, member.name);
        } else {
            member.squad_num = None;
            store.persist_slot_change(&member, None)?;
            info!("{} released {} from slot {}", self.manager, member.name, slot);
            self.ex_players.push(member);
        }
        Ok(())
    }

    /// Swaps the incoming `listing` for the squad member holding
    /// `out_player_key`, paying `price`.
    ///
    /// Replacing a "NON" placeholder costs nothing, skips the club check and
    /// hands the placeholder's recorded price to the incoming player, so a
    /// temporary stand-in can always be turned into its real counterpart.
    /// Returns the incoming player's squad number.
    pub fn transfer_player(
        &mut self,
        store: &mut dyn TeamStore,
        listing: &PlayerListing,
        out_player_key: &str,
        price: f64,
    ) -> Result<usize> {
        let outgoing = self
            .get_player(out_player_key)
            .cloned()
            .ok_or_else(|| TeamError::PlayerNotFound {
                player_key: out_player_key.to_string(),
            })?;
        if self.get_player(&listing.player_key).is_some() {
            return Err(TeamError::DuplicatePlayer {
                player_key: listing.player_key.clone(),
            });
        }
        let out_slot = outgoing.squad_num.ok_or_else(|| TeamError::PlayerNotFound {
            player_key: out_player_key.to_string(),
        })?;

        let replace_non = outgoing.club == NON_CLUB;
        let paid = if replace_non { 0.0 } else { price };

        self.remove_player(store, out_slot, false)?;
        let slot = self.add_player(store, listing, paid, SQUAD_SIZE, !replace_non)?;

        if replace_non {
            if let Some(incoming) = self.roster.occupant_mut(slot) {
                incoming.price = outgoing.price;
                store.update_member(incoming)?;
            }
        }
        info!(
            "{} replaced {} with {} in slot {}",
            self.manager, outgoing.name, listing.name, slot
        );
        Ok(slot)
    }

    /// Engine probe: where would a player of `pos` go, rotating other
    /// players if that is what it takes. See [`Roster::find_free_squad_num`].
    pub fn find_free_squad_num(
        &mut self,
        store: &mut dyn TeamStore,
        pos: Position,
        max_slot: usize,
    ) -> Result<usize> {
        self.roster.find_free_squad_num(store, pos, max_slot)
    }

    /// Exchanges two squad slots, directly or through a pivot.
    pub fn swap_players(&mut self, store: &mut dyn TeamStore, slot_a: usize, slot_b: usize) -> Result<()> {
        self.roster.swap_players(store, slot_a, slot_b)
    }

    pub fn can_swap(&self, slot_a: usize, slot_b: usize) -> bool {
        self.roster.can_swap(slot_a, slot_b)
    }

    pub fn can_substitute(&self, slot_a: usize, slot_b: usize) -> bool {
        self.roster.can_substitute(slot_a, slot_b)
    }

    /// Every slot the player at `slot` could be substituted with, for the
    /// matchday page's swap picker.
    pub fn valid_substitutions(&self, slot: usize) -> Vec<usize> {
        (0..SQUAD_SIZE)
            .filter(|&other| self.roster.can_substitute(slot, other))
            .collect()
    }
}

fn is_manager_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '\'' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn listing(key: &str, club: &str, pos: Position) -> PlayerListing {
        PlayerListing::new(key, key, club, pos)
    }

    fn new_team(store: &mut MemoryStore) -> Team {
        Team::create(store, "Alice", Some("Alice United")).unwrap()
    }

    #[test]
    fn create_validates_the_manager_name() {
        let mut store = MemoryStore::new();

        for bad in ["", "9ers", "Bob<script>", " Lead Space"] {
            let err = Team::create(&mut store, bad, None).unwrap_err();
            assert!(matches!(err, TeamError::InvalidManagerName { .. }));
        }

        let team = Team::create(&mut store, "Alice O'Shea-Smith 2", None).unwrap();
        assert_eq!(team.safe_manager(), "AliceOSheaSmith2");
    }

    #[test]
    fn generated_names_use_the_pool() {
        let name = Team::random_name("Alice");
        let suffix = name.strip_prefix("Alice ").unwrap();
        assert!(Team::TEAM_NAMES.contains(&suffix));
    }

    #[test]
    fn new_teams_start_with_full_funds_persisted() {
        let mut store = MemoryStore::new();
        let team = new_team(&mut store);
        assert_eq!(team.funds(), Team::STARTING_FUNDS);
        assert_eq!(store.funds_of("Alice"), Some(100.0));
        assert!(team.players().all(|p| p.is_vacant()));
    }

    #[test]
    fn add_player_places_pays_and_persists() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);

        let slot = team
            .add_player(&mut store, &listing("gk1", "ARS", Position::GK), 12.5, SQUAD_SIZE, true)
            .unwrap();

        assert_eq!(slot, 0);
        assert_eq!(team.funds(), 87.5);
        assert_eq!(store.funds_of("Alice"), Some(87.5));
        let stored = store.member("Alice", "gk1", 0).unwrap();
        assert_eq!(stored.slot, Some(0));
        assert_eq!(stored.price, 12.5);
        assert_eq!(team.get_player("gk1").unwrap().squad_num, Some(0));
    }

    #[test]
    fn add_player_rejects_overspending() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);

        let err = team
            .add_player(&mut store, &listing("gk1", "ARS", Position::GK), 100.2, SQUAD_SIZE, true)
            .unwrap_err();

        assert!(matches!(err, TeamError::InsufficientFunds { .. }));
        assert_eq!(team.funds(), 100.0);
        assert_eq!(store.member_count(), 0);
    }

    #[test]
    fn near_miss_shortfalls_are_forgiven() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);

        // A hair over the balance: treated as spending everything.
        team.add_player(
            &mut store,
            &listing("gk1", "ARS", Position::GK),
            100.0 + 1e-9,
            SQUAD_SIZE,
            true,
        )
        .unwrap();

        assert_eq!(team.funds(), 0.0);
        assert_eq!(store.funds_of("Alice"), Some(0.0));
    }

    #[test]
    fn club_limit_is_two_unless_unattached() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);

        team.add_player(&mut store, &listing("a1", "ARS", Position::GK), 1.0, SQUAD_SIZE, true)
            .unwrap();
        team.add_player(&mut store, &listing("a2", "ARS", Position::FB), 1.0, SQUAD_SIZE, true)
            .unwrap();

        let err = team
            .add_player(&mut store, &listing("a3", "ARS", Position::CB), 1.0, SQUAD_SIZE, true)
            .unwrap_err();
        assert!(matches!(err, TeamError::ClubFull { .. }));
        assert!(!team.club_free("ARS"));

        // The check can be bypassed, and NON players never count against it.
        team.add_player(&mut store, &listing("a3", "ARS", Position::CB), 1.0, SQUAD_SIZE, false)
            .unwrap();
        for key in ["n1", "n2", "n3"] {
            team.add_player(&mut store, &listing(key, NON_CLUB, Position::MF), 0.0, SQUAD_SIZE, true)
                .unwrap();
        }
        assert!(team.club_free(NON_CLUB));
    }

    #[test]
    fn undo_refunds_and_deletes_the_stint() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);
        let slot = team
            .add_player(&mut store, &listing("gk1", "ARS", Position::GK), 10.0, SQUAD_SIZE, true)
            .unwrap();

        team.remove_player(&mut store, slot, true).unwrap();

        assert_eq!(team.funds(), 100.0);
        assert!(store.member("Alice", "gk1", 0).is_none());
        assert!(team.roster().is_slot_vacant(slot));
        assert!(team.ex_players().is_empty());
    }

    #[test]
    fn removal_keeps_the_stint_as_an_ex_player() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);
        let slot = team
            .add_player(&mut store, &listing("gk1", "ARS", Position::GK), 10.0, SQUAD_SIZE, true)
            .unwrap();

        team.remove_player(&mut store, slot, false).unwrap();

        assert_eq!(team.funds(), 90.0);
        assert_eq!(store.member("Alice", "gk1", 0).unwrap().slot, None);
        assert_eq!(team.ex_players().len(), 1);
        assert_eq!(team.ex_players()[0].squad_num, None);
        assert!(team.get_player("gk1").is_none());

        // Removing an already-vacant slot changes nothing.
        team.remove_player(&mut store, slot, false).unwrap();
        assert_eq!(team.ex_players().len(), 1);
        assert!(team.remove_player(&mut store, 17, false).is_err());
    }

    #[test]
    fn reacquired_players_get_a_fresh_instance() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);

        let slot = team
            .add_player(&mut store, &listing("mf1", "ARS", Position::MF), 5.0, SQUAD_SIZE, true)
            .unwrap();
        team.remove_player(&mut store, slot, false).unwrap();
        team.add_player(&mut store, &listing("mf1", "ARS", Position::MF), 5.0, SQUAD_SIZE, true)
            .unwrap();

        assert_eq!(team.get_player("mf1").unwrap().instance, 1);
        assert_eq!(store.member("Alice", "mf1", 0).unwrap().slot, None);
        assert_eq!(store.member("Alice", "mf1", 1).unwrap().slot, Some(6));
        assert_eq!(store.member_count(), 2);
    }

    #[test]
    fn transfer_swaps_the_players_and_the_money() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);
        team.add_player(&mut store, &listing("smith", "ARS", Position::MF), 8.0, SQUAD_SIZE, true)
            .unwrap();

        let slot = team
            .transfer_player(&mut store, &listing("jones", "CHE", Position::MF), "smith", 11.0)
            .unwrap();

        assert_eq!(slot, 6);
        assert_eq!(team.funds(), 81.0);
        assert_eq!(team.get_player("jones").unwrap().squad_num, Some(6));
        assert!(team.get_player("smith").is_none());
        assert_eq!(team.ex_players()[0].player_key, "smith");
        assert_eq!(store.member("Alice", "smith", 0).unwrap().slot, None);
        assert_eq!(store.member("Alice", "jones", 0).unwrap().slot, Some(6));
    }

    #[test]
    fn transfer_errors_for_bad_keys() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);
        team.add_player(&mut store, &listing("smith", "ARS", Position::MF), 8.0, SQUAD_SIZE, true)
            .unwrap();

        let err = team
            .transfer_player(&mut store, &listing("jones", "CHE", Position::MF), "nobody", 1.0)
            .unwrap_err();
        assert!(matches!(err, TeamError::PlayerNotFound { .. }));

        let err = team
            .transfer_player(&mut store, &listing("smith", "ARS", Position::MF), "smith", 1.0)
            .unwrap_err();
        assert!(matches!(err, TeamError::DuplicatePlayer { .. }));
    }

    #[test]
    fn replacing_a_placeholder_inherits_its_price() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);
        // Two Spurs players already in the squad: the club is full.
        team.add_player(&mut store, &listing("t1", "TOT", Position::GK), 1.0, SQUAD_SIZE, true)
            .unwrap();
        team.add_player(&mut store, &listing("t2", "TOT", Position::FB), 1.0, SQUAD_SIZE, true)
            .unwrap();
        team.add_player(&mut store, &listing("tmp1", NON_CLUB, Position::ST), 7.0, SQUAD_SIZE, true)
            .unwrap();
        assert_eq!(team.funds(), 91.0);

        // The quoted price is irrelevant: nothing is paid and the
        // placeholder's price carries over, club limit notwithstanding.
        let slot = team
            .transfer_player(&mut store, &listing("kane", "TOT", Position::ST), "tmp1", 99.0)
            .unwrap();

        assert_eq!(slot, 10);
        assert_eq!(team.funds(), 91.0);
        let kane = team.get_player("kane").unwrap();
        assert_eq!(kane.price, 7.0);
        assert_eq!(store.member("Alice", "kane", 0).unwrap().price, 7.0);
    }

    #[test]
    fn transfer_into_a_full_club_fails_after_the_removal() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);
        team.add_player(&mut store, &listing("t1", "TOT", Position::GK), 1.0, SQUAD_SIZE, true)
            .unwrap();
        team.add_player(&mut store, &listing("t2", "TOT", Position::FB), 1.0, SQUAD_SIZE, true)
            .unwrap();
        team.add_player(&mut store, &listing("smith", "ARS", Position::MF), 8.0, SQUAD_SIZE, true)
            .unwrap();

        let err = team
            .transfer_player(&mut store, &listing("son", "TOT", Position::MF), "smith", 5.0)
            .unwrap_err();

        assert!(matches!(err, TeamError::ClubFull { .. }));
        // The removal half of the transfer has already happened; there is
        // no rollback, matching the admin tool's behaviour.
        assert!(team.get_player("smith").is_none());
        assert_eq!(team.ex_players().len(), 1);
    }

    #[test]
    fn update_funds_is_floored_at_zero() {
        let mut store = MemoryStore::new();
        let mut team = new_team(&mut store);
        team.update_funds(&mut store, -250.0).unwrap();
        assert_eq!(team.funds(), 0.0);
        assert_eq!(store.funds_of("Alice"), Some(0.0));
    }

    #[test]
    fn substitution_listing_includes_pivoted_options() {
        let mut store = MemoryStore::new();
        let members = vec![
            team_member("gk0", 0, Position::GK),
            team_member("cb3", 3, Position::CB),
            team_member("gk11", 11, Position::GK),
            team_member("cb13", 13, Position::CB),
            team_member("mf14", 14, Position::MF),
        ];
        let mut team = Team::from_saved("Alice", "Alice United", 50.0, members, Vec::new()).unwrap();

        // The direct swap with 13 and the pivoted swap with 14 (through the
        // vacant slot 5) are substitutions; the bench keeper is not, and
        // vacant bench slots are not.
        assert_eq!(team.valid_substitutions(3), vec![13, 14]);

        team.swap_players(&mut store, 3, 13).unwrap();
        assert_eq!(team.get_player("cb3").unwrap().squad_num, Some(13));
        assert_eq!(team.get_player("cb13").unwrap().squad_num, Some(3));
        assert!(team.can_substitute(3, 13));
        assert!(!team.can_substitute(11, 13));
    }

    fn team_member(key: &str, slot: usize, pos: Position) -> TeamPlayer {
        TeamPlayer::from_listing(&listing(key, "ARS", pos), "Alice", 1.0, slot, 0)
    }
}
