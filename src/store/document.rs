use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DependentCounts, EntityKind, LeagueError, LeagueResult};
use crate::league::{DeletionSummary, League, Player, Round};
use crate::scoring::{PointAllocation, PointWeight};

pub const DOCUMENT_VERSION: u32 = 1;

/// The whole persisted league document. One collection per record type, keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub version: u32,
    #[serde(default)]
    pub leagues: BTreeMap<String, League>,
    #[serde(default)]
    pub players: BTreeMap<String, Player>,
    #[serde(default)]
    pub rounds: BTreeMap<String, Round>,
    #[serde(default)]
    pub point_weights: BTreeMap<String, PointWeight>,
    #[serde(default)]
    pub point_allocations: BTreeMap<String, PointAllocation>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// Create a new empty document with the current version
    pub fn new() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            leagues: BTreeMap::new(),
            players: BTreeMap::new(),
            rounds: BTreeMap::new(),
            point_weights: BTreeMap::new(),
            point_allocations: BTreeMap::new(),
        }
    }

    pub fn require_league(&self, id: &str) -> LeagueResult<&League> {
        self.leagues
            .get(id)
            .ok_or_else(|| LeagueError::not_found(EntityKind::League, id))
    }

    pub fn require_player(&self, id: &str) -> LeagueResult<&Player> {
        self.players
            .get(id)
            .ok_or_else(|| LeagueError::not_found(EntityKind::Player, id))
    }

    pub fn require_round(&self, id: &str) -> LeagueResult<&Round> {
        self.rounds
            .get(id)
            .ok_or_else(|| LeagueError::not_found(EntityKind::Round, id))
    }

    /// Player lookup that also enforces league membership
    pub fn require_player_in(&self, league_id: &str, player_id: &str) -> LeagueResult<&Player> {
        let player = self.require_player(player_id)?;
        if player.league != league_id {
            return Err(LeagueError::invalid(format!(
                "player {} does not belong to league {}",
                player_id, league_id
            )));
        }
        Ok(player)
    }

    /// Round lookup that also enforces league membership
    pub fn require_round_in(&self, league_id: &str, round_id: &str) -> LeagueResult<&Round> {
        let round = self.require_round(round_id)?;
        if round.league != league_id {
            return Err(LeagueError::invalid(format!(
                "round {} does not belong to league {}",
                round_id, league_id
            )));
        }
        Ok(round)
    }

    pub fn players_in<'a>(&'a self, league_id: &'a str) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.values().filter(move |p| p.league == league_id)
    }

    pub fn rounds_in<'a>(&'a self, league_id: &'a str) -> impl Iterator<Item = &'a Round> + 'a {
        self.rounds.values().filter(move |r| r.league == league_id)
    }

    pub fn weights_in<'a>(
        &'a self,
        league_id: &'a str,
    ) -> impl Iterator<Item = &'a PointWeight> + 'a {
        self.point_weights.values().filter(move |w| w.league == league_id)
    }

    pub fn allocations_in<'a>(
        &'a self,
        league_id: &'a str,
    ) -> impl Iterator<Item = &'a PointAllocation> + 'a {
        self.point_allocations
            .values()
            .filter(move |a| a.league == league_id)
    }

    /// Weight keyed by its natural key (league, category)
    pub fn find_weight(&self, league_id: &str, category: &str) -> Option<&PointWeight> {
        self.point_weights
            .values()
            .find(|w| w.league == league_id && w.category == category)
    }

    /// Allocation keyed by its natural key (league, round, player)
    pub fn find_allocation(
        &self,
        league_id: &str,
        round_id: &str,
        player_id: &str,
    ) -> Option<&PointAllocation> {
        self.point_allocations
            .values()
            .find(|a| a.league == league_id && a.round == round_id && a.player == player_id)
    }

    pub fn dependents_of(&self, league_id: &str) -> DependentCounts {
        DependentCounts {
            players: self.players_in(league_id).count(),
            rounds: self.rounds_in(league_id).count(),
            point_weights: self.weights_in(league_id).count(),
            point_allocations: self.allocations_in(league_id).count(),
        }
    }

    /// Remove a league and every record that references it
    pub fn remove_league_cascade(&mut self, league_id: &str) -> DeletionSummary {
        let dependents = self.dependents_of(league_id);

        self.players.retain(|_, p| p.league != league_id);
        self.rounds.retain(|_, r| r.league != league_id);
        self.point_weights.retain(|_, w| w.league != league_id);
        self.point_allocations.retain(|_, a| a.league != league_id);
        self.leagues.remove(league_id);

        DeletionSummary {
            league: league_id.to_string(),
            players: dependents.players,
            rounds: dependents.rounds,
            point_weights: dependents.point_weights,
            point_allocations: dependents.point_allocations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn sample_database() -> Database {
        let mut db = Database::new();
        for league in ["l1", "l2"] {
            db.leagues.insert(
                league.to_string(),
                League {
                    id: league.to_string(),
                    name: format!("League {}", league),
                    end_date: None,
                },
            );
        }
        db.players.insert(
            "p1".to_string(),
            Player {
                id: "p1".to_string(),
                name: "Rand".to_string(),
                league: "l1".to_string(),
            },
        );
        db.players.insert(
            "p2".to_string(),
            Player {
                id: "p2".to_string(),
                name: "Mat".to_string(),
                league: "l2".to_string(),
            },
        );
        db.rounds.insert(
            "r1".to_string(),
            Round {
                id: "r1".to_string(),
                league: "l1".to_string(),
                name: "Classic".to_string(),
                course: "Two Rivers".to_string(),
                date: NaiveDate::from_ymd_opt(2018, 4, 15).unwrap(),
                players: vec!["p1".to_string()],
            },
        );
        db.point_weights.insert(
            "w1".to_string(),
            PointWeight {
                id: "w1".to_string(),
                league: "l1".to_string(),
                category: "eagle".to_string(),
                weight: 5.0,
            },
        );
        db.point_allocations.insert(
            "a1".to_string(),
            PointAllocation {
                id: "a1".to_string(),
                league: "l1".to_string(),
                round: "r1".to_string(),
                player: "p1".to_string(),
                counts: BTreeMap::from([("eagle".to_string(), 1)]),
                total: None,
                updated_at: Utc::now(),
            },
        );
        db
    }

    #[test]
    fn test_new_database_empty() {
        let db = Database::new();
        assert_eq!(db.version, DOCUMENT_VERSION);
        assert!(db.leagues.is_empty());
        assert!(db.point_allocations.is_empty());
    }

    #[test]
    fn test_require_player_in_other_league() {
        let db = sample_database();
        assert!(db.require_player_in("l1", "p1").is_ok());
        assert!(matches!(
            db.require_player_in("l1", "p2"),
            Err(LeagueError::Validation(_))
        ));
        assert!(matches!(
            db.require_player_in("l1", "missing"),
            Err(LeagueError::NotFound { kind: EntityKind::Player, .. })
        ));
    }

    #[test]
    fn test_find_by_natural_keys() {
        let db = sample_database();
        assert_eq!(db.find_weight("l1", "eagle").map(|w| w.id.as_str()), Some("w1"));
        assert!(db.find_weight("l2", "eagle").is_none());
        assert!(db.find_allocation("l1", "r1", "p1").is_some());
        assert!(db.find_allocation("l1", "r1", "p2").is_none());
        assert!(db.find_allocation("l2", "r1", "p1").is_none());

        // Results borrow the document, not the key arguments
        let (weight, allocation) = {
            let league = String::from("l1");
            (
                db.find_weight(&league, "eagle"),
                db.find_allocation(&league, "r1", "p1"),
            )
        };
        assert_eq!(weight.map(|w| w.weight), Some(5.0));
        assert_eq!(allocation.map(|a| a.id.as_str()), Some("a1"));
    }

    #[test]
    fn test_remove_league_cascade_keeps_other_leagues() {
        let mut db = sample_database();
        let summary = db.remove_league_cascade("l1");

        assert_eq!(summary.players, 1);
        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.point_weights, 1);
        assert_eq!(summary.point_allocations, 1);
        assert!(!db.leagues.contains_key("l1"));
        assert!(db.leagues.contains_key("l2"));
        assert!(db.players.contains_key("p2"));
        assert!(db.dependents_of("l1").is_empty());
    }
}
