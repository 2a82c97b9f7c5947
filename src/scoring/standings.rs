use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::engine::{league_totals, LeagueTotal, ScoreWarning};
use crate::error::LeagueResult;
use crate::league::Player;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub rank: usize,
    pub player: String, // Player id
    pub name: String,
    pub total: f64,
    pub rounds: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScoreWarning>,
}

/// Order players into a leaderboard.
///
/// Total descending, then name ascending, then id ascending, so the result
/// never depends on input order. Equal totals share a rank (1, 1, 3).
/// Players missing from `totals` score 0.
pub fn build_standings(
    players: &[Player],
    totals: &BTreeMap<String, LeagueTotal>,
) -> Vec<StandingEntry> {
    let mut entries: Vec<StandingEntry> = players
        .iter()
        .map(|player| {
            let (total, rounds, warnings) = match totals.get(&player.id) {
                Some(t) => (t.total, t.rounds, t.warnings.clone()),
                None => (0.0, 0, Vec::new()),
            };
            StandingEntry {
                rank: 0,
                player: player.id.clone(),
                name: player.name.clone(),
                total,
                rounds,
                warnings,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.player.cmp(&b.player))
    });

    let mut previous: Option<(f64, usize)> = None;
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = match previous {
            Some((total, rank)) if total == entry.total => rank,
            _ => index + 1,
        };
        previous = Some((entry.total, entry.rank));
    }

    entries
}

/// Current leaderboard for a league, recomputed from stored allocations and weights
pub async fn standings(store: &Store, league_id: &str) -> LeagueResult<Vec<StandingEntry>> {
    store
        .read(|db| {
            db.require_league(league_id)?;
            let players: Vec<Player> = db.players_in(league_id).cloned().collect();
            let totals = league_totals(db, league_id);
            Ok(build_standings(&players, &totals))
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, name: &str) -> Player {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            league: "l1".to_string(),
        }
    }

    fn totals(entries: &[(&str, f64)]) -> BTreeMap<String, LeagueTotal> {
        entries
            .iter()
            .map(|(id, total)| {
                (
                    id.to_string(),
                    LeagueTotal {
                        league: "l1".to_string(),
                        player: id.to_string(),
                        total: *total,
                        rounds: 1,
                        warnings: Vec::new(),
                    },
                )
            })
            .collect()
    }

    fn names(entries: &[StandingEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_total_descending() {
        let players = vec![player("p1", "A"), player("p2", "B"), player("p3", "C")];
        let standings = build_standings(&players, &totals(&[("p1", 1.0), ("p2", 9.0), ("p3", 4.0)]));
        assert_eq!(names(&standings), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_broken_by_name_not_insertion_order() {
        let players = vec![player("p3", "C"), player("p2", "B"), player("p1", "A")];
        let standings = build_standings(&players, &totals(&[("p1", 10.0), ("p2", 10.0), ("p3", 7.0)]));
        assert_eq!(names(&standings), vec!["A", "B", "C"]);

        let reversed: Vec<Player> = players.into_iter().rev().collect();
        let again = build_standings(&reversed, &totals(&[("p1", 10.0), ("p2", 10.0), ("p3", 7.0)]));
        assert_eq!(standings, again);
    }

    #[test]
    fn test_equal_totals_share_rank() {
        let players = vec![player("p1", "A"), player("p2", "B"), player("p3", "C")];
        let standings = build_standings(&players, &totals(&[("p1", 10.0), ("p2", 10.0), ("p3", 7.0)]));
        let ranks: Vec<usize> = standings.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3]);
    }

    #[test]
    fn test_players_without_rounds_score_zero() {
        let players = vec![player("p1", "A"), player("p2", "B")];
        let standings = build_standings(&players, &totals(&[("p1", -3.0)]));

        assert_eq!(names(&standings), vec!["B", "A"]);
        assert_eq!(standings[0].total, 0.0);
        assert_eq!(standings[0].rounds, 0);
    }

    #[test]
    fn test_same_name_falls_back_to_id() {
        let players = vec![player("p2", "Rand"), player("p1", "Rand")];
        let standings = build_standings(&players, &BTreeMap::new());
        let ids: Vec<&str> = standings.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_empty_league() {
        assert!(build_standings(&[], &BTreeMap::new()).is_empty());
    }
}
