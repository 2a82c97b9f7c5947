//! League, player and round records.
//!
//! Leagues do not contain their players, rounds or weights. Those records point
//! back at their league, and the reverse direction is always an explicit query
//! such as [`find_players_by_league`].

pub mod types;

pub use types::{DeletionSummary, League, LeagueDetail, NewLeague, NewPlayer, NewRound, Player, Round};

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EntityKind, LeagueError, LeagueResult};
use crate::scoring::weights::sorted_weights;
use crate::store::Store;

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn required_name(field: &str, value: &str, errors: &mut Vec<String>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(format!("{}: must not be empty", field));
    }
    trimmed.to_string()
}

pub async fn create_league(store: &Store, input: NewLeague) -> LeagueResult<League> {
    let mut errors = Vec::new();
    let name = required_name("name", &input.name, &mut errors);
    if !errors.is_empty() {
        return Err(LeagueError::Validation(errors));
    }

    let league = League {
        id: new_id(),
        name,
        end_date: input.end_date,
    };

    let created = league.clone();
    store
        .write(move |db| {
            db.leagues.insert(league.id.clone(), league);
            Ok(())
        })
        .await?;

    info!("Created league {} ({})", created.name, created.id);
    Ok(created)
}

/// All leagues sorted by name, then id
pub async fn list_leagues(store: &Store) -> Vec<League> {
    let mut leagues: Vec<League> = store.read(|db| db.leagues.values().cloned().collect()).await;
    leagues.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    leagues
}

pub async fn get_league(store: &Store, league_id: &str) -> LeagueResult<League> {
    store
        .read(|db| db.require_league(league_id).cloned())
        .await
}

/// A league with its players, rounds and point weights resolved
pub async fn league_detail(store: &Store, league_id: &str) -> LeagueResult<LeagueDetail> {
    store
        .read(|db| {
            let league = db.require_league(league_id)?.clone();
            let mut players: Vec<Player> = db.players_in(league_id).cloned().collect();
            sort_players(&mut players);
            let mut rounds: Vec<Round> = db.rounds_in(league_id).cloned().collect();
            sort_rounds(&mut rounds);
            let points = sorted_weights(db.weights_in(league_id).cloned().collect());

            Ok(LeagueDetail {
                league,
                players,
                rounds,
                points,
            })
        })
        .await
}

/// Delete a league.
///
/// A league that still has players, rounds, weights or allocations is only
/// deleted when `confirm` is set; the dependents are then removed with it in
/// one write.
pub async fn delete_league(
    store: &Store,
    league_id: &str,
    confirm: bool,
) -> LeagueResult<DeletionSummary> {
    let summary = store
        .write(|db| {
            db.require_league(league_id)?;

            let dependents = db.dependents_of(league_id);
            if !dependents.is_empty() && !confirm {
                return Err(LeagueError::ConfirmationRequired {
                    league: league_id.to_string(),
                    dependents,
                });
            }

            Ok(db.remove_league_cascade(league_id))
        })
        .await?;

    info!(
        "Deleted league {} with {} players, {} rounds, {} point weights, {} point allocations",
        summary.league,
        summary.players,
        summary.rounds,
        summary.point_weights,
        summary.point_allocations
    );
    Ok(summary)
}

pub async fn create_player(store: &Store, league_id: &str, input: NewPlayer) -> LeagueResult<Player> {
    let mut errors = Vec::new();
    let name = required_name("name", &input.name, &mut errors);
    if !errors.is_empty() {
        return Err(LeagueError::Validation(errors));
    }

    let player = store
        .write(|db| {
            db.require_league(league_id)?;
            let player = Player {
                id: new_id(),
                name,
                league: league_id.to_string(),
            };
            db.players.insert(player.id.clone(), player.clone());
            Ok(player)
        })
        .await?;

    debug!("Added player {} to league {}", player.id, league_id);
    Ok(player)
}

pub async fn get_player(store: &Store, league_id: &str, player_id: &str) -> LeagueResult<Player> {
    store
        .read(|db| {
            db.require_league(league_id)?;
            db.require_player_in(league_id, player_id).cloned()
        })
        .await
}

/// Players of a league sorted by name, then id
pub async fn find_players_by_league(store: &Store, league_id: &str) -> LeagueResult<Vec<Player>> {
    store
        .read(|db| {
            db.require_league(league_id)?;
            let mut players: Vec<Player> = db.players_in(league_id).cloned().collect();
            sort_players(&mut players);
            Ok(players)
        })
        .await
}

pub async fn create_round(store: &Store, league_id: &str, input: NewRound) -> LeagueResult<Round> {
    let mut errors = Vec::new();
    let name = required_name("name", &input.name, &mut errors);
    let course = required_name("course", &input.course, &mut errors);

    let round = store
        .write(|db| {
            db.require_league(league_id)?;

            let mut participants: Vec<String> = Vec::new();
            for player_id in &input.players {
                match db.players.get(player_id) {
                    None => errors.push(format!("players: unknown player '{}'", player_id)),
                    Some(p) if p.league != league_id => errors.push(format!(
                        "players: player '{}' does not belong to league {}",
                        player_id, league_id
                    )),
                    Some(_) if participants.contains(player_id) => {}
                    Some(_) => participants.push(player_id.clone()),
                }
            }
            if !errors.is_empty() {
                return Err(LeagueError::Validation(errors));
            }

            let round = Round {
                id: new_id(),
                league: league_id.to_string(),
                name,
                course,
                date: input.date,
                players: participants,
            };
            db.rounds.insert(round.id.clone(), round.clone());
            Ok(round)
        })
        .await?;

    debug!(
        "Added round {} to league {} with {} players",
        round.id,
        league_id,
        round.players.len()
    );
    Ok(round)
}

pub async fn get_round(store: &Store, league_id: &str, round_id: &str) -> LeagueResult<Round> {
    store
        .read(|db| {
            db.require_league(league_id)?;
            db.require_round_in(league_id, round_id).cloned()
        })
        .await
}

/// Rounds of a league sorted by date, then name
pub async fn find_rounds_by_league(store: &Store, league_id: &str) -> LeagueResult<Vec<Round>> {
    store
        .read(|db| {
            db.require_league(league_id)?;
            let mut rounds: Vec<Round> = db.rounds_in(league_id).cloned().collect();
            sort_rounds(&mut rounds);
            Ok(rounds)
        })
        .await
}

/// Add a player to a round's participants. Adding an existing participant is a no-op.
pub async fn add_round_participant(
    store: &Store,
    league_id: &str,
    round_id: &str,
    player_id: &str,
) -> LeagueResult<Round> {
    store
        .write(|db| {
            db.require_league(league_id)?;
            db.require_round_in(league_id, round_id)?;
            db.require_player_in(league_id, player_id)?;

            let round = db
                .rounds
                .get_mut(round_id)
                .ok_or_else(|| LeagueError::not_found(EntityKind::Round, round_id))?;
            if !round.has_participant(player_id) {
                round.players.push(player_id.to_string());
            }
            Ok(round.clone())
        })
        .await
}

fn sort_players(players: &mut [Player]) {
    players.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
}

fn sort_rounds(rounds: &mut [Round]) {
    rounds.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
}
