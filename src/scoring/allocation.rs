use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};

use super::types::{normalize_category, AllocationPayload, PointAllocation};
use super::validation::validate_allocation;
use crate::error::{LeagueError, LeagueResult};
use crate::league::new_id;
use crate::store::Store;

/// Record (or re-record) a player's scoring for one round.
///
/// Upsert keyed by (league, round, player): an existing allocation keeps its id
/// and has its counts and total replaced, never merged. All checks run before
/// the write, so a rejected call leaves the store untouched.
pub async fn record_allocation(
    store: &Store,
    league_id: &str,
    round_id: &str,
    player_id: &str,
    payload: AllocationPayload,
) -> LeagueResult<PointAllocation> {
    let (allocation, replaced) = store
        .write(|db| {
            db.require_league(league_id)?;
            let round = db.require_round(round_id)?;
            let player = db.require_player(player_id)?;

            let mut errors = Vec::new();
            if round.league != league_id {
                errors.push(format!(
                    "round {} does not belong to league {}",
                    round_id, league_id
                ));
            }
            if player.league != league_id {
                errors.push(format!(
                    "player {} does not belong to league {}",
                    player_id, league_id
                ));
            }
            if !round.has_participant(player_id) {
                errors.push(format!(
                    "player {} did not play in round {}",
                    player_id, round_id
                ));
            }
            if let Err(payload_errors) = validate_allocation(&payload) {
                errors.extend(payload_errors);
            }
            if !errors.is_empty() {
                return Err(LeagueError::Validation(errors));
            }

            let counts: BTreeMap<String, u32> = payload
                .counts
                .unwrap_or_default()
                .into_iter()
                .map(|(category, count)| (normalize_category(&category), count))
                .collect();

            let existing = db.find_allocation(league_id, round_id, player_id).cloned();
            let replaced = existing.is_some();
            let allocation = PointAllocation {
                id: existing
                    .as_ref()
                    .map(|a| a.id.clone())
                    .unwrap_or_else(new_id),
                league: league_id.to_string(),
                round: round_id.to_string(),
                player: player_id.to_string(),
                counts,
                total: payload.total,
                updated_at: Utc::now(),
            };

            // Unchanged resubmission keeps the stored record as it was
            if let Some(previous) = existing.filter(|a| a.same_content(&allocation)) {
                return Ok((previous, true));
            }

            db.point_allocations
                .insert(allocation.id.clone(), allocation.clone());
            Ok((allocation, replaced))
        })
        .await?;

    if replaced {
        info!(
            "Replaced allocation for player {} in round {}",
            player_id, round_id
        );
    } else {
        debug!(
            "Recorded allocation for player {} in round {}",
            player_id, round_id
        );
    }

    Ok(allocation)
}

/// All allocations recorded for a round, ordered by player id
pub async fn find_allocations_by_round(
    store: &Store,
    league_id: &str,
    round_id: &str,
) -> LeagueResult<Vec<PointAllocation>> {
    store
        .read(|db| {
            db.require_league(league_id)?;
            db.require_round_in(league_id, round_id)?;

            let mut allocations: Vec<PointAllocation> = db
                .allocations_in(league_id)
                .filter(|a| a.round == round_id)
                .cloned()
                .collect();
            allocations.sort_by(|a, b| a.player.cmp(&b.player));
            Ok(allocations)
        })
        .await
}
