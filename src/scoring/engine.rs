use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::types::PointAllocation;
use super::weights::{weight_table, WeightTable};
use crate::error::{EntityKind, LeagueError, LeagueResult};
use crate::store::{Database, Store};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryContribution {
    pub category: String,
    pub count: u32,
    pub weight: Option<f64>, // None when the league has no weight for this category
    pub points: f64,         // count * weight, 0 when unweighted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TotalSource {
    /// The allocation carried a total; counts were not consulted
    Precomputed,
    /// Sum of count * weight over every category in the allocation
    Weighted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub source: TotalSource,
    pub contributions: Vec<CategoryContribution>,
}

/// Non-fatal scoring problems. The score is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScoreWarning {
    #[serde(rename_all = "camelCase")]
    MissingWeight {
        round: String,
        category: String,
        count: u32,
    },
}

impl fmt::Display for ScoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreWarning::MissingWeight {
                round,
                category,
                count,
            } => write!(
                f,
                "round {}: no weight configured for '{}' ({} events scored as 0)",
                round, category, count
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub round: String,
    pub player: String,
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScoreWarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueTotal {
    pub league: String,
    pub player: String,
    pub total: f64,
    pub rounds: usize, // Rounds with an allocation for this player
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScoreWarning>,
}

impl LeagueTotal {
    fn empty(league: &str, player: &str) -> Self {
        Self {
            league: league.to_string(),
            player: player.to_string(),
            total: 0.0,
            rounds: 0,
            warnings: Vec::new(),
        }
    }

    fn add(&mut self, result: ScoreResult) {
        self.total += result.total;
        self.rounds += 1;
        self.warnings.extend(result.warnings);
    }
}

/// Score one allocation against a league's weights.
///
/// A precomputed total wins. Otherwise every counted category contributes
/// `count * weight`; categories without a configured weight contribute 0 and
/// produce a warning instead of an error.
pub fn calculate_round_score(allocation: &PointAllocation, weights: &WeightTable) -> ScoreResult {
    if let Some(total) = allocation.total {
        return ScoreResult {
            round: allocation.round.clone(),
            player: allocation.player.clone(),
            total,
            breakdown: ScoreBreakdown {
                source: TotalSource::Precomputed,
                contributions: Vec::new(),
            },
            warnings: Vec::new(),
        };
    }

    let mut total = 0.0;
    let mut contributions = Vec::with_capacity(allocation.counts.len());
    let mut warnings = Vec::new();

    for (category, &count) in &allocation.counts {
        let weight = weights.get(category);
        let points = match weight {
            Some(w) => w * f64::from(count),
            None => {
                warn!(
                    round = %allocation.round,
                    player = %allocation.player,
                    "No weight configured for category '{}', scoring {} events as 0",
                    category,
                    count
                );
                warnings.push(ScoreWarning::MissingWeight {
                    round: allocation.round.clone(),
                    category: category.clone(),
                    count,
                });
                0.0
            }
        };
        total += points;
        contributions.push(CategoryContribution {
            category: category.clone(),
            count,
            weight,
            points,
        });
    }

    ScoreResult {
        round: allocation.round.clone(),
        player: allocation.player.clone(),
        total,
        breakdown: ScoreBreakdown {
            source: TotalSource::Weighted,
            contributions,
        },
        warnings,
    }
}

/// League totals for every player with at least one allocation, keyed by player id
pub(crate) fn league_totals(db: &Database, league_id: &str) -> BTreeMap<String, LeagueTotal> {
    let weights = weight_table(db, league_id);
    let mut totals: BTreeMap<String, LeagueTotal> = BTreeMap::new();

    for allocation in db.allocations_in(league_id) {
        if !db.rounds.contains_key(&allocation.round) {
            continue;
        }
        let result = calculate_round_score(allocation, &weights);
        totals
            .entry(allocation.player.clone())
            .or_insert_with(|| LeagueTotal::empty(league_id, &allocation.player))
            .add(result);
    }

    totals
}

/// Points for one player in one round.
pub async fn round_total(
    store: &Store,
    league_id: &str,
    round_id: &str,
    player_id: &str,
) -> LeagueResult<ScoreResult> {
    store
        .read(|db| {
            db.require_league(league_id)?;
            db.require_round_in(league_id, round_id)?;
            db.require_player_in(league_id, player_id)?;

            let allocation = db
                .find_allocation(league_id, round_id, player_id)
                .ok_or_else(|| {
                    LeagueError::not_found(
                        EntityKind::PointAllocation,
                        &format!("{}/{}", round_id, player_id),
                    )
                })?;

            let weights = weight_table(db, league_id);
            Ok(calculate_round_score(allocation, &weights))
        })
        .await
}

/// Points for one player summed over every round of the league they have an
/// allocation for. A player with no recorded rounds totals 0.
pub async fn league_total(
    store: &Store,
    league_id: &str,
    player_id: &str,
) -> LeagueResult<LeagueTotal> {
    store
        .read(|db| {
            db.require_league(league_id)?;
            db.require_player_in(league_id, player_id)?;

            Ok(league_totals(db, league_id)
                .remove(player_id)
                .unwrap_or_else(|| LeagueTotal::empty(league_id, player_id)))
        })
        .await
}
