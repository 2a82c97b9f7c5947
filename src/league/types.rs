use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::PointWeight;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub league: String, // Owning league id, fixed at creation
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: String,
    pub league: String,
    pub name: String,
    pub course: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub players: Vec<String>, // Participant player ids, no duplicates
}

impl Round {
    pub fn has_participant(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeague {
    pub name: String,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRound {
    pub name: String,
    #[serde(alias = "courseName")]
    pub course: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub players: Vec<String>,
}

/// A league together with everything that references it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueDetail {
    #[serde(flatten)]
    pub league: League,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub points: Vec<PointWeight>,
}

/// What a confirmed league deletion removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionSummary {
    pub league: String,
    pub players: usize,
    pub rounds: usize,
    pub point_weights: usize,
    pub point_allocations: usize,
}
