use std::fmt;

use thiserror::Error;

/// Record kinds that can be referenced by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    League,
    Player,
    Round,
    PointWeight,
    PointAllocation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::League => "League",
            EntityKind::Player => "Player",
            EntityKind::Round => "Round",
            EntityKind::PointWeight => "Point weight",
            EntityKind::PointAllocation => "Point allocation",
        };
        write!(f, "{}", name)
    }
}

/// Number of records that still reference a league.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentCounts {
    pub players: usize,
    pub rounds: usize,
    pub point_weights: usize,
    pub point_allocations: usize,
}

impl DependentCounts {
    pub fn is_empty(&self) -> bool {
        self.players == 0 && self.rounds == 0 && self.point_weights == 0 && self.point_allocations == 0
    }
}

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error(
        "League {league} still has {} players, {} rounds, {} point weights and {} point allocations; confirm to delete them all",
        .dependents.players,
        .dependents.rounds,
        .dependents.point_weights,
        .dependents.point_allocations
    )]
    ConfirmationRequired {
        league: String,
        dependents: DependentCounts,
    },

    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl LeagueError {
    pub fn not_found(kind: EntityKind, id: &str) -> Self {
        LeagueError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        LeagueError::Validation(vec![message.into()])
    }
}

impl From<anyhow::Error> for LeagueError {
    fn from(err: anyhow::Error) -> Self {
        LeagueError::Storage(err)
    }
}

pub type LeagueResult<T> = Result<T, LeagueError>;
