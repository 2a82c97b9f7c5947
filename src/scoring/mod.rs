pub mod allocation;
pub mod engine;
pub mod standings;
pub mod types;
pub mod validation;
pub mod weights;

pub use allocation::{find_allocations_by_round, record_allocation};
pub use engine::{calculate_round_score, league_total, round_total, LeagueTotal, ScoreResult, ScoreWarning};
pub use standings::{build_standings, standings, StandingEntry};
pub use types::*;
pub use validation::{validate_allocation, validate_weight};
pub use weights::{get_weights, set_weight, WeightTable};
