use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::{ApiResult, AppState};
use crate::scoring::{
    self, AllocationPayload, LeagueTotal, PointAllocation, PointWeight, ScoreResult,
    StandingEntry, WeightInput,
};

pub async fn set_weight_handler(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    payload: Result<Json<WeightInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PointWeight>)> {
    let Json(input) = payload?;
    let saved = scoring::set_weight(&state.store, &league_id, &input.category, input.weight).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn list_weights_handler(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> ApiResult<Json<Vec<PointWeight>>> {
    Ok(Json(scoring::get_weights(&state.store, &league_id).await?))
}

pub async fn record_allocation_handler(
    State(state): State<AppState>,
    Path((league_id, round_id, player_id)): Path<(String, String, String)>,
    payload: Result<Json<AllocationPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PointAllocation>)> {
    let Json(input) = payload?;
    let saved =
        scoring::record_allocation(&state.store, &league_id, &round_id, &player_id, input).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn list_allocations_handler(
    State(state): State<AppState>,
    Path((league_id, round_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<PointAllocation>>> {
    Ok(Json(
        scoring::find_allocations_by_round(&state.store, &league_id, &round_id).await?,
    ))
}

pub async fn round_total_handler(
    State(state): State<AppState>,
    Path((league_id, round_id, player_id)): Path<(String, String, String)>,
) -> ApiResult<Json<ScoreResult>> {
    Ok(Json(
        scoring::round_total(&state.store, &league_id, &round_id, &player_id).await?,
    ))
}

pub async fn league_total_handler(
    State(state): State<AppState>,
    Path((league_id, player_id)): Path<(String, String)>,
) -> ApiResult<Json<LeagueTotal>> {
    Ok(Json(
        scoring::league_total(&state.store, &league_id, &player_id).await?,
    ))
}

pub async fn standings_handler(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> ApiResult<Json<Vec<StandingEntry>>> {
    Ok(Json(scoring::standings(&state.store, &league_id).await?))
}
