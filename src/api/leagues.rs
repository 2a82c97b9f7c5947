use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{ApiResult, AppState};
use crate::league::{self, League, LeagueDetail, NewLeague, NewPlayer, NewRound, Player, Round};

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn list_leagues_handler(State(state): State<AppState>) -> Json<Vec<League>> {
    Json(league::list_leagues(&state.store).await)
}

pub async fn create_league_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewLeague>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<League>)> {
    let Json(input) = payload?;
    let created = league::create_league(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_league_handler(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> ApiResult<Json<LeagueDetail>> {
    Ok(Json(league::league_detail(&state.store, &league_id).await?))
}

pub async fn delete_league_handler(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> ApiResult<StatusCode> {
    let Query(params) = params?;
    league::delete_league(&state.store, &league_id, params.confirm).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_players_handler(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> ApiResult<Json<Vec<Player>>> {
    Ok(Json(
        league::find_players_by_league(&state.store, &league_id).await?,
    ))
}

pub async fn create_player_handler(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    payload: Result<Json<NewPlayer>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Player>)> {
    let Json(input) = payload?;
    let created = league::create_player(&state.store, &league_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_player_handler(
    State(state): State<AppState>,
    Path((league_id, player_id)): Path<(String, String)>,
) -> ApiResult<Json<Player>> {
    Ok(Json(
        league::get_player(&state.store, &league_id, &player_id).await?,
    ))
}

pub async fn list_rounds_handler(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> ApiResult<Json<Vec<Round>>> {
    Ok(Json(
        league::find_rounds_by_league(&state.store, &league_id).await?,
    ))
}

pub async fn create_round_handler(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    payload: Result<Json<NewRound>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Round>)> {
    let Json(input) = payload?;
    let created = league::create_round(&state.store, &league_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_round_handler(
    State(state): State<AppState>,
    Path((league_id, round_id)): Path<(String, String)>,
) -> ApiResult<Json<Round>> {
    Ok(Json(
        league::get_round(&state.store, &league_id, &round_id).await?,
    ))
}

pub async fn add_round_participant_handler(
    State(state): State<AppState>,
    Path((league_id, round_id, player_id)): Path<(String, String, String)>,
) -> ApiResult<Json<Round>> {
    let round =
        league::add_round_participant(&state.store, &league_id, &round_id, &player_id).await?;
    Ok(Json(round))
}
