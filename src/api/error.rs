use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::LeagueError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    League(#[from] LeagueError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedPayload(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedPayload(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::League(LeagueError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::League(LeagueError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::League(LeagueError::ConfirmationRequired { .. }) => StatusCode::CONFLICT,
            ApiError::League(LeagueError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::League(LeagueError::Validation(errors)) => json!({
                "error": self.to_string(),
                "details": errors,
            }),
            ApiError::League(LeagueError::ConfirmationRequired { dependents, .. }) => json!({
                "error": self.to_string(),
                "dependents": dependents,
            }),
            ApiError::League(LeagueError::Storage(_)) => {
                error!("{}", self);
                json!({ "error": "Failed to save league data" })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
