use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::errors::ApiError;
use crate::application::state::AppState;

/// Success body for `/generate`. Also consumed by the CLI client.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateRequest {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateQuery {
    #[serde(default)]
    title: Option<String>,
}

/// `POST /generate` with a JSON body. A missing or unparseable body is
/// treated the same as a missing title.
#[tracing::instrument(skip(state, payload))]
pub(crate) async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let title = match payload {
        Ok(Json(request)) => request.title,
        Err(rejection) => {
            warn!(error = %rejection, "unparseable generate payload");
            None
        }
    };

    run_generate(&state, title.as_deref()).await
}

/// `GET /generate?title=...`, a convenience for manual testing from a
/// browser or curl.
#[tracing::instrument(skip(state))]
pub(crate) async fn generate_from_query(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<GenerateResponse>, ApiError> {
    run_generate(&state, query.title.as_deref()).await
}

async fn run_generate(
    state: &AppState,
    title: Option<&str>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let thumbnail = state
        .thumbnails
        .generate(title.unwrap_or_default())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(GenerateResponse {
        success: true,
        message: "thumbnail generated successfully".to_string(),
        filename: thumbnail.filename,
        url: thumbnail.url,
    }))
}
