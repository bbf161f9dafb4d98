use axum::Json;
use axum::extract::State;

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::stats::TrendStats;

/// Expose the trending statistics the service currently applies, mostly so
/// operators can verify what the analysis job last wrote.
#[tracing::instrument(skip(state))]
pub(crate) async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<TrendStats>, ApiError> {
    match state.thumbnails.stats().await {
        Some(stats) => Ok(Json(stats)),
        None => Err(AppError::not_found("no trending statistics available").into()),
    }
}
