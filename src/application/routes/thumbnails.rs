use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::errors::ApiError;
use crate::application::state::AppState;

/// Serve a generated thumbnail as raw JPEG bytes. Filenames are validated
/// before touching the filesystem; anything that does not look like one of
/// our generated names is rejected.
#[tracing::instrument(skip(state))]
pub(crate) async fn get_thumbnail(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state
        .thumbnails
        .thumbnail(&filename)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()))
}
