use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiBanner {
    pub message: &'static str,
}

/// Liveness banner. The message is fixed; existing callers match on it.
pub(crate) async fn index() -> Json<ApiBanner> {
    Json(ApiBanner {
        message: "Thumbnail API is running!",
    })
}
