pub mod generate;
pub mod health;
pub mod stats;
pub mod thumbnails;

use axum::http::{HeaderValue, Request};
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use crate::application::state::AppState;

/// 64 KB request body limit. The only body this API accepts is a small
/// JSON object carrying a title.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

pub fn app_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(health::index))
        .route("/stats", get(stats::get_stats))
        .route(
            "/generate",
            get(generate::generate_from_query).post(generate::generate),
        )
        .route("/thumbnails/{filename}", get(thumbnails::get_thumbnail))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(ThumbgenMakeSpan)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state)
}

#[derive(Clone)]
struct ThumbgenMakeSpan;

impl<B> MakeSpan<B> for ThumbgenMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}
