use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::app_state::AppState;

pub mod transaction_api;

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(transaction_api::commit_transaction))
        .route("/transactions", get(transaction_api::list_transactions))
        .route("/healthz", get(transaction_api::healthz))
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(LatencyUnit::Millis),
                    ),
            ),
        )
        .with_state(state)
}
