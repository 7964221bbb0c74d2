use axum::routing::get;
use axum::Router;
use tracing::debug;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

// Liveness only; the record store is not contacted.
async fn health() -> &'static str {
    debug!("GET /health");
    "OK"
}
