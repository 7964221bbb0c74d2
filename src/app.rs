use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{health, home, investments};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::<AppState>::new()
        .merge(home::router())
        .nest("/health", health::router())
        .nest("/investments", investments::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
