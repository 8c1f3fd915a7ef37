use axum::{routing::get, Router};

pub mod error;
pub mod routes;
pub mod state;

use state::AppState;

/// Assemble the route tree: health probe, the games API, and the
/// realtime WebSocket endpoint. CORS is layered on in `main`, where the
/// allowed origin is known.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/games", routes::games::routes())
        .route("/ws", get(routes::websocket::ws_handler))
        .with_state(state)
}
