pub mod error;
pub(crate) mod handlers;
pub(crate) mod middleware;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use depth_core::DepthChartService;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DepthChartService>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
    pub cors: bool,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<DepthChartService>) -> Self {
        Self { service, request_id_seed: Arc::new(AtomicU64::new(1)), cors: true }
    }

    #[must_use]
    pub fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz_handler))
        .route("/players", get(handlers::list_players_handler))
        .route("/players/reorder", post(handlers::reorder_players_handler))
        .route("/players/swap", post(handlers::swap_players_handler))
        .route(
            "/players/:id",
            get(handlers::get_player_handler).put(handlers::update_player_handler),
        )
        .route("/players/:id/move", post(handlers::move_player_handler))
        .route("/players/:id/reorder", post(handlers::reorder_player_handler))
        .route("/depth-chart", get(handlers::depth_chart_handler))
        .route("/depth-chart/:phase", get(handlers::phase_depth_chart_handler))
        .route("/formation", get(handlers::formation_handler))
        .route("/positions", get(handlers::positions_handler))
        .route("/statuses", get(handlers::statuses_handler))
        .layer(from_fn_with_state(state.clone(), middleware::cors))
        .layer(from_fn_with_state(state.clone(), middleware::trace_requests))
        .with_state(state)
}
