//! # depth_server - HTTP API for the depth chart
//!
//! Thin axum transport over [`depth_core::DepthChartService`].

pub mod config;
pub mod http;

pub use config::ServerConfig;
pub use http::{build_router, ApiError, AppState};

use depth_core::{seed, DepthChartService, FileStore, MemoryStore, Player, PlayerStore};
use std::sync::Arc;

/// Build the service described by `config`: load the seed, pick the store,
/// apply the batch mode.
pub fn build_service(config: &ServerConfig) -> anyhow::Result<DepthChartService> {
    let initial: Vec<Player> = match &config.seed {
        Some(path) => seed::load_seed(path)?,
        None => Vec::new(),
    };

    let store: Arc<dyn PlayerStore> = match &config.snapshot {
        Some(path) => Arc::new(FileStore::open(path, initial)?),
        None => Arc::new(MemoryStore::new(initial)),
    };

    Ok(DepthChartService::new(store).with_batch_mode(config.batch_mode))
}
