use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use depth_core::{
    status_key, ApplyReport, DepthChartService, DepthChartView, FormationSlot, Phase, Player,
    PlayerId, Position, StatusKeyEntry,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use super::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Run a service call off the async executor; stores may touch the disk.
async fn blocking<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&DepthChartService) -> depth_core::Result<T> + Send + 'static,
{
    let service: Arc<DepthChartService> = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|e| ApiError::internal(format!("worker failed: {e}")))?
        .map_err(ApiError::from)
}

/// A path id that is not a UUID cannot name a stored player.
fn lookup_id(raw: &str) -> Result<PlayerId, ApiError> {
    raw.parse::<PlayerId>().map_err(|_| ApiError::not_found(format!("Player not found: {raw}")))
}

pub(crate) async fn healthz_handler() -> &'static str {
    "ok"
}

pub(crate) async fn list_players_handler(State(state): State<AppState>) -> ApiResult<Vec<Player>> {
    blocking(&state, |service| service.list_players()).await.map(Json)
}

pub(crate) async fn get_player_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Player> {
    let id = lookup_id(&raw_id)?;
    blocking(&state, move |service| service.get_player(id)).await.map(Json)
}

pub(crate) async fn update_player_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Player>, JsonRejection>,
) -> ApiResult<Player> {
    let Json(player) = payload?;
    let id = raw_id.parse::<PlayerId>().map_err(|_| {
        ApiError::invalid_request(format!("path id {raw_id} does not match body id {}", player.id))
    })?;
    blocking(&state, move |service| service.update_player(id, player)).await.map(Json)
}

pub(crate) async fn reorder_players_handler(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Player>>, JsonRejection>,
) -> ApiResult<ApplyReport> {
    let Json(players) = payload?;
    blocking(&state, move |service| service.reorder_batch(players)).await.map(Json)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SwapRequest {
    pub player1_id: String,
    pub player2_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SwapResponse {
    pub player1: Player,
    pub player2: Player,
}

pub(crate) async fn swap_players_handler(
    State(state): State<AppState>,
    payload: Result<Json<SwapRequest>, JsonRejection>,
) -> ApiResult<SwapResponse> {
    let Json(request) = payload?;
    let first = lookup_id(&request.player1_id)?;
    let second = lookup_id(&request.player2_id)?;

    let (player1, player2) =
        blocking(&state, move |service| service.swap_players(first, second)).await?;
    Ok(Json(SwapResponse { player1, player2 }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoveRequest {
    pub position: Position,
    #[serde(default)]
    pub order: Option<u32>,
}

pub(crate) async fn move_player_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResult<Vec<Player>> {
    let id = lookup_id(&raw_id)?;
    let Json(request) = payload?;
    blocking(&state, move |service| service.move_player(id, request.position, request.order))
        .await
        .map(Json)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReorderRequest {
    pub order: u32,
}

pub(crate) async fn reorder_player_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> ApiResult<Vec<Player>> {
    let id = lookup_id(&raw_id)?;
    let Json(request) = payload?;
    blocking(&state, move |service| service.reorder_player(id, request.order)).await.map(Json)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DepthQuery {
    pub depth: Option<usize>,
}

pub(crate) async fn depth_chart_handler(
    State(state): State<AppState>,
    Query(query): Query<DepthQuery>,
) -> ApiResult<DepthChartView> {
    blocking(&state, move |service| service.depth_chart(None, query.depth)).await.map(Json)
}

pub(crate) async fn phase_depth_chart_handler(
    State(state): State<AppState>,
    Path(raw_phase): Path<String>,
    Query(query): Query<DepthQuery>,
) -> ApiResult<DepthChartView> {
    let phase = raw_phase.parse::<Phase>()?;
    blocking(&state, move |service| service.depth_chart(Some(phase), query.depth))
        .await
        .map(Json)
}

pub(crate) async fn formation_handler(State(state): State<AppState>) -> ApiResult<Vec<FormationSlot>> {
    blocking(&state, |service| service.formation()).await.map(Json)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PositionInfo {
    pub code: Position,
    pub display_name: &'static str,
    pub group: &'static str,
    pub phase: Phase,
}

pub(crate) async fn positions_handler() -> Json<Vec<PositionInfo>> {
    let positions = Position::ALL
        .iter()
        .map(|p| PositionInfo {
            code: *p,
            display_name: p.display_name(),
            group: p.group().name,
            phase: p.phase(),
        })
        .collect();
    Json(positions)
}

pub(crate) async fn statuses_handler() -> Json<Vec<StatusKeyEntry>> {
    Json(status_key())
}
