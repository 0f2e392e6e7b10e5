//! Ping Handler
//!
//! 健康检查，附带远程表服务是否可达

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize, ToSchema)]
pub struct PingResponse {
    /// ok / degraded
    #[schema(value_type = String)]
    pub status: &'static str,
    #[schema(value_type = String)]
    pub version: &'static str,
    pub remote: bool,
}

/// Ping endpoint - 健康检查
#[utoipa::path(
    get,
    path = "/ping",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up; `remote` tells whether the table service answers", body = PingResponse),
    )
)]
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let remote = state.remote.health_check().await;
    Json(PingResponse {
        status: if remote { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        remote,
    })
}
