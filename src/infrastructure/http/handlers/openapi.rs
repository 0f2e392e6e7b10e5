//! OpenAPI Handler

use axum::{extract::OriginalUri, Json};
use utoipa::openapi::OpenApi;

use crate::infrastructure::http::openapi::openapi;

/// 返回 OpenAPI 文档，路由前缀取自请求路径
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "OpenAPI",
    summary = "OpenAPI document",
    responses(
        (status = 200, description = "OpenAPI document of this service", body = String, content_type = "application/json"),
    )
)]
pub async fn openapi_json(OriginalUri(uri): OriginalUri) -> Json<OpenApi> {
    let prefix = uri.path().strip_suffix("/openapi.json").unwrap_or_default();
    Json(openapi(prefix))
}
