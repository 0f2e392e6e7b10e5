//! HTTP Middleware
//!
//! 访问日志中间件

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 访问日志中间件
///
/// 所有请求记录 debug 级耗时；4xx 记 warn，5xx 记 error。
/// 业务错误的具体原因在 ApiError::into_response() 中记录
pub async fn access_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP client error"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP request served"
        );
    }

    response
}
