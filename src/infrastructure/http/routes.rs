//! HTTP Routes
//!
//! API Endpoints（均挂在 server.path_prefix 之下，默认 /lab）:
//! - /ping                GET     健康检查（含远程服务状态）
//! - /tables              GET     列出所有表
//! - /viewTable           GET     查看单表 ?tableIndex=
//! - /addTable            POST    创建表 {name}
//! - /addColumn           POST    新增列 {tableIndex, name, columnType, min, max}
//! - /addRow              POST    追加空行 ?tableIndex=
//! - /deleteRow           DELETE  删除行 ?tableIndex=&rowIndex=
//! - /deleteColumn        DELETE  删除列 ?tableIndex=&columnIndex=
//! - /deleteTable         DELETE  删除表 ?tableIndex=
//! - /editCell            POST    编辑单元格 {tableIndex, rowIndex, columnIndex, newValue}
//! - /tablesIntersection  POST    两表求交 ?tableIndex1=&tableIndex2=
//! - /openapi.json        GET     OpenAPI 文档

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
///
/// 前缀为空时直接挂在根路径
pub fn create_routes(path_prefix: &str) -> Router<Arc<AppState>> {
    if path_prefix.is_empty() {
        table_routes()
    } else {
        Router::new().nest(path_prefix, table_routes())
    }
}

/// 表格路由
fn table_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/tables", get(handlers::list_tables))
        .route("/viewTable", get(handlers::view_table))
        .route("/addTable", post(handlers::add_table))
        .route("/addColumn", post(handlers::add_column))
        .route("/addRow", post(handlers::add_row))
        .route("/deleteRow", delete(handlers::delete_row))
        .route("/deleteColumn", delete(handlers::delete_column))
        .route("/deleteTable", delete(handlers::delete_table))
        .route("/editCell", post(handlers::edit_cell))
        .route("/tablesIntersection", post(handlers::tables_intersection))
        .route("/openapi.json", get(handlers::openapi_json))
}
