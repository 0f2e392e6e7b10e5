//! OpenAPI Document
//!
//! 接口路径相对 server.path_prefix，前缀写入 servers

use utoipa::openapi::{server::Server, OpenApi as OpenApiDocument};
use utoipa::OpenApi;

use super::dto::{
    ColumnRequest, ColumnResponse, EditCellRequest, RowResponse, TableDataResponse, TableRequest,
    TableResponse,
};
use super::error::ErrorResponse;
use super::handlers::{self, PingResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Table Gateway API",
        version = env!("CARGO_PKG_VERSION"),
        description = "RESTful facade over a remote table database: tables, typed columns, rows and table intersection."
    ),
    paths(
        handlers::openapi_json,
        handlers::ping,
        handlers::list_tables,
        handlers::view_table,
        handlers::add_table,
        handlers::add_column,
        handlers::add_row,
        handlers::delete_row,
        handlers::delete_column,
        handlers::delete_table,
        handlers::edit_cell,
        handlers::tables_intersection,
    ),
    components(schemas(
        TableRequest,
        ColumnRequest,
        EditCellRequest,
        TableDataResponse,
        ColumnResponse,
        RowResponse,
        TableResponse,
        PingResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Tables", description = "Table, column, row and cell operations"),
        (name = "Health", description = "Liveness of the gateway and the remote table service"),
        (name = "OpenAPI", description = "OpenAPI document endpoint"),
    )
)]
pub struct TableGatewayApiDoc;

/// 生成 OpenAPI 文档
///
/// `path_prefix` 非空时作为唯一的 server
pub fn openapi(path_prefix: &str) -> OpenApiDocument {
    let mut doc = TableGatewayApiDoc::openapi();
    if !path_prefix.is_empty() {
        doc.servers = Some(vec![Server::new(path_prefix)]);
    }
    doc
}
