//! Table HTTP Handlers
//!
//! 写操作返回受影响表的最新视图；删除表与列出表返回表目录

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    AddColumn, AddRow, CreateTable, DeleteColumn, DeleteRow, DeleteTable, EditCell,
    IntersectTables, ListTables, ViewTable,
};
use crate::infrastructure::http::dto::{
    ColumnIndexQuery, ColumnRequest, EditCellRequest, IntersectionQuery, RowIndexQuery,
    TableDataResponse, TableIndexQuery, TableRequest, TableResponse,
};
use crate::infrastructure::http::error::{ApiError, ErrorResponse};
use crate::infrastructure::http::extract::{AppJson, AppQuery};
use crate::infrastructure::http::state::AppState;

/// 列出所有表
#[utoipa::path(
    get,
    path = "/tables",
    tag = "Tables",
    summary = "Get list of all tables",
    description = "Returns a list of all tables from the database",
    responses(
        (status = 200, description = "Successfully retrieved list of all tables", body = [TableDataResponse]),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn list_tables(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TableDataResponse>>, ApiError> {
    let tables = state.list_tables_handler.handle(ListTables).await?;
    Ok(Json(tables.into_iter().map(TableDataResponse::from).collect()))
}

/// 查看单表
#[utoipa::path(
    get,
    path = "/viewTable",
    tag = "Tables",
    summary = "Get details of a specific table",
    description = "Returns details of a table including columns and rows for a given table index",
    params(
        ("tableIndex" = usize, Query, description = "Index of the table"),
    ),
    responses(
        (status = 200, description = "Successfully retrieved details of the specified table", body = TableResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Table not found for the given index", body = ErrorResponse),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn view_table(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<TableIndexQuery>,
) -> Result<Json<TableResponse>, ApiError> {
    let view = state
        .view_table_handler
        .handle(ViewTable {
            table_index: query.table_index,
        })
        .await?;
    Ok(Json(view.into()))
}

/// 创建表
#[utoipa::path(
    post,
    path = "/addTable",
    tag = "Tables",
    summary = "Add a new table",
    description = "Creates a new table with the given name and returns the new table",
    request_body = TableRequest,
    responses(
        (status = 200, description = "Table successfully created", body = TableResponse),
        (status = 400, description = "Invalid input for table name", body = ErrorResponse),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn add_table(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<TableRequest>,
) -> Result<Json<TableResponse>, ApiError> {
    let view = state
        .create_table_handler
        .handle(CreateTable { name: req.name })
        .await?;
    Ok(Json(view.into()))
}

/// 新增列
#[utoipa::path(
    post,
    path = "/addColumn",
    tag = "Tables",
    summary = "Add a new column",
    description = "Adds a new column to the specified table",
    request_body = ColumnRequest,
    responses(
        (status = 200, description = "Column successfully added", body = TableResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Table, row or column not found for the given index", body = ErrorResponse),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn add_column(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ColumnRequest>,
) -> Result<Json<TableResponse>, ApiError> {
    let command = AddColumn {
        table_index: req.table_index,
        name: req.name,
        column_type: req.column_type,
        min: req.min,
        max: req.max,
    };
    let view = state.add_column_handler.handle(command).await?;
    Ok(Json(view.into()))
}

/// 追加空行
#[utoipa::path(
    post,
    path = "/addRow",
    tag = "Tables",
    summary = "Add a new row",
    description = "Adds a new row to the specified table",
    params(
        ("tableIndex" = usize, Query, description = "Index of the table"),
    ),
    responses(
        (status = 200, description = "Row added successfully", body = TableResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Table, row or column not found for the given index", body = ErrorResponse),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn add_row(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<TableIndexQuery>,
) -> Result<Json<TableResponse>, ApiError> {
    let view = state
        .add_row_handler
        .handle(AddRow {
            table_index: query.table_index,
        })
        .await?;
    Ok(Json(view.into()))
}

/// 删除行
#[utoipa::path(
    delete,
    path = "/deleteRow",
    tag = "Tables",
    summary = "Delete a row",
    description = "Deletes a row from the specified table",
    params(
        ("tableIndex" = usize, Query, description = "Index of the table"),
        ("rowIndex" = usize, Query, description = "Index of the row"),
    ),
    responses(
        (status = 200, description = "Row deleted successfully", body = TableResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Table, row or column not found for the given index", body = ErrorResponse),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn delete_row(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<RowIndexQuery>,
) -> Result<Json<TableResponse>, ApiError> {
    let view = state
        .delete_row_handler
        .handle(DeleteRow {
            table_index: query.table_index,
            row_index: query.row_index,
        })
        .await?;
    Ok(Json(view.into()))
}

/// 删除列
#[utoipa::path(
    delete,
    path = "/deleteColumn",
    tag = "Tables",
    summary = "Delete a column",
    description = "Deletes a column from the specified table",
    params(
        ("tableIndex" = usize, Query, description = "Index of the table"),
        ("columnIndex" = usize, Query, description = "Index of the column"),
    ),
    responses(
        (status = 200, description = "Column deleted successfully", body = TableResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Table, row or column not found for the given index", body = ErrorResponse),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn delete_column(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<ColumnIndexQuery>,
) -> Result<Json<TableResponse>, ApiError> {
    let view = state
        .delete_column_handler
        .handle(DeleteColumn {
            table_index: query.table_index,
            column_index: query.column_index,
        })
        .await?;
    Ok(Json(view.into()))
}

/// 删除表，返回剩余表目录
#[utoipa::path(
    delete,
    path = "/deleteTable",
    tag = "Tables",
    summary = "Delete a table",
    description = "Deletes the specified table and returns the remaining tables",
    params(
        ("tableIndex" = usize, Query, description = "Index of the table"),
    ),
    responses(
        (status = 200, description = "Table deleted successfully", body = [TableDataResponse]),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Table, row or column not found for the given index", body = ErrorResponse),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn delete_table(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<TableIndexQuery>,
) -> Result<Json<Vec<TableDataResponse>>, ApiError> {
    let tables = state
        .delete_table_handler
        .handle(DeleteTable {
            table_index: query.table_index,
        })
        .await?;
    Ok(Json(tables.into_iter().map(TableDataResponse::from).collect()))
}

/// 编辑单元格（空值时不修改）
#[utoipa::path(
    post,
    path = "/editCell",
    tag = "Tables",
    summary = "Edit a cell",
    description = "Edits the value of a specified cell in a table; a blank value leaves the cell unchanged",
    request_body = EditCellRequest,
    responses(
        (status = 200, description = "Cell edited successfully", body = TableResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Table, row or column not found for the given index", body = ErrorResponse),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn edit_cell(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<EditCellRequest>,
) -> Result<Json<TableResponse>, ApiError> {
    let command = EditCell {
        table_index: req.table_index,
        row_index: req.row_index,
        column_index: req.column_index,
        new_value: req.new_value,
    };
    let view = state.edit_cell_handler.handle(command).await?;
    Ok(Json(view.into()))
}

/// 两表求交，返回新表视图
#[utoipa::path(
    post,
    path = "/tablesIntersection",
    tag = "Tables",
    summary = "Intersect Tables",
    description = "Finds intersection of the specified tables and stores it as a new table",
    params(
        ("tableIndex1" = usize, Query, description = "Index of the first table"),
        ("tableIndex2" = usize, Query, description = "Index of the second table"),
    ),
    responses(
        (status = 200, description = "Tables intersection found successfully", body = TableResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Table, row or column not found for the given index", body = ErrorResponse),
        (status = 503, description = "Remote table service unavailable", body = ErrorResponse),
    )
)]
pub async fn tables_intersection(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<IntersectionQuery>,
) -> Result<Json<TableResponse>, ApiError> {
    let view = state
        .intersect_tables_handler
        .handle(IntersectTables {
            table_index1: query.table_index1,
            table_index2: query.table_index2,
        })
        .await?;
    Ok(Json(view.into()))
}

#[cfg(test)]
mod tests {
    use crate::application::MutationGate;
    use crate::infrastructure::adapters::InMemoryRemoteDb;
    use crate::infrastructure::http::{create_routes, AppState};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(Arc::new(InMemoryRemoteDb::new()), MutationGate::serialized());
        create_routes("/lab").with_state(Arc::new(state))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_add_table_then_list() {
        let app = app();

        let (status, body) = call(&app, Method::POST, "/lab/addTable", Some(json!({"name": "Orders"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"name": "Orders", "columns": [], "rows": []}));

        let (status, body) = call(&app, Method::GET, "/lab/tables", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"name": "Orders"}]));
    }

    #[tokio::test]
    async fn test_add_table_blank_name_is_bad_request() {
        let app = app();

        for body in [json!({"name": "  "}), json!({})] {
            let (status, body) = call(&app, Method::POST, "/lab/addTable", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["errno"], 400);
        }
    }

    #[tokio::test]
    async fn test_view_missing_table_is_not_found() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/lab/viewTable?tableIndex=0", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errno"], 404);
    }

    #[tokio::test]
    async fn test_full_table_workflow() {
        let app = app();
        call(&app, Method::POST, "/lab/addTable", Some(json!({"name": "Stock"}))).await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/lab/addColumn",
            Some(json!({"tableIndex": 0, "name": "qty", "columnType": "INT", "min": "0", "max": "100"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["columns"],
            json!([{"name": "qty", "columnType": "INT", "min": "0", "max": "100"}])
        );

        call(&app, Method::POST, "/lab/addRow?tableIndex=0", None).await;
        let (_, body) = call(&app, Method::POST, "/lab/addRow?tableIndex=0", None).await;
        assert_eq!(body["rows"], json!([{"values": [""]}, {"values": [""]}]));

        let (status, body) = call(
            &app,
            Method::POST,
            "/lab/editCell",
            Some(json!({"tableIndex": 0, "rowIndex": 1, "columnIndex": 0, "newValue": "7"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"][1]["values"][0], "7");

        // 空值不修改
        let (status, body) = call(
            &app,
            Method::POST,
            "/lab/editCell",
            Some(json!({"tableIndex": 0, "rowIndex": 1, "columnIndex": 0, "newValue": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"][1]["values"][0], "7");

        // 超出边界
        let (status, _) = call(
            &app,
            Method::POST,
            "/lab/editCell",
            Some(json!({"tableIndex": 0, "rowIndex": 1, "columnIndex": 0, "newValue": "101"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&app, Method::DELETE, "/lab/deleteRow?tableIndex=0&rowIndex=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"], json!([{"values": ["7"]}]));

        let (status, body) = call(&app, Method::DELETE, "/lab/deleteColumn?tableIndex=0&columnIndex=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["columns"], json!([]));
        assert_eq!(body["rows"], json!([{"values": []}]));

        let (status, body) = call(&app, Method::DELETE, "/lab/deleteTable?tableIndex=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let app = app();
        call(&app, Method::POST, "/lab/addTable", Some(json!({"name": "T"}))).await;
        let (status, _) = call(&app, Method::DELETE, "/lab/deleteRow?tableIndex=0&rowIndex=3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tables_intersection() {
        let app = app();
        for name in ["A", "B"] {
            call(&app, Method::POST, "/lab/addTable", Some(json!({"name": name}))).await;
        }
        for index in [0, 1] {
            call(
                &app,
                Method::POST,
                "/lab/addColumn",
                Some(json!({"tableIndex": index, "name": "k", "columnType": "STRING"})),
            )
            .await;
            call(&app, Method::POST, &format!("/lab/addRow?tableIndex={}", index), None).await;
            call(
                &app,
                Method::POST,
                "/lab/editCell",
                Some(json!({"tableIndex": index, "rowIndex": 0, "columnIndex": 0, "newValue": "same"})),
            )
            .await;
        }

        let (status, body) = call(
            &app,
            Method::POST,
            "/lab/tablesIntersection?tableIndex1=0&tableIndex2=1",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"], json!([{"values": ["same"]}]));

        let (_, tables) = call(&app, Method::GET, "/lab/tables", None).await;
        let tables = tables.as_array().unwrap();
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[2]["name"], body["name"]);
        assert_ne!(tables[2]["name"], "A");
        assert_ne!(tables[2]["name"], "B");
    }

    #[tokio::test]
    async fn test_ping_reports_remote() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/lab/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["remote"], true);
    }

    #[tokio::test]
    async fn test_root_prefix() {
        let state = AppState::new(Arc::new(InMemoryRemoteDb::new()), MutationGate::unserialized());
        let app = create_routes("").with_state(Arc::new(state));
        let (status, body) = call(&app, Method::GET, "/tables", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_query_is_rejected() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/lab/viewTable?tableIndex=-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_missing_body_fields_are_bad_request() {
        let app = app();
        call(&app, Method::POST, "/lab/addTable", Some(json!({"name": "T"}))).await;

        let cases = [
            ("/lab/addColumn", json!({"name": "x", "columnType": "INT"})),
            ("/lab/addColumn", json!({"tableIndex": 0, "name": "x"})),
            ("/lab/addColumn", json!({"tableIndex": 0, "name": "x", "columnType": "DATE"})),
            ("/lab/editCell", json!({"tableIndex": 0, "columnIndex": 0, "newValue": "1"})),
        ];

        for (uri, payload) in cases {
            let (status, body) = call(&app, Method::POST, uri, Some(payload.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", uri, payload);
            assert_eq!(body["errno"], 400);
            assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
        }
    }

    #[tokio::test]
    async fn test_missing_query_params_are_bad_request() {
        let app = app();

        let cases = [
            (Method::POST, "/lab/addRow"),
            (Method::GET, "/lab/viewTable"),
            (Method::DELETE, "/lab/deleteRow?tableIndex=0"),
            (Method::POST, "/lab/tablesIntersection?tableIndex1=0"),
        ];

        for (method, uri) in cases {
            let (status, body) = call(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["errno"], 400);
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_bad_request() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/lab/addTable")
            .body(Body::from("name=T"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
