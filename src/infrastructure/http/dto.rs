//! Data Transfer Objects
//!
//! 请求/响应的 JSON 形状，字段统一为 camelCase

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::table::{Column, ColumnType, Row, TableData, TableView};

// ============================================================================
// Request DTOs
// ============================================================================

/// 创建表请求
#[derive(Debug, Deserialize, ToSchema)]
pub struct TableRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// 新增列请求
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRequest {
    pub table_index: usize,
    #[serde(default)]
    pub name: Option<String>,
    #[schema(value_type = String, example = "INT")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

/// 编辑单元格请求
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditCellRequest {
    pub table_index: usize,
    pub row_index: usize,
    pub column_index: usize,
    #[serde(default)]
    pub new_value: Option<String>,
}

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableIndexQuery {
    pub table_index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowIndexQuery {
    pub table_index: usize,
    pub row_index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnIndexQuery {
    pub table_index: usize,
    pub column_index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionQuery {
    pub table_index1: usize,
    pub table_index2: usize,
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct TableDataResponse {
    pub name: String,
}

impl From<TableData> for TableDataResponse {
    fn from(data: TableData) -> Self {
        Self { name: data.name }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnResponse {
    pub name: String,
    /// INT / REAL / CHAR / STRING / MONEY / MONEY_INVL
    #[schema(value_type = String, example = "MONEY")]
    pub column_type: ColumnType,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl From<Column> for ColumnResponse {
    fn from(column: Column) -> Self {
        Self {
            name: column.name,
            column_type: column.column_type,
            min: column.min,
            max: column.max,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RowResponse {
    pub values: Vec<String>,
}

impl From<Row> for RowResponse {
    fn from(row: Row) -> Self {
        Self { values: row.values }
    }
}

/// 单表视图
#[derive(Debug, Serialize, ToSchema)]
pub struct TableResponse {
    pub name: String,
    pub columns: Vec<ColumnResponse>,
    pub rows: Vec<RowResponse>,
}

impl From<TableView> for TableResponse {
    fn from(view: TableView) -> Self {
        Self {
            name: view.name,
            columns: view.columns.into_iter().map(ColumnResponse::from).collect(),
            rows: view.rows.into_iter().map(RowResponse::from).collect(),
        }
    }
}
