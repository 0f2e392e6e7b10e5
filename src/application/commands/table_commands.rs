//! Table Commands

use crate::domain::table::ColumnType;

/// 创建表命令
#[derive(Debug, Clone)]
pub struct CreateTable {
    pub name: Option<String>,
}

/// 新增列命令
#[derive(Debug, Clone)]
pub struct AddColumn {
    pub table_index: usize,
    pub name: Option<String>,
    pub column_type: ColumnType,
    pub min: Option<String>,
    pub max: Option<String>,
}

/// 追加空行命令
#[derive(Debug, Clone)]
pub struct AddRow {
    pub table_index: usize,
}

/// 删除行命令
#[derive(Debug, Clone)]
pub struct DeleteRow {
    pub table_index: usize,
    pub row_index: usize,
}

/// 删除列命令
#[derive(Debug, Clone)]
pub struct DeleteColumn {
    pub table_index: usize,
    pub column_index: usize,
}

/// 删除表命令
#[derive(Debug, Clone)]
pub struct DeleteTable {
    pub table_index: usize,
}

/// 编辑单元格命令
///
/// new_value 缺失或去空白后为空时不修改
#[derive(Debug, Clone)]
pub struct EditCell {
    pub table_index: usize,
    pub row_index: usize,
    pub column_index: usize,
    pub new_value: Option<String>,
}

/// 两表求交命令
#[derive(Debug, Clone)]
pub struct IntersectTables {
    pub table_index1: usize,
    pub table_index2: usize,
}
