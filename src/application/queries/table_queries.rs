//! Table Queries

/// 列出所有表查询
#[derive(Debug, Clone)]
pub struct ListTables;

/// 查看单表查询
#[derive(Debug, Clone)]
pub struct ViewTable {
    pub table_index: usize,
}
