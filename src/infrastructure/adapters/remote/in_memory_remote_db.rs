//! In-Memory Remote DB - 进程内的远程表服务实现
//!
//! 与远程服务语义一致：表按顺序存放，新建/求交的表追加到末尾；
//! 下标越界返回 NotFound，取值不符合列类型返回 Rejected。
//! 用于本地开发（remote.mode = "memory"）和测试

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

use crate::application::ports::{RemoteDbPort, RemoteError};
use crate::domain::table::{Column, NewColumn, Row, TableData, TableError, TableName};

#[derive(Debug, Clone)]
struct StoredTable {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl StoredTable {
    fn new(name: String) -> Self {
        Self {
            name,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// 内存表服务
pub struct InMemoryRemoteDb {
    tables: RwLock<Vec<StoredTable>>,
}

impl InMemoryRemoteDb {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryRemoteDb {
    fn default() -> Self {
        Self::new()
    }
}

impl From<TableError> for RemoteError {
    fn from(err: TableError) -> Self {
        RemoteError::Rejected(err.to_string())
    }
}

fn table_not_found(index: usize) -> RemoteError {
    RemoteError::NotFound(format!("Table not found at index {}", index))
}

fn table_at(tables: &[StoredTable], index: usize) -> Result<&StoredTable, RemoteError> {
    tables.get(index).ok_or_else(|| table_not_found(index))
}

fn table_at_mut(tables: &mut [StoredTable], index: usize) -> Result<&mut StoredTable, RemoteError> {
    tables.get_mut(index).ok_or_else(|| table_not_found(index))
}

/// 两表交集
///
/// 列：表 1 中名称和类型都出现在表 2 的列（保持表 1 顺序）；
/// 行：表 1 投影后的去重行中，同样出现在表 2 投影里的行
fn intersect(first: &StoredTable, second: &StoredTable) -> StoredTable {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for (i, column) in first.columns.iter().enumerate() {
        let matched = second
            .columns
            .iter()
            .position(|c| c.name == column.name && c.column_type == column.column_type);
        if let Some(j) = matched {
            if !right.contains(&j) {
                left.push(i);
                right.push(j);
            }
        }
    }

    let columns = left.iter().map(|&i| first.columns[i].clone()).collect();

    let mut rows = Vec::new();
    if !left.is_empty() {
        let wanted: HashSet<Row> = second.rows.iter().map(|r| r.project(&right)).collect();
        let mut seen = HashSet::new();
        for row in &first.rows {
            let projected = row.project(&left);
            if wanted.contains(&projected) && seen.insert(projected.clone()) {
                rows.push(projected);
            }
        }
    }

    StoredTable {
        name: format!("{} ∩ {}", first.name, second.name),
        columns,
        rows,
    }
}

#[async_trait]
impl RemoteDbPort for InMemoryRemoteDb {
    async fn tables_data(&self) -> Result<Vec<TableData>, RemoteError> {
        let tables = self.tables.read().await;
        Ok(tables.iter().map(|t| TableData::new(t.name.clone())).collect())
    }

    async fn columns(&self, table_index: usize) -> Result<Vec<Column>, RemoteError> {
        let tables = self.tables.read().await;
        Ok(table_at(&tables, table_index)?.columns.clone())
    }

    async fn rows(&self, table_index: usize) -> Result<Vec<Row>, RemoteError> {
        let tables = self.tables.read().await;
        Ok(table_at(&tables, table_index)?.rows.clone())
    }

    async fn create_table(&self, name: &str) -> Result<usize, RemoteError> {
        let name = TableName::new(name)?;
        let mut tables = self.tables.write().await;
        tables.push(StoredTable::new(name.into_inner()));
        Ok(tables.len() - 1)
    }

    async fn add_column(&self, table_index: usize, column: NewColumn) -> Result<(), RemoteError> {
        let column = column.into_column()?;
        let mut tables = self.tables.write().await;
        let table = table_at_mut(&mut tables, table_index)?;
        table.columns.push(column);
        for row in &mut table.rows {
            row.values.push(String::new());
        }
        Ok(())
    }

    async fn add_row(&self, table_index: usize) -> Result<(), RemoteError> {
        let mut tables = self.tables.write().await;
        let table = table_at_mut(&mut tables, table_index)?;
        let width = table.columns.len();
        table.rows.push(Row::empty(width));
        Ok(())
    }

    async fn delete_row(&self, table_index: usize, row_index: usize) -> Result<bool, RemoteError> {
        let mut tables = self.tables.write().await;
        let table = table_at_mut(&mut tables, table_index)?;
        if row_index >= table.rows.len() {
            return Err(RemoteError::NotFound(format!(
                "Row not found at index {}",
                row_index
            )));
        }
        table.rows.remove(row_index);
        Ok(true)
    }

    async fn delete_column(
        &self,
        table_index: usize,
        column_index: usize,
    ) -> Result<bool, RemoteError> {
        let mut tables = self.tables.write().await;
        let table = table_at_mut(&mut tables, table_index)?;
        if column_index >= table.columns.len() {
            return Err(RemoteError::NotFound(format!(
                "Column not found at index {}",
                column_index
            )));
        }
        table.columns.remove(column_index);
        for row in &mut table.rows {
            if column_index < row.values.len() {
                row.values.remove(column_index);
            }
        }
        Ok(true)
    }

    async fn delete_table(&self, table_index: usize) -> Result<bool, RemoteError> {
        let mut tables = self.tables.write().await;
        if table_index >= tables.len() {
            return Err(table_not_found(table_index));
        }
        tables.remove(table_index);
        Ok(true)
    }

    async fn edit_cell(
        &self,
        table_index: usize,
        row_index: usize,
        column_index: usize,
        value: &str,
    ) -> Result<(), RemoteError> {
        let mut tables = self.tables.write().await;
        let table = table_at_mut(&mut tables, table_index)?;
        let column = table.columns.get(column_index).ok_or_else(|| {
            RemoteError::NotFound(format!("Column not found at index {}", column_index))
        })?;
        column.validate(value)?;

        let cell = table
            .rows
            .get_mut(row_index)
            .ok_or_else(|| RemoteError::NotFound(format!("Row not found at index {}", row_index)))?
            .values
            .get_mut(column_index)
            .ok_or_else(|| {
                RemoteError::Internal(format!(
                    "Row {} has no cell for column {}",
                    row_index, column_index
                ))
            })?;
        *cell = value.to_string();
        Ok(())
    }

    async fn tables_multiply(
        &self,
        table_index1: usize,
        table_index2: usize,
    ) -> Result<usize, RemoteError> {
        let mut tables = self.tables.write().await;
        let result = intersect(
            table_at(&tables, table_index1)?,
            table_at(&tables, table_index2)?,
        );
        tables.push(result);
        Ok(tables.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::ColumnType;

    fn column(name: &str, column_type: ColumnType) -> NewColumn {
        NewColumn {
            name: name.to_string(),
            column_type,
            min: None,
            max: None,
        }
    }

    async fn fill(db: &InMemoryRemoteDb, table: usize, rows: &[&[&str]]) {
        for values in rows {
            db.add_row(table).await.unwrap();
            let row = db.rows(table).await.unwrap().len() - 1;
            for (col, value) in values.iter().enumerate() {
                db.edit_cell(table, row, col, value).await.unwrap();
            }
        }
    }

    #[tokio::test]
    async fn test_create_returns_appended_index() {
        let db = InMemoryRemoteDb::new();
        assert_eq!(db.create_table("a").await.unwrap(), 0);
        assert_eq!(db.create_table("b").await.unwrap(), 1);
        assert!(matches!(
            db.create_table("  ").await,
            Err(RemoteError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_add_column_widens_existing_rows() {
        let db = InMemoryRemoteDb::new();
        let t = db.create_table("t").await.unwrap();
        db.add_row(t).await.unwrap();
        db.add_column(t, column("x", ColumnType::Int)).await.unwrap();

        let rows = db.rows(t).await.unwrap();
        assert_eq!(rows[0].values, vec![""]);
    }

    #[tokio::test]
    async fn test_add_column_rejects_bad_bounds() {
        let db = InMemoryRemoteDb::new();
        let t = db.create_table("t").await.unwrap();
        let bad = NewColumn {
            min: Some("9".to_string()),
            max: Some("1".to_string()),
            ..column("x", ColumnType::Int)
        };
        assert!(matches!(db.add_column(t, bad).await, Err(RemoteError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_out_of_range_indices() {
        let db = InMemoryRemoteDb::new();
        let t = db.create_table("t").await.unwrap();
        db.add_column(t, column("x", ColumnType::String)).await.unwrap();

        assert!(matches!(db.columns(4).await, Err(RemoteError::NotFound(_))));
        assert!(matches!(db.delete_row(t, 0).await, Err(RemoteError::NotFound(_))));
        assert!(matches!(db.delete_column(t, 1).await, Err(RemoteError::NotFound(_))));
        assert!(matches!(db.delete_table(1).await, Err(RemoteError::NotFound(_))));
        assert!(matches!(
            db.edit_cell(t, 0, 0, "v").await,
            Err(RemoteError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_edit_cell_validates_type() {
        let db = InMemoryRemoteDb::new();
        let t = db.create_table("t").await.unwrap();
        db.add_column(t, column("price", ColumnType::Money)).await.unwrap();
        db.add_row(t).await.unwrap();

        assert!(db.edit_cell(t, 0, 0, "12.50").await.is_ok());
        assert!(matches!(
            db.edit_cell(t, 0, 0, "12.505").await,
            Err(RemoteError::Rejected(_))
        ));
        assert_eq!(db.rows(t).await.unwrap()[0].values, vec!["12.50"]);
    }

    #[tokio::test]
    async fn test_delete_column_shrinks_rows() {
        let db = InMemoryRemoteDb::new();
        let t = db.create_table("t").await.unwrap();
        db.add_column(t, column("a", ColumnType::String)).await.unwrap();
        db.add_column(t, column("b", ColumnType::String)).await.unwrap();
        fill(&db, t, &[&["1", "2"]]).await;

        assert!(db.delete_column(t, 0).await.unwrap());
        assert_eq!(db.rows(t).await.unwrap()[0].values, vec!["2"]);
    }

    #[tokio::test]
    async fn test_intersection_matches_shared_columns() {
        let db = InMemoryRemoteDb::new();
        let a = db.create_table("a").await.unwrap();
        db.add_column(a, column("id", ColumnType::Int)).await.unwrap();
        db.add_column(a, column("tag", ColumnType::String)).await.unwrap();
        db.add_column(a, column("only_a", ColumnType::Char)).await.unwrap();
        fill(&db, a, &[&["1", "x", "q"], &["2", "y", "r"], &["1", "x", "s"]]).await;

        let b = db.create_table("b").await.unwrap();
        db.add_column(b, column("tag", ColumnType::String)).await.unwrap();
        db.add_column(b, column("id", ColumnType::Int)).await.unwrap();
        db.add_column(b, column("only_b", ColumnType::Real)).await.unwrap();
        fill(&db, b, &[&["x", "1", "0.5"], &["z", "3", "1.5"]]).await;

        let c = db.tables_multiply(a, b).await.unwrap();
        assert_eq!(c, 2);

        let tables = db.tables_data().await.unwrap();
        assert_eq!(tables[c].name, "a ∩ b");

        let columns: Vec<String> = db.columns(c).await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(columns, vec!["id", "tag"]);

        let rows = db.rows(c).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values, vec!["1", "x"]);
    }

    #[tokio::test]
    async fn test_intersection_without_shared_columns_is_empty() {
        let db = InMemoryRemoteDb::new();
        let a = db.create_table("a").await.unwrap();
        db.add_column(a, column("x", ColumnType::Int)).await.unwrap();
        fill(&db, a, &[&["1"]]).await;
        let b = db.create_table("b").await.unwrap();
        db.add_column(b, column("x", ColumnType::String)).await.unwrap();

        let c = db.tables_multiply(a, b).await.unwrap();
        assert!(db.columns(c).await.unwrap().is_empty());
        assert!(db.rows(c).await.unwrap().is_empty());
        assert!(matches!(
            db.tables_multiply(a, 9).await,
            Err(RemoteError::NotFound(_))
        ));
    }
}
