//! Table Command Handlers
//!
//! 每个写操作：修改远程状态 → 回读受影响表的完整视图 → 返回视图。
//! 回读失败不会回滚已经生效的修改

use std::sync::Arc;

use crate::application::commands::{
    AddColumn, AddRow, CreateTable, DeleteColumn, DeleteRow, DeleteTable, EditCell,
    IntersectTables,
};
use crate::application::error::ApplicationError;
use crate::application::mutation_gate::MutationGate;
use crate::application::ports::RemoteDbPort;
use crate::application::queries::handlers::load_table_view;
use crate::domain::table::{NewColumn, TableData, TableName, TableView};

// ============================================================================
// CreateTable
// ============================================================================

/// CreateTable Handler
pub struct CreateTableHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl CreateTableHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    pub async fn handle(&self, command: CreateTable) -> Result<TableView, ApplicationError> {
        let name = command
            .name
            .ok_or_else(|| ApplicationError::validation("Table name is required"))?;
        let name = TableName::new(name)?;

        let _guard = self.gate.write().await;
        let table_index = self.remote.create_table(name.as_str()).await?;

        tracing::info!(table_index = table_index, name = %name, "Table created");

        load_table_view(self.remote.as_ref(), table_index).await
    }
}

// ============================================================================
// AddColumn
// ============================================================================

/// AddColumn Handler
pub struct AddColumnHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl AddColumnHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    pub async fn handle(&self, command: AddColumn) -> Result<TableView, ApplicationError> {
        let name = command
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ApplicationError::validation("Column name is required"))?;

        let column = NewColumn {
            name,
            column_type: command.column_type,
            min: command.min,
            max: command.max,
        };

        let _guard = self.gate.write().await;
        self.remote
            .add_column(command.table_index, column.clone())
            .await?;

        tracing::info!(
            table_index = command.table_index,
            name = %column.name,
            column_type = %column.column_type,
            "Column added"
        );

        load_table_view(self.remote.as_ref(), command.table_index).await
    }
}

// ============================================================================
// AddRow
// ============================================================================

/// AddRow Handler
pub struct AddRowHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl AddRowHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    pub async fn handle(&self, command: AddRow) -> Result<TableView, ApplicationError> {
        let _guard = self.gate.write().await;
        self.remote.add_row(command.table_index).await?;

        tracing::info!(table_index = command.table_index, "Row added");

        load_table_view(self.remote.as_ref(), command.table_index).await
    }
}

// ============================================================================
// DeleteRow / DeleteColumn / DeleteTable
// ============================================================================

/// DeleteRow Handler
pub struct DeleteRowHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl DeleteRowHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    pub async fn handle(&self, command: DeleteRow) -> Result<TableView, ApplicationError> {
        let _guard = self.gate.write().await;
        let removed = self
            .remote
            .delete_row(command.table_index, command.row_index)
            .await?;

        tracing::info!(
            table_index = command.table_index,
            row_index = command.row_index,
            removed = removed,
            "Row deleted"
        );

        load_table_view(self.remote.as_ref(), command.table_index).await
    }
}

/// DeleteColumn Handler
pub struct DeleteColumnHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl DeleteColumnHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    pub async fn handle(&self, command: DeleteColumn) -> Result<TableView, ApplicationError> {
        let _guard = self.gate.write().await;
        let removed = self
            .remote
            .delete_column(command.table_index, command.column_index)
            .await?;

        tracing::info!(
            table_index = command.table_index,
            column_index = command.column_index,
            removed = removed,
            "Column deleted"
        );

        load_table_view(self.remote.as_ref(), command.table_index).await
    }
}

/// DeleteTable Handler - 返回删除后的表目录
pub struct DeleteTableHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl DeleteTableHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    pub async fn handle(&self, command: DeleteTable) -> Result<Vec<TableData>, ApplicationError> {
        let _guard = self.gate.write().await;
        let removed = self.remote.delete_table(command.table_index).await?;

        tracing::info!(
            table_index = command.table_index,
            removed = removed,
            "Table deleted"
        );

        Ok(self.remote.tables_data().await?)
    }
}

// ============================================================================
// EditCell
// ============================================================================

/// EditCell Handler
pub struct EditCellHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl EditCellHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    /// 空值不修改，直接返回当前视图
    pub async fn handle(&self, command: EditCell) -> Result<TableView, ApplicationError> {
        let _guard = self.gate.write().await;

        match command.new_value.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(value) => {
                self.remote
                    .edit_cell(
                        command.table_index,
                        command.row_index,
                        command.column_index,
                        value,
                    )
                    .await?;

                tracing::info!(
                    table_index = command.table_index,
                    row_index = command.row_index,
                    column_index = command.column_index,
                    "Cell edited"
                );
            }
            None => {
                tracing::debug!(
                    table_index = command.table_index,
                    row_index = command.row_index,
                    column_index = command.column_index,
                    "Blank cell value, edit skipped"
                );
            }
        }

        load_table_view(self.remote.as_ref(), command.table_index).await
    }
}

// ============================================================================
// IntersectTables
// ============================================================================

/// IntersectTables Handler
pub struct IntersectTablesHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl IntersectTablesHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    pub async fn handle(&self, command: IntersectTables) -> Result<TableView, ApplicationError> {
        let _guard = self.gate.write().await;
        let table_index = self
            .remote
            .tables_multiply(command.table_index1, command.table_index2)
            .await?;

        tracing::info!(
            table_index1 = command.table_index1,
            table_index2 = command.table_index2,
            result_index = table_index,
            "Tables intersected"
        );

        load_table_view(self.remote.as_ref(), table_index).await
    }
}
