//! Table Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::mutation_gate::MutationGate;
use crate::application::ports::RemoteDbPort;
use crate::application::queries::{ListTables, ViewTable};
use crate::domain::table::{TableData, TableView};

/// 组装单表视图
///
/// 依次调用远程服务获取表名、列、行。三次调用之间不保证快照一致
pub(crate) async fn load_table_view(
    remote: &dyn RemoteDbPort,
    table_index: usize,
) -> Result<TableView, ApplicationError> {
    let table = remote
        .tables_data()
        .await?
        .into_iter()
        .nth(table_index)
        .ok_or_else(|| ApplicationError::not_found("Table", table_index))?;

    let (columns, rows) = tokio::try_join!(remote.columns(table_index), remote.rows(table_index))?;

    tracing::debug!(
        table_index = table_index,
        name = %table.name,
        columns = columns.len(),
        rows = rows.len(),
        "Table view loaded"
    );

    Ok(TableView {
        name: table.name,
        columns,
        rows,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// ListTables Handler
pub struct ListTablesHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl ListTablesHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    pub async fn handle(&self, _query: ListTables) -> Result<Vec<TableData>, ApplicationError> {
        let _guard = self.gate.read().await;
        Ok(self.remote.tables_data().await?)
    }
}

/// ViewTable Handler
pub struct ViewTableHandler {
    remote: Arc<dyn RemoteDbPort>,
    gate: Arc<MutationGate>,
}

impl ViewTableHandler {
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: Arc<MutationGate>) -> Self {
        Self { remote, gate }
    }

    pub async fn handle(&self, query: ViewTable) -> Result<TableView, ApplicationError> {
        let _guard = self.gate.read().await;
        load_table_view(self.remote.as_ref(), query.table_index).await
    }
}
