//! Application State
//!
//! 远程句柄在启动时构造一次，经由 AppState 传给所有请求处理器

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddColumnHandler, AddRowHandler, CreateTableHandler, DeleteColumnHandler, DeleteRowHandler,
    DeleteTableHandler, EditCellHandler, IntersectTablesHandler,
    // Query handlers
    ListTablesHandler, ViewTableHandler,
    // Ports
    MutationGate, RemoteDbPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub remote: Arc<dyn RemoteDbPort>,
    pub gate: Arc<MutationGate>,

    // ========== Command Handlers ==========
    pub create_table_handler: CreateTableHandler,
    pub add_column_handler: AddColumnHandler,
    pub add_row_handler: AddRowHandler,
    pub delete_row_handler: DeleteRowHandler,
    pub delete_column_handler: DeleteColumnHandler,
    pub delete_table_handler: DeleteTableHandler,
    pub edit_cell_handler: EditCellHandler,
    pub intersect_tables_handler: IntersectTablesHandler,

    // ========== Query Handlers ==========
    pub list_tables_handler: ListTablesHandler,
    pub view_table_handler: ViewTableHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(remote: Arc<dyn RemoteDbPort>, gate: MutationGate) -> Self {
        let gate = Arc::new(gate);

        Self {
            // Ports
            remote: remote.clone(),
            gate: gate.clone(),

            // Command handlers
            create_table_handler: CreateTableHandler::new(remote.clone(), gate.clone()),
            add_column_handler: AddColumnHandler::new(remote.clone(), gate.clone()),
            add_row_handler: AddRowHandler::new(remote.clone(), gate.clone()),
            delete_row_handler: DeleteRowHandler::new(remote.clone(), gate.clone()),
            delete_column_handler: DeleteColumnHandler::new(remote.clone(), gate.clone()),
            delete_table_handler: DeleteTableHandler::new(remote.clone(), gate.clone()),
            edit_cell_handler: EditCellHandler::new(remote.clone(), gate.clone()),
            intersect_tables_handler: IntersectTablesHandler::new(remote.clone(), gate.clone()),

            // Query handlers
            list_tables_handler: ListTablesHandler::new(remote.clone(), gate.clone()),
            view_table_handler: ViewTableHandler::new(remote, gate),
        }
    }
}
