//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（RemoteDbPort）
//! - commands: CQRS 命令及处理器（写操作 + 回读）
//! - queries: CQRS 查询及处理器
//! - mutation_gate: 可选的写操作串行化
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod mutation_gate;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    AddColumn, AddRow, CreateTable, DeleteColumn, DeleteRow, DeleteTable, EditCell,
    IntersectTables,
    // Handlers
    handlers::{
        AddColumnHandler, AddRowHandler, CreateTableHandler, DeleteColumnHandler,
        DeleteRowHandler, DeleteTableHandler, EditCellHandler, IntersectTablesHandler,
    },
};

pub use error::ApplicationError;
pub use mutation_gate::MutationGate;

pub use ports::{RemoteDbPort, RemoteError};

pub use queries::{
    ListTables, ViewTable,
    // Handlers
    handlers::{ListTablesHandler, ViewTableHandler},
};
