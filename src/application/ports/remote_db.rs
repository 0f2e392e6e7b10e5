//! Remote DB Port - 远程表服务抽象
//!
//! 本服务不持有任何表数据，所有读写都经由这里定义的远程句柄完成。
//! 具体实现在 infrastructure/adapters/remote 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::table::{Column, NewColumn, Row, TableData};

/// 远程调用错误
#[derive(Debug, Error)]
pub enum RemoteError {
    /// 注册表解析或绑定名查找失败
    #[error("Registry lookup failed: {0}")]
    Lookup(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    /// 远程服务返回非成功状态
    #[error("Service error: {0}")]
    Service(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 表/行/列下标不存在
    #[error("Not found: {0}")]
    NotFound(String),

    /// 远程服务拒绝了输入（列类型、边界等）
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Remote internal error: {0}")]
    Internal(String),
}

/// Remote DB Port
///
/// 下标均为远程服务当前集合中的序号，任何插入/删除都可能使其失效
#[async_trait]
pub trait RemoteDbPort: Send + Sync {
    /// 按顺序列出所有表
    async fn tables_data(&self) -> Result<Vec<TableData>, RemoteError>;

    async fn columns(&self, table_index: usize) -> Result<Vec<Column>, RemoteError>;

    async fn rows(&self, table_index: usize) -> Result<Vec<Row>, RemoteError>;

    /// 创建表，返回新表的下标
    async fn create_table(&self, name: &str) -> Result<usize, RemoteError>;

    async fn add_column(&self, table_index: usize, column: NewColumn) -> Result<(), RemoteError>;

    /// 追加一行空行
    async fn add_row(&self, table_index: usize) -> Result<(), RemoteError>;

    async fn delete_row(&self, table_index: usize, row_index: usize) -> Result<bool, RemoteError>;

    async fn delete_column(
        &self,
        table_index: usize,
        column_index: usize,
    ) -> Result<bool, RemoteError>;

    async fn delete_table(&self, table_index: usize) -> Result<bool, RemoteError>;

    async fn edit_cell(
        &self,
        table_index: usize,
        row_index: usize,
        column_index: usize,
        value: &str,
    ) -> Result<(), RemoteError>;

    /// 计算两表交集并作为新表追加，返回新表的下标
    async fn tables_multiply(
        &self,
        table_index1: usize,
        table_index2: usize,
    ) -> Result<usize, RemoteError>;

    /// 检查远程服务是否可用
    async fn health_check(&self) -> bool {
        true
    }
}
