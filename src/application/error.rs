//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::RemoteError;
use crate::domain::table::TableError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到（表/行/列下标越界）
    #[error("{0}")]
    NotFound(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 远程服务拒绝了输入
    #[error("Rejected by remote service: {0}")]
    RemoteRejected(String),

    /// 远程服务不可达或响应异常
    #[error("Remote service unavailable: {0}")]
    RemoteUnavailable(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, index: usize) -> Self {
        Self::NotFound(format!("{} not found at index {}", resource_type, index))
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<RemoteError> for ApplicationError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound(msg) => Self::NotFound(msg),
            RemoteError::Rejected(msg) => Self::RemoteRejected(msg),
            RemoteError::Internal(msg) => Self::InternalError(msg),
            other => Self::RemoteUnavailable(other.to_string()),
        }
    }
}

impl From<TableError> for ApplicationError {
    fn from(err: TableError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
