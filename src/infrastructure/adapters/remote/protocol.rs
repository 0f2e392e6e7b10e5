//! Remote Invocation Protocol - 远程对象调用的 JSON 封包
//!
//! 注册表查找:
//! GET http://{registry_host}:{registry_port}/registry/{binding_name}
//! Response: {"endpoint": "http://..."}
//!
//! 方法调用:
//! POST {endpoint}/invoke
//! Request: {"method": "getColumns", "args": {"tableIndex": 0}}
//! Response: {"ok": <value>} 或 {"fault": {"kind": "notFound", "message": "..."}}

use serde::{Deserialize, Serialize};

use crate::application::ports::RemoteError;
use crate::domain::table::ColumnType;

/// 注册表查找响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub endpoint: String,
}

/// 远程方法调用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "method",
    content = "args",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum RemoteCall {
    GetTablesData,
    GetColumns {
        table_index: usize,
    },
    GetRows {
        table_index: usize,
    },
    CreateTable {
        name: String,
    },
    AddColumn {
        table_index: usize,
        name: String,
        column_type: ColumnType,
        min: Option<String>,
        max: Option<String>,
    },
    AddRow {
        table_index: usize,
    },
    DeleteRow {
        table_index: usize,
        row_index: usize,
    },
    DeleteColumn {
        table_index: usize,
        column_index: usize,
    },
    DeleteTable {
        table_index: usize,
    },
    EditCell {
        table_index: usize,
        row_index: usize,
        column_index: usize,
        value: String,
    },
    TablesMultiply {
        table_index1: usize,
        table_index2: usize,
    },
}

impl RemoteCall {
    /// 方法名（用于日志）
    pub fn method(&self) -> &'static str {
        match self {
            RemoteCall::GetTablesData => "getTablesData",
            RemoteCall::GetColumns { .. } => "getColumns",
            RemoteCall::GetRows { .. } => "getRows",
            RemoteCall::CreateTable { .. } => "createTable",
            RemoteCall::AddColumn { .. } => "addColumn",
            RemoteCall::AddRow { .. } => "addRow",
            RemoteCall::DeleteRow { .. } => "deleteRow",
            RemoteCall::DeleteColumn { .. } => "deleteColumn",
            RemoteCall::DeleteTable { .. } => "deleteTable",
            RemoteCall::EditCell { .. } => "editCell",
            RemoteCall::TablesMultiply { .. } => "tablesMultiply",
        }
    }
}

/// 远程故障类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FaultKind {
    NotFound,
    Rejected,
    Internal,
}

/// 远程故障
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteFault {
    pub kind: FaultKind,
    pub message: String,
}

impl From<RemoteFault> for RemoteError {
    fn from(fault: RemoteFault) -> Self {
        match fault.kind {
            FaultKind::NotFound => RemoteError::NotFound(fault.message),
            FaultKind::Rejected => RemoteError::Rejected(fault.message),
            FaultKind::Internal => RemoteError::Internal(fault.message),
        }
    }
}

/// 远程调用结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RemoteReply {
    Ok(serde_json::Value),
    Fault(RemoteFault),
}
