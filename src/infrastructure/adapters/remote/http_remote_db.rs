//! HTTP Remote DB - 通过 JSON 对象调用协议访问远程表服务
//!
//! 实现 RemoteDbPort trait，每个方法对应一次 POST {endpoint}/invoke

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::protocol::{RemoteCall, RemoteReply};
use crate::application::ports::{RemoteDbPort, RemoteError};
use crate::domain::table::{Column, NewColumn, Row, TableData};

/// HTTP Remote DB 客户端配置
#[derive(Debug, Clone)]
pub struct HttpRemoteDbConfig {
    /// 注册表解析出的服务端点
    pub endpoint: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl HttpRemoteDbConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: 30,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

pub(super) fn map_send_error(e: reqwest::Error, what: &str) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else if e.is_connect() {
        RemoteError::Network(format!("Cannot connect to {}: {}", what, e))
    } else {
        RemoteError::Network(e.to_string())
    }
}

/// HTTP Remote DB 客户端
pub struct HttpRemoteDb {
    client: Client,
    config: HttpRemoteDbConfig,
}

impl HttpRemoteDb {
    pub fn new(config: HttpRemoteDbConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn invoke_url(&self) -> String {
        format!("{}/invoke", self.config.endpoint.trim_end_matches('/'))
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.endpoint.trim_end_matches('/'))
    }

    /// 发送一次远程调用并解析结果
    async fn invoke<T: DeserializeOwned>(&self, call: RemoteCall) -> Result<T, RemoteError> {
        let method = call.method();
        tracing::debug!(url = %self.invoke_url(), method = method, "Sending remote call");

        let response = self
            .client
            .post(self.invoke_url())
            .json(&call)
            .send()
            .await
            .map_err(|e| map_send_error(e, "remote table service"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RemoteError::Service(format!(
                "{} returned HTTP {}: {}",
                method, status, error_text
            )));
        }

        let reply: RemoteReply = response.json().await.map_err(|e| {
            RemoteError::InvalidResponse(format!("{}: failed to decode reply: {}", method, e))
        })?;

        match reply {
            RemoteReply::Ok(value) => serde_json::from_value(value).map_err(|e| {
                RemoteError::InvalidResponse(format!("{}: unexpected result shape: {}", method, e))
            }),
            RemoteReply::Fault(fault) => {
                tracing::debug!(method = method, kind = ?fault.kind, message = %fault.message, "Remote fault");
                Err(fault.into())
            }
        }
    }
}

#[async_trait]
impl RemoteDbPort for HttpRemoteDb {
    async fn tables_data(&self) -> Result<Vec<TableData>, RemoteError> {
        self.invoke(RemoteCall::GetTablesData).await
    }

    async fn columns(&self, table_index: usize) -> Result<Vec<Column>, RemoteError> {
        self.invoke(RemoteCall::GetColumns { table_index }).await
    }

    async fn rows(&self, table_index: usize) -> Result<Vec<Row>, RemoteError> {
        self.invoke(RemoteCall::GetRows { table_index }).await
    }

    async fn create_table(&self, name: &str) -> Result<usize, RemoteError> {
        self.invoke(RemoteCall::CreateTable {
            name: name.to_string(),
        })
        .await
    }

    async fn add_column(&self, table_index: usize, column: NewColumn) -> Result<(), RemoteError> {
        self.invoke(RemoteCall::AddColumn {
            table_index,
            name: column.name,
            column_type: column.column_type,
            min: column.min,
            max: column.max,
        })
        .await
    }

    async fn add_row(&self, table_index: usize) -> Result<(), RemoteError> {
        self.invoke(RemoteCall::AddRow { table_index }).await
    }

    async fn delete_row(&self, table_index: usize, row_index: usize) -> Result<bool, RemoteError> {
        self.invoke(RemoteCall::DeleteRow {
            table_index,
            row_index,
        })
        .await
    }

    async fn delete_column(
        &self,
        table_index: usize,
        column_index: usize,
    ) -> Result<bool, RemoteError> {
        self.invoke(RemoteCall::DeleteColumn {
            table_index,
            column_index,
        })
        .await
    }

    async fn delete_table(&self, table_index: usize) -> Result<bool, RemoteError> {
        self.invoke(RemoteCall::DeleteTable { table_index }).await
    }

    async fn edit_cell(
        &self,
        table_index: usize,
        row_index: usize,
        column_index: usize,
        value: &str,
    ) -> Result<(), RemoteError> {
        self.invoke(RemoteCall::EditCell {
            table_index,
            row_index,
            column_index,
            value: value.to_string(),
        })
        .await
    }

    async fn tables_multiply(
        &self,
        table_index1: usize,
        table_index2: usize,
    ) -> Result<usize, RemoteError> {
        self.invoke(RemoteCall::TablesMultiply {
            table_index1,
            table_index2,
        })
        .await
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::table::ColumnType;
    use crate::infrastructure::adapters::remote::protocol::RemoteFault;
    use crate::infrastructure::adapters::remote::protocol::{FaultKind, LookupResponse};
    use crate::infrastructure::adapters::InMemoryRemoteDb;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde::Serialize;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    fn reply<T: Serialize>(result: Result<T, RemoteError>) -> RemoteReply {
        match result {
            Ok(value) => RemoteReply::Ok(serde_json::to_value(value).unwrap()),
            Err(err) => {
                let kind = match err {
                    RemoteError::NotFound(_) => FaultKind::NotFound,
                    RemoteError::Rejected(_) => FaultKind::Rejected,
                    _ => FaultKind::Internal,
                };
                RemoteReply::Fault(RemoteFault {
                    kind,
                    message: err.to_string(),
                })
            }
        }
    }

    async fn dispatch(db: &InMemoryRemoteDb, call: RemoteCall) -> RemoteReply {
        match call {
            RemoteCall::GetTablesData => reply(db.tables_data().await),
            RemoteCall::GetColumns { table_index } => reply(db.columns(table_index).await),
            RemoteCall::GetRows { table_index } => reply(db.rows(table_index).await),
            RemoteCall::CreateTable { name } => reply(db.create_table(&name).await),
            RemoteCall::AddColumn {
                table_index,
                name,
                column_type,
                min,
                max,
            } => reply(
                db.add_column(
                    table_index,
                    NewColumn {
                        name,
                        column_type,
                        min,
                        max,
                    },
                )
                .await,
            ),
            RemoteCall::AddRow { table_index } => reply(db.add_row(table_index).await),
            RemoteCall::DeleteRow {
                table_index,
                row_index,
            } => reply(db.delete_row(table_index, row_index).await),
            RemoteCall::DeleteColumn {
                table_index,
                column_index,
            } => reply(db.delete_column(table_index, column_index).await),
            RemoteCall::DeleteTable { table_index } => reply(db.delete_table(table_index).await),
            RemoteCall::EditCell {
                table_index,
                row_index,
                column_index,
                value,
            } => reply(
                db.edit_cell(table_index, row_index, column_index, &value)
                    .await,
            ),
            RemoteCall::TablesMultiply {
                table_index1,
                table_index2,
            } => reply(db.tables_multiply(table_index1, table_index2).await),
        }
    }

    /// 启动一个桩服务：注册表 + 以 InMemoryRemoteDb 为后端的 invoke 端点
    ///
    /// 返回注册表端口；绑定名固定为 "server.db"
    pub(crate) async fn spawn_stub_registry() -> u16 {
        #[derive(Clone)]
        struct Stub {
            db: Arc<InMemoryRemoteDb>,
            endpoint: String,
        }

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let stub = Stub {
            db: Arc::new(InMemoryRemoteDb::new()),
            endpoint: format!("http://127.0.0.1:{}/db", port),
        };

        let router = Router::new()
            .route(
                "/registry/:name",
                get(|State(stub): State<Stub>, Path(name): Path<String>| async move {
                    if name == "server.db" {
                        Ok(Json(LookupResponse {
                            endpoint: stub.endpoint.clone(),
                        }))
                    } else {
                        Err(StatusCode::NOT_FOUND)
                    }
                }),
            )
            .route(
                "/db/invoke",
                post(|State(stub): State<Stub>, Json(call): Json<RemoteCall>| async move {
                    Json(dispatch(&stub.db, call).await)
                }),
            )
            .route("/db/health", get(|| async { "ok" }))
            .with_state(stub);

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        port
    }

    fn client_for(port: u16) -> HttpRemoteDb {
        HttpRemoteDb::new(HttpRemoteDbConfig::new(format!("http://127.0.0.1:{}/db", port)))
            .unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = HttpRemoteDbConfig::new("http://example.com:9000").with_timeout(5);
        assert_eq!(config.endpoint, "http://example.com:9000");
        assert_eq!(config.timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_round_trip_through_stub() {
        let port = spawn_stub_registry().await;
        let db = client_for(port);

        assert!(db.health_check().await);
        assert_eq!(db.create_table("Orders").await.unwrap(), 0);
        db.add_column(
            0,
            NewColumn {
                name: "qty".to_string(),
                column_type: ColumnType::Int,
                min: Some("0".to_string()),
                max: None,
            },
        )
        .await
        .unwrap();
        db.add_row(0).await.unwrap();
        db.edit_cell(0, 0, 0, "7").await.unwrap();

        let tables = db.tables_data().await.unwrap();
        assert_eq!(tables, vec![TableData::new("Orders")]);
        let columns = db.columns(0).await.unwrap();
        assert_eq!(columns[0].column_type, ColumnType::Int);
        assert_eq!(columns[0].min.as_deref(), Some("0"));
        assert_eq!(db.rows(0).await.unwrap()[0].values, vec!["7"]);
        assert!(db.delete_row(0, 0).await.unwrap());
    }

    #[tokio::test]
    async fn test_faults_map_to_remote_errors() {
        let port = spawn_stub_registry().await;
        let db = client_for(port);

        assert!(matches!(db.rows(3).await, Err(RemoteError::NotFound(_))));
        db.create_table("t").await.unwrap();
        db.add_column(
            0,
            NewColumn {
                name: "n".to_string(),
                column_type: ColumnType::Int,
                min: None,
                max: None,
            },
        )
        .await
        .unwrap();
        db.add_row(0).await.unwrap();
        assert!(matches!(
            db.edit_cell(0, 0, 0, "not a number").await,
            Err(RemoteError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let db = client_for(port);
        assert!(matches!(db.tables_data().await, Err(RemoteError::Network(_))));
        assert!(!db.health_check().await);
    }
}
