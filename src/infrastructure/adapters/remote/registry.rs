//! Registry Lookup - 启动时解析远程句柄
//!
//! 向固定端口上的注册表查询绑定名，得到远程表服务的端点。
//! 查找失败由调用方视为致命错误，不重试

use reqwest::Client;
use std::time::Duration;

use super::http_remote_db::{map_send_error, HttpRemoteDb, HttpRemoteDbConfig};
use super::protocol::LookupResponse;
use crate::application::ports::RemoteError;

/// 注册表定位器
#[derive(Debug, Clone)]
pub struct RegistryLocator {
    host: String,
    port: u16,
    timeout_secs: u64,
}

impl RegistryLocator {
    pub fn new(host: impl Into<String>, port: u16, timeout_secs: u64) -> Self {
        Self {
            host: host.into(),
            port,
            timeout_secs,
        }
    }

    fn lookup_url(&self, binding_name: &str) -> String {
        format!(
            "http://{}:{}/registry/{}",
            self.host, self.port, binding_name
        )
    }

    /// 查找绑定名，返回已连接的远程句柄
    pub async fn lookup(&self, binding_name: &str) -> Result<HttpRemoteDb, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Lookup(e.to_string()))?;

        let url = self.lookup_url(binding_name);
        tracing::debug!(url = %url, "Looking up remote binding");

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Lookup(map_send_error(e, "registry").to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Lookup(format!(
                "binding {:?} not resolvable at {}:{} (HTTP {})",
                binding_name, self.host, self.port, status
            )));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Lookup(format!("malformed registry reply: {}", e)))?;

        if lookup.endpoint.trim().is_empty() {
            return Err(RemoteError::Lookup(format!(
                "binding {:?} has an empty endpoint",
                binding_name
            )));
        }

        tracing::info!(
            binding = binding_name,
            endpoint = %lookup.endpoint,
            "Remote binding resolved"
        );

        HttpRemoteDb::new(
            HttpRemoteDbConfig::new(lookup.endpoint).with_timeout(self.timeout_secs),
        )
    }
}
