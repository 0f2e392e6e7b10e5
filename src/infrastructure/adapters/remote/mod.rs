//! Remote Adapter - 远程表服务句柄
//!
//! - registry: 启动时经注册表解析句柄
//! - http_remote_db: JSON 对象调用协议客户端
//! - in_memory_remote_db: 进程内实现

mod http_remote_db;
mod in_memory_remote_db;
pub mod protocol;
mod registry;

use std::sync::Arc;

use crate::application::ports::{RemoteDbPort, RemoteError};
use crate::config::{RemoteConfig, RemoteMode};

pub use http_remote_db::{HttpRemoteDb, HttpRemoteDbConfig};
pub use in_memory_remote_db::InMemoryRemoteDb;
pub use registry::RegistryLocator;

/// 按配置获取远程句柄
///
/// 进程启动时调用一次；返回的句柄在整个进程生命周期内共享
pub async fn connect_remote(config: &RemoteConfig) -> Result<Arc<dyn RemoteDbPort>, RemoteError> {
    match config.mode {
        RemoteMode::Memory => {
            tracing::warn!("Using in-process table service, data is not persisted");
            Ok(Arc::new(InMemoryRemoteDb::new()))
        }
        RemoteMode::Registry => {
            let locator = RegistryLocator::new(
                config.registry_host.clone(),
                config.registry_port,
                config.timeout_secs,
            );
            let remote = locator.lookup(&config.binding_name).await?;
            Ok(Arc::new(remote))
        }
    }
}
