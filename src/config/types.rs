//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 远程表服务配置
    #[serde(default)]
    pub remote: RemoteConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 所有接口的公共路径前缀，空字符串表示挂在根路径
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path_prefix() -> String {
    "/lab".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path_prefix: default_path_prefix(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 远程句柄来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteMode {
    /// 通过注册表查找绑定名
    #[default]
    Registry,
    /// 进程内实现（开发/演示用，不持久化）
    Memory,
}

/// 远程表服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub mode: RemoteMode,

    /// 注册表主机
    #[serde(default = "default_registry_host")]
    pub registry_host: String,

    /// 注册表端口
    #[serde(default = "default_registry_port")]
    pub registry_port: u16,

    /// 远程服务在注册表中的绑定名
    #[serde(default = "default_binding_name")]
    pub binding_name: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,

    /// 串行化写操作（修改 + 回读 期间独占）
    #[serde(default)]
    pub serialize_mutations: bool,
}

fn default_registry_host() -> String {
    "localhost".to_string()
}

fn default_registry_port() -> u16 {
    8081
}

fn default_binding_name() -> String {
    "server.db".to_string()
}

fn default_remote_timeout() -> u64 {
    30
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            mode: RemoteMode::default(),
            registry_host: default_registry_host(),
            registry_port: default_registry_port(),
            binding_name: default_binding_name(),
            timeout_secs: default_remote_timeout(),
            serialize_mutations: false,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.path_prefix, "/lab");
        assert_eq!(config.remote.mode, RemoteMode::Registry);
        assert_eq!(config.remote.registry_port, 8081);
        assert_eq!(config.remote.binding_name, "server.db");
        assert!(!config.remote.serialize_mutations);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }
}
