//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, RemoteMode};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `TABLEGATE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `TABLEGATE_SERVER__PORT=8080`
/// - `TABLEGATE_REMOTE__REGISTRY_HOST=db-host`
/// - `TABLEGATE_REMOTE__REGISTRY_PORT=8081`
/// - `TABLEGATE_REMOTE__MODE=memory`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("server.path_prefix", "/lab")?
        .set_default("remote.mode", "registry")?
        .set_default("remote.registry_host", "localhost")?
        .set_default("remote.registry_port", 8081)?
        .set_default("remote.binding_name", "server.db")?
        .set_default("remote.timeout_secs", 30)?
        .set_default("remote.serialize_mutations", false)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: TABLEGATE_REMOTE__BINDING_NAME=server.db
    builder = builder.add_source(
        Environment::with_prefix("TABLEGATE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    let prefix = &config.server.path_prefix;
    if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
        return Err(ConfigError::ValidationError(format!(
            "Path prefix must start with '/' and must not end with '/': {:?}",
            prefix
        )));
    }

    if config.remote.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Remote timeout cannot be 0".to_string(),
        ));
    }

    if config.remote.mode == RemoteMode::Registry {
        if config.remote.registry_port == 0 {
            return Err(ConfigError::ValidationError(
                "Registry port cannot be 0".to_string(),
            ));
        }
        if config.remote.registry_host.is_empty() {
            return Err(ConfigError::ValidationError(
                "Registry host cannot be empty".to_string(),
            ));
        }
        if config.remote.binding_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "Binding name cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Path Prefix: {:?}", config.server.path_prefix);
    tracing::info!("Remote Mode: {:?}", config.remote.mode);
    if config.remote.mode == RemoteMode::Registry {
        tracing::info!(
            "Registry: {}:{} (binding {:?})",
            config.remote.registry_host,
            config.remote.registry_port,
            config.remote.binding_name
        );
    }
    tracing::info!("Remote Timeout: {}s", config.remote.timeout_secs);
    tracing::info!("Serialize Mutations: {}", config.remote.serialize_mutations);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_of_path_prefix() {
        let mut config = AppConfig::default();
        for bad in ["lab", "/lab/", "/"] {
            config.server.path_prefix = bad.to_string();
            assert!(validate_config(&config).is_err(), "{:?} should be rejected", bad);
        }
        config.server.path_prefix = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_registry_settings_ignored_in_memory_mode() {
        let mut config = AppConfig::default();
        config.remote.registry_port = 0;
        assert!(validate_config(&config).is_err());

        config.remote.mode = RemoteMode::Memory;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9000\npath_prefix = \"/api\"\n\n[remote]\nmode = \"memory\"\nserialize_mutations = true"
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.path_prefix, "/api");
        assert_eq!(config.remote.mode, RemoteMode::Memory);
        assert!(config.remote.serialize_mutations);
        assert_eq!(config.remote.binding_name, "server.db");
    }
}
