//! tablegate - 远程表服务的 REST 门面
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Table Context: 表、列、行与列类型校验
//!
//! 应用层 (application/):
//! - Ports: RemoteDbPort（远程表服务句柄）
//! - Commands: 写操作 + 回读视图
//! - Queries: 列表与单表视图
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: 注册表查找、HTTP 远程客户端、进程内实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
