//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：所有写操作在修改远程状态后回读最新视图

mod table_commands;

pub mod handlers;

pub use table_commands::*;
