//! Table Context - 表格限界上下文
//!
//! 职责:
//! - 表、列、行的数据形状（与远程服务共享）
//! - 列类型与取值校验规则

mod entities;
mod errors;
mod value_objects;

pub use entities::{Column, NewColumn, Row, TableData, TableView};
pub use errors::TableError;
pub use value_objects::{ColumnBounds, ColumnType, TableName};
