//! Table Context - Errors

use thiserror::Error;

use super::ColumnType;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("Invalid table name: {0}")]
    InvalidName(String),

    #[error("Invalid column name: {0}")]
    InvalidColumnName(String),

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Value {value:?} is not a valid {column_type}")]
    InvalidValue {
        column_type: ColumnType,
        value: String,
    },

    #[error("Value {value:?} is outside [{min}, {max}]")]
    OutOfRange {
        value: String,
        min: String,
        max: String,
    },
}
