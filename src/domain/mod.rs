//! Domain Layer - 领域层
//!
//! Table Context: 表/列/行的形状与单元格取值规则

pub mod table;
