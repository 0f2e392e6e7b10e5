//! Table Context - Entities
//!
//! 表、列、行在远程服务与本服务之间传递的形状

use serde::{Deserialize, Serialize};

use super::{ColumnBounds, ColumnType, TableError};

/// 表目录项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub name: String,
}

impl TableData {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 列定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

impl Column {
    /// 解析该列的取值边界
    pub fn bounds(&self) -> Result<ColumnBounds, TableError> {
        ColumnBounds::parse(self.column_type, self.min.as_deref(), self.max.as_deref())
    }

    /// 校验单元格取值
    pub fn validate(&self, value: &str) -> Result<(), TableError> {
        self.column_type.validate(value, &self.bounds()?)
    }
}

/// 新增列的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColumn {
    pub name: String,
    pub column_type: ColumnType,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl NewColumn {
    /// 构造列定义，列名不能为空，边界必须与列类型匹配
    pub fn into_column(self) -> Result<Column, TableError> {
        if self.name.trim().is_empty() {
            return Err(TableError::InvalidColumnName(
                "column name cannot be blank".to_string(),
            ));
        }
        let column = Column {
            name: self.name,
            column_type: self.column_type,
            min: self.min.filter(|s| !s.trim().is_empty()),
            max: self.max.filter(|s| !s.trim().is_empty()),
        };
        column.bounds()?;
        Ok(column)
    }
}

/// 行：每列一个单元格
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<String>,
}

impl Row {
    /// 创建指定列数的空行
    pub fn empty(width: usize) -> Self {
        Self {
            values: vec![String::new(); width],
        }
    }

    /// 按列下标投影
    pub fn project(&self, indices: &[usize]) -> Row {
        Row {
            values: indices
                .iter()
                .map(|&i| self.values.get(i).cloned().unwrap_or_default())
                .collect(),
        }
    }
}

/// 表的完整视图（表名 + 列 + 行）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}
