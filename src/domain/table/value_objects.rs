//! Table Context - Value Objects

use serde::{Deserialize, Serialize};

use super::TableError;

/// 表名
///
/// 去除首尾空白后不能为空；原样保存，不做裁剪
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> Result<Self, TableError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TableError::InvalidName("table name cannot be blank".to_string()));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 列类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    Int,
    Real,
    Char,
    String,
    Money,
    MoneyInvl,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "INT",
            ColumnType::Real => "REAL",
            ColumnType::Char => "CHAR",
            ColumnType::String => "STRING",
            ColumnType::Money => "MONEY",
            ColumnType::MoneyInvl => "MONEY_INVL",
        }
    }

    /// 是否支持 min/max 边界
    pub fn is_bounded(&self) -> bool {
        !matches!(self, ColumnType::Char | ColumnType::String)
    }

    /// 解析单个数值（INT / REAL / MONEY 语义）
    fn parse_number(&self, raw: &str) -> Option<Number> {
        match self {
            ColumnType::Int => raw.parse::<i64>().ok().map(Number::Int),
            ColumnType::Real => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Number::Decimal),
            ColumnType::Money | ColumnType::MoneyInvl => parse_money(raw).map(Number::Decimal),
            ColumnType::Char | ColumnType::String => None,
        }
    }

    /// 校验单元格取值
    ///
    /// 空字符串表示未填写，任何类型都接受
    pub fn validate(&self, value: &str, bounds: &ColumnBounds) -> Result<(), TableError> {
        if value.is_empty() {
            return Ok(());
        }

        let invalid = || TableError::InvalidValue {
            column_type: *self,
            value: value.to_string(),
        };

        match self {
            ColumnType::String => Ok(()),
            ColumnType::Char => {
                if value.chars().count() == 1 {
                    Ok(())
                } else {
                    Err(invalid())
                }
            }
            ColumnType::Int | ColumnType::Real | ColumnType::Money => {
                let number = self.parse_number(value).ok_or_else(invalid)?;
                bounds.check(value, number)
            }
            ColumnType::MoneyInvl => {
                let (lo, hi) = value.split_once(';').ok_or_else(invalid)?;
                let lo_value = self.parse_number(lo.trim()).ok_or_else(invalid)?;
                let hi_value = self.parse_number(hi.trim()).ok_or_else(invalid)?;
                if lo_value > hi_value {
                    return Err(invalid());
                }
                bounds.check(value, lo_value)?;
                bounds.check(value, hi_value)
            }
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 金额：可选负号，整数部分，最多两位小数
fn parse_money(raw: &str) -> Option<f64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    raw.parse::<f64>().ok()
}

/// 已解析的数值
///
/// INT 按 i64 比较，不经 f64。
/// 同一列的取值与边界总是同一种形式
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Number {
    Int(i64),
    Decimal(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// 列取值边界
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnBounds {
    min: Option<Number>,
    max: Option<Number>,
}

impl ColumnBounds {
    /// 无边界
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// 按列类型解析 min/max 字符串
    ///
    /// 空白字符串视为未设置；不支持边界的类型忽略 min/max
    pub fn parse(
        column_type: ColumnType,
        min: Option<&str>,
        max: Option<&str>,
    ) -> Result<Self, TableError> {
        if !column_type.is_bounded() {
            return Ok(Self::unbounded());
        }

        let parse_one = |label: &str, raw: Option<&str>| -> Result<Option<Number>, TableError> {
            match raw.map(str::trim).filter(|s| !s.is_empty()) {
                None => Ok(None),
                Some(s) => column_type.parse_number(s).map(Some).ok_or_else(|| {
                    TableError::InvalidBounds(format!("{} {:?} is not a valid {}", label, s, column_type))
                }),
            }
        };

        let min = parse_one("min", min)?;
        let max = parse_one("max", max)?;

        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(TableError::InvalidBounds(format!(
                    "min {} is greater than max {}",
                    lo, hi
                )));
            }
        }

        Ok(Self { min, max })
    }

    fn check(&self, raw: &str, value: Number) -> Result<(), TableError> {
        let below = self.min.map(|lo| value < lo).unwrap_or(false);
        let above = self.max.map(|hi| value > hi).unwrap_or(false);
        if below || above {
            return Err(TableError::OutOfRange {
                value: raw.to_string(),
                min: self.min.map(|v| v.to_string()).unwrap_or_else(|| "-inf".to_string()),
                max: self.max.map(|v| v.to_string()).unwrap_or_else(|| "+inf".to_string()),
            });
        }
        Ok(())
    }
}
