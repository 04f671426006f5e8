use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

/// Column types a chunk can be inferred to.
///
/// Every CSV cell starts out as text and is only promoted when every
/// non-missing cell of the column agrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Long,
    Double,
    String,
}

impl DataType {
    pub fn mysql_name(&self) -> Cow<'_, str> {
        match self {
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::Long => Cow::Borrowed("BIGINT"),
            DataType::Double => Cow::Borrowed("DOUBLE"),
            DataType::String => Cow::Borrowed("TEXT"),
        }
    }

    /// Converts a non-missing cell into a value of this type.
    ///
    /// Returns `None` when the text does not fit the type; inference only
    /// picks a type that every cell of the column fits, so callers treat
    /// `None` as a missing cell.
    pub fn parse_cell(&self, cell: &str) -> Option<Value> {
        match self {
            DataType::Boolean => parse_bool(cell).map(Value::Boolean),
            DataType::Long => parse_long(cell).map(Value::Int),
            DataType::Double => parse_double(cell).map(Value::Float),
            DataType::String => Some(Value::String(cell.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mysql_name())
    }
}

pub fn parse_bool(cell: &str) -> Option<bool> {
    match cell {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Parses an integer cell, also accepting floats with no fractional part
/// (`"3.0"`) as long as they fit in an `i64`.
pub fn parse_long(cell: &str) -> Option<i64> {
    if let Ok(v) = cell.parse::<i64>() {
        return Some(v);
    }
    parse_double(cell).and_then(integral_f64)
}

pub fn parse_double(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn integral_f64(v: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or past it overflows i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if v.fract() == 0.0 && v >= -LIMIT && v < LIMIT {
        Some(v as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_names() {
        assert_eq!(DataType::Boolean.mysql_name(), "BOOLEAN");
        assert_eq!(DataType::Long.mysql_name(), "BIGINT");
        assert_eq!(DataType::Double.mysql_name(), "DOUBLE");
        assert_eq!(DataType::String.to_string(), "TEXT");
    }

    #[test]
    fn test_parse_long_accepts_integral_floats() {
        assert_eq!(parse_long("42"), Some(42));
        assert_eq!(parse_long("-7"), Some(-7));
        assert_eq!(parse_long("3.0"), Some(3));
        assert_eq!(parse_long("3.5"), None);
        assert_eq!(parse_long("1e300"), None);
        assert_eq!(parse_long("abc"), None);
    }

    #[test]
    fn test_parse_double_rejects_non_finite() {
        assert_eq!(parse_double("1.25"), Some(1.25));
        assert_eq!(parse_double("inf"), None);
        assert_eq!(parse_double("-infinity"), None);
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(DataType::Boolean.parse_cell("TRUE"), Some(Value::Boolean(true)));
        assert_eq!(DataType::Boolean.parse_cell("yes"), None);
        assert_eq!(DataType::Long.parse_cell("10"), Some(Value::Int(10)));
        assert_eq!(DataType::Double.parse_cell("0.5"), Some(Value::Float(0.5)));
        assert_eq!(
            DataType::String.parse_cell("hello"),
            Some(Value::String("hello".to_string()))
        );
    }
}
