use std::cmp::Ordering;
use std::fmt;

use crate::foundation::error::{DatagifError, DatagifResult};

/// A single dataset cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// Boolean cell.
    Bool(bool),
    /// Integer cell.
    Int(i64),
    /// Floating-point cell.
    Float(f64),
    /// Text cell.
    Text(String),
}

/// Comparability class of a [`Value`].
///
/// Values of the same kind are totally ordered; `Int` and `Float` share the `Numeric` kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueKind {
    /// [`Value::Null`].
    Null,
    /// [`Value::Bool`].
    Bool,
    /// [`Value::Int`] or [`Value::Float`].
    Numeric,
    /// [`Value::Text`].
    Text,
}

impl Value {
    /// Return the comparability class of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) | Self::Float(_) => ValueKind::Numeric,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the value; `None` for non-numeric cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Total order over values.
    ///
    /// Values of different kinds order by kind (`Null < Bool < Numeric < Text`); callers that
    /// need mutual comparability check kinds first.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Null, Self::Null) => Ordering::Equal,
            (a, b) if a.kind() == ValueKind::Numeric && b.kind() == ValueKind::Numeric => {
                let (x, y) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
                x.total_cmp(&y)
            }
            (a, b) => a.kind().cmp(&b.kind()),
        }
    }

    /// Render the value for use inside a file name.
    ///
    /// Floats always carry a fractional part (`2.0`), and path separators in text are replaced
    /// so the label cannot escape the output directory.
    pub fn file_label(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => format!("{v:?}"),
            Self::Text(s) => s.replace(['/', '\\'], "_"),
        }
    }

    /// Parse a raw text cell (CSV) into the narrowest matching value.
    pub fn parse_cell(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Self::Null;
        }
        if let Ok(v) = s.parse::<i64>() {
            return Self::Int(v);
        }
        if let Ok(v) = s.parse::<f64>() {
            return Self::Float(v);
        }
        match s {
            "true" | "True" | "TRUE" => Self::Bool(true),
            "false" | "False" | "FALSE" => Self::Bool(false),
            _ => Self::Text(s.to_string()),
        }
    }

    /// Convert a scalar JSON value into a cell.
    pub fn from_json(v: &serde_json::Value) -> DatagifResult<Self> {
        match v {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => n
                    .as_f64()
                    .map(Self::Float)
                    .ok_or_else(|| DatagifError::schema(format!("unrepresentable number {n}"))),
            },
            serde_json::Value::String(s) => Ok(Self::Text(s.clone())),
            other => Err(DatagifError::schema(format!(
                "dataset cells must be scalars, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
