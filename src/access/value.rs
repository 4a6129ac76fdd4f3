use serde::{Deserialize, Serialize};
use std::fmt;

/// Data types a schema field can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    VarChar,
    /// Dense float vector of the given dimension
    FloatVector { dim: u32 },
    /// Packed binary vector of the given dimension (in bits)
    BinaryVector { dim: u32 },
}

impl DataType {
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            DataType::FloatVector { .. } | DataType::BinaryVector { .. }
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, DataType::Float | DataType::Double)
    }

    /// Literal kind a predicate on a field of this type must use
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            DataType::Bool => Some(ValueKind::Bool),
            DataType::VarChar => Some(ValueKind::String),
            t if t.is_numeric() => Some(ValueKind::Number),
            _ => None,
        }
    }
}

/// Literal value embedded in a predicate leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GenericValue {
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
}

/// Coarse literal category used to reject leaves that mix literal kinds.
/// Integers and floats share a kind since no coercion happens at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Number,
    String,
}

impl GenericValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            GenericValue::Bool(_) => ValueKind::Bool,
            GenericValue::Int64(_) | GenericValue::Float64(_) => ValueKind::Number,
            GenericValue::String(_) => ValueKind::String,
        }
    }
}

impl From<bool> for GenericValue {
    fn from(val: bool) -> Self {
        GenericValue::Bool(val)
    }
}

impl From<i64> for GenericValue {
    fn from(val: i64) -> Self {
        GenericValue::Int64(val)
    }
}

impl From<f64> for GenericValue {
    fn from(val: f64) -> Self {
        GenericValue::Float64(val)
    }
}

impl From<&str> for GenericValue {
    fn from(val: &str) -> Self {
        GenericValue::String(val.to_string())
    }
}

impl From<String> for GenericValue {
    fn from(val: String) -> Self {
        GenericValue::String(val)
    }
}

impl fmt::Display for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericValue::Bool(v) => write!(f, "{}", v),
            GenericValue::Int64(v) => write!(f, "{}", v),
            GenericValue::Float64(v) => write!(f, "{}", v),
            GenericValue::String(v) => write!(f, "{:?}", v),
        }
    }
}
