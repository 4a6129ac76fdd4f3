//! Operator definitions for predicate expressions.

use serde::{Deserialize, Serialize};

/// Comparison operators used by range leaves and field-to-field compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpType {
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
    Equal,
    NotEqual,

    // String matching
    PrefixMatch,
    PostfixMatch,
}

impl OpType {
    /// Whether the operator only applies to string operands
    pub fn is_string_match(&self) -> bool {
        matches!(self, OpType::PrefixMatch | OpType::PostfixMatch)
    }

    /// Whether the operator relies on an ordering of its operands
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            OpType::GreaterThan | OpType::GreaterEqual | OpType::LessThan | OpType::LessEqual
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OpType::GreaterThan => ">",
            OpType::GreaterEqual => ">=",
            OpType::LessThan => "<",
            OpType::LessEqual => "<=",
            OpType::Equal => "==",
            OpType::NotEqual => "!=",
            OpType::PrefixMatch => "PREFIX",
            OpType::PostfixMatch => "POSTFIX",
        }
    }
}

/// Arithmetic transforms applied to a field value before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOpType {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOpType {
    /// Whether a zero right operand makes the transform undefined
    pub fn rejects_zero(&self) -> bool {
        matches!(self, ArithOpType::Div | ArithOpType::Mod)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArithOpType::Add => "+",
            ArithOpType::Sub => "-",
            ArithOpType::Mul => "*",
            ArithOpType::Div => "/",
            ArithOpType::Mod => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalUnaryOp {
    Not,
}

impl LogicalUnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalUnaryOp::Not => "NOT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalBinaryOp {
    And,
    Or,
}

impl LogicalBinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalBinaryOp::And => "AND",
            LogicalBinaryOp::Or => "OR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_display() {
        assert_eq!(OpType::LessThan.as_str(), "<");
        assert_eq!(OpType::Equal.as_str(), "==");
        assert_eq!(OpType::NotEqual.as_str(), "!=");
        assert_eq!(ArithOpType::Mod.as_str(), "%");
        assert_eq!(LogicalUnaryOp::Not.as_str(), "NOT");
        assert_eq!(LogicalBinaryOp::Or.as_str(), "OR");
    }

    #[test]
    fn test_operator_classes() {
        assert!(OpType::PrefixMatch.is_string_match());
        assert!(!OpType::GreaterEqual.is_string_match());
        assert!(OpType::LessEqual.is_ordering());
        assert!(!OpType::NotEqual.is_ordering());
        assert!(!OpType::PrefixMatch.is_ordering());

        assert!(ArithOpType::Mod.rejects_zero());
        assert!(ArithOpType::Div.rejects_zero());
        assert!(!ArithOpType::Add.rejects_zero());
    }
}
