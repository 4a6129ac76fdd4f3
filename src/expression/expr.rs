//! Predicate expression tree definitions.
//!
//! Every node owns its children exclusively and is never mutated after
//! construction, so a tree can be read by several analyses at once.

use crate::access::GenericValue;
use crate::expression::operator::{ArithOpType, LogicalBinaryOp, LogicalUnaryOp, OpType};
use crate::schema::FieldId;
use serde::{Deserialize, Serialize};

/// Boolean negation of one operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalUnaryExpr {
    pub op: LogicalUnaryOp,
    pub child: Box<Expr>,
}

/// Boolean combination of two operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalBinaryExpr {
    pub op: LogicalBinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// Membership test: `field IN (values...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermExpr {
    pub field_id: FieldId,
    pub values: Vec<GenericValue>,
}

/// Comparison against a single literal: `field <op> value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryRangeExpr {
    pub field_id: FieldId,
    pub op: OpType,
    pub value: GenericValue,
}

/// Two-sided range: `lower <(=) field <(=) upper`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryRangeExpr {
    pub field_id: FieldId,
    pub lower: GenericValue,
    pub lower_inclusive: bool,
    pub upper: GenericValue,
    pub upper_inclusive: bool,
}

/// Range over a transformed value: `(field <arith_op> right_operand) <op> value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryArithOpEvalRangeExpr {
    pub field_id: FieldId,
    pub arith_op: ArithOpType,
    pub right_operand: GenericValue,
    pub op: OpType,
    pub value: GenericValue,
}

/// Field-to-field comparison: `left <op> right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareExpr {
    pub left_field_id: FieldId,
    pub right_field_id: FieldId,
    pub op: OpType,
}

/// Predicate expression tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    LogicalUnary(LogicalUnaryExpr),
    LogicalBinary(LogicalBinaryExpr),
    Term(TermExpr),
    UnaryRange(UnaryRangeExpr),
    BinaryRange(BinaryRangeExpr),
    BinaryArithOpEvalRange(BinaryArithOpEvalRangeExpr),
    Compare(CompareExpr),
}

impl Expr {
    /// Create a NOT expression
    pub fn not(child: Expr) -> Self {
        Expr::LogicalUnary(LogicalUnaryExpr {
            op: LogicalUnaryOp::Not,
            child: Box::new(child),
        })
    }

    /// Create a logical binary expression
    pub fn logical(op: LogicalBinaryOp, left: Expr, right: Expr) -> Self {
        Expr::LogicalBinary(LogicalBinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Create an AND expression
    pub fn and(left: Expr, right: Expr) -> Self {
        Self::logical(LogicalBinaryOp::And, left, right)
    }

    /// Create an OR expression
    pub fn or(left: Expr, right: Expr) -> Self {
        Self::logical(LogicalBinaryOp::Or, left, right)
    }

    /// Create a membership test
    pub fn term<V: Into<GenericValue>>(
        field_id: FieldId,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Expr::Term(TermExpr {
            field_id,
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Create a single-sided range
    pub fn unary_range(field_id: FieldId, op: OpType, value: impl Into<GenericValue>) -> Self {
        Expr::UnaryRange(UnaryRangeExpr {
            field_id,
            op,
            value: value.into(),
        })
    }

    /// Create a two-sided range
    pub fn binary_range(
        field_id: FieldId,
        lower: impl Into<GenericValue>,
        lower_inclusive: bool,
        upper: impl Into<GenericValue>,
        upper_inclusive: bool,
    ) -> Self {
        Expr::BinaryRange(BinaryRangeExpr {
            field_id,
            lower: lower.into(),
            lower_inclusive,
            upper: upper.into(),
            upper_inclusive,
        })
    }

    /// Create a range over an arithmetic transform of a field
    pub fn arith_range(
        field_id: FieldId,
        arith_op: ArithOpType,
        right_operand: impl Into<GenericValue>,
        op: OpType,
        value: impl Into<GenericValue>,
    ) -> Self {
        Expr::BinaryArithOpEvalRange(BinaryArithOpEvalRangeExpr {
            field_id,
            arith_op,
            right_operand: right_operand.into(),
            op,
            value: value.into(),
        })
    }

    /// Create a field-to-field comparison
    pub fn compare(left_field_id: FieldId, op: OpType, right_field_id: FieldId) -> Self {
        Expr::Compare(CompareExpr {
            left_field_id,
            right_field_id,
            op,
        })
    }

    /// Whether this node has no child expressions
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Expr::LogicalUnary(_) | Expr::LogicalBinary(_))
    }

    /// Whether some root-to-leaf path has more than `limit` nodes. Recursion
    /// never goes below `limit` levels, so this is safe on any tree.
    pub fn exceeds_depth(&self, limit: usize) -> bool {
        if limit == 0 {
            return true;
        }
        match self {
            Expr::LogicalUnary(expr) => expr.child.exceeds_depth(limit - 1),
            Expr::LogicalBinary(expr) => {
                expr.left.exceeds_depth(limit - 1) || expr.right.exceeds_depth(limit - 1)
            }
            _ => false,
        }
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            Expr::LogicalUnary(expr) => 1 + expr.child.depth(),
            Expr::LogicalBinary(expr) => 1 + expr.left.depth().max(expr.right.depth()),
            _ => 1,
        }
    }
}
