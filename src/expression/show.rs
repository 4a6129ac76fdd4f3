//! Human-readable rendering of predicate trees, used in logs and tool output.

use crate::expression::expr::{
    BinaryArithOpEvalRangeExpr, BinaryRangeExpr, CompareExpr, Expr, LogicalBinaryExpr,
    LogicalUnaryExpr, TermExpr, UnaryRangeExpr,
};
use crate::expression::visitor::ExprVisitor;
use crate::schema::FieldId;
use std::fmt;

pub struct ShowExprVisitor;

fn field(field_id: FieldId) -> String {
    format!("${}", field_id)
}

impl ExprVisitor for ShowExprVisitor {
    type Output = String;

    fn visit_logical_unary(&mut self, expr: &LogicalUnaryExpr) -> String {
        format!("{} ({})", expr.op.as_str(), expr.child.accept(self))
    }

    fn visit_logical_binary(&mut self, expr: &LogicalBinaryExpr) -> String {
        format!(
            "({} {} {})",
            expr.left.accept(self),
            expr.op.as_str(),
            expr.right.accept(self)
        )
    }

    fn visit_term(&mut self, expr: &TermExpr) -> String {
        let values: Vec<String> = expr.values.iter().map(|v| v.to_string()).collect();
        format!("{} IN [{}]", field(expr.field_id), values.join(", "))
    }

    fn visit_unary_range(&mut self, expr: &UnaryRangeExpr) -> String {
        format!("{} {} {}", field(expr.field_id), expr.op.as_str(), expr.value)
    }

    fn visit_binary_range(&mut self, expr: &BinaryRangeExpr) -> String {
        let lower_op = if expr.lower_inclusive { "<=" } else { "<" };
        let upper_op = if expr.upper_inclusive { "<=" } else { "<" };
        format!(
            "{} {} {} {} {}",
            expr.lower,
            lower_op,
            field(expr.field_id),
            upper_op,
            expr.upper
        )
    }

    fn visit_binary_arith_op_eval_range(&mut self, expr: &BinaryArithOpEvalRangeExpr) -> String {
        format!(
            "{} {} {} {} {}",
            field(expr.field_id),
            expr.arith_op.as_str(),
            expr.right_operand,
            expr.op.as_str(),
            expr.value
        )
    }

    fn visit_compare(&mut self, expr: &CompareExpr) -> String {
        format!(
            "{} {} {}",
            field(expr.left_field_id),
            expr.op.as_str(),
            field(expr.right_field_id)
        )
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.accept(&mut ShowExprVisitor))
    }
}
