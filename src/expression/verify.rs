//! Schema validation for predicate trees.
//!
//! Rejects trees the extractor must never see: references to undefined
//! fields, scalar predicates on vector fields, and leaves whose literals do
//! not agree with each other or with the field type. A configured depth
//! limit is enforced before descending, so an over-deep tree is rejected
//! without walking past the limit.

use crate::access::{GenericValue, ValueKind};
use crate::error::{PlanError, PlanResult};
use crate::expression::expr::{
    BinaryArithOpEvalRangeExpr, BinaryRangeExpr, CompareExpr, Expr, LogicalBinaryExpr,
    LogicalUnaryExpr, TermExpr, UnaryRangeExpr,
};
use crate::expression::operator::OpType;
use crate::expression::visitor::ExprVisitor;
use crate::plan::AnalyzerConfig;
use crate::schema::{FieldId, Schema};

pub struct VerifyExprVisitor<'a> {
    schema: &'a Schema,
    max_depth: Option<usize>,
    depth: usize,
}

impl<'a> VerifyExprVisitor<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            max_depth: None,
            depth: 0,
        }
    }

    pub fn with_config(schema: &'a Schema, config: &AnalyzerConfig) -> Self {
        Self {
            schema,
            max_depth: config.max_depth,
            depth: 0,
        }
    }

    pub fn verify(&mut self, expr: &Expr) -> PlanResult<()> {
        self.descend(expr)
    }

    fn descend(&mut self, child: &Expr) -> PlanResult<()> {
        self.depth += 1;
        if let Some(limit) = self.max_depth {
            if self.depth > limit {
                return Err(PlanError::ExpressionTooDeep { limit });
            }
        }
        let result = child.accept(self);
        self.depth -= 1;
        result
    }

    /// Resolve a scalar field and return the literal kind it accepts
    fn scalar_field(&self, field_id: FieldId) -> PlanResult<ValueKind> {
        let meta = self
            .schema
            .get(field_id)
            .ok_or(PlanError::UndefinedField(field_id))?;
        meta.data_type
            .value_kind()
            .ok_or(PlanError::VectorFieldInPredicate(field_id))
    }

    fn check_literal(
        &self,
        field_id: FieldId,
        expected: ValueKind,
        value: &GenericValue,
    ) -> PlanResult<()> {
        if value.kind() != expected {
            return Err(PlanError::invalid_tree(format!(
                "literal {} does not match field {} ({:?} expected)",
                value, field_id, expected
            )));
        }
        Ok(())
    }

    fn check_op(&self, field_id: FieldId, op: OpType, kind: ValueKind) -> PlanResult<()> {
        if op.is_string_match() && kind != ValueKind::String {
            return Err(PlanError::invalid_tree(format!(
                "{} requires a string field, field {} is {:?}",
                op.as_str(),
                field_id,
                kind
            )));
        }
        if op.is_ordering() && kind == ValueKind::Bool {
            return Err(PlanError::invalid_tree(format!(
                "{} cannot order boolean field {}",
                op.as_str(),
                field_id
            )));
        }
        Ok(())
    }
}

impl ExprVisitor for VerifyExprVisitor<'_> {
    type Output = PlanResult<()>;

    fn visit_logical_unary(&mut self, expr: &LogicalUnaryExpr) -> PlanResult<()> {
        self.descend(&expr.child)
    }

    fn visit_logical_binary(&mut self, expr: &LogicalBinaryExpr) -> PlanResult<()> {
        self.descend(&expr.left)?;
        self.descend(&expr.right)
    }

    fn visit_term(&mut self, expr: &TermExpr) -> PlanResult<()> {
        let kind = self.scalar_field(expr.field_id)?;
        for value in &expr.values {
            self.check_literal(expr.field_id, kind, value)?;
        }
        Ok(())
    }

    fn visit_unary_range(&mut self, expr: &UnaryRangeExpr) -> PlanResult<()> {
        let kind = self.scalar_field(expr.field_id)?;
        self.check_op(expr.field_id, expr.op, kind)?;
        self.check_literal(expr.field_id, kind, &expr.value)
    }

    fn visit_binary_range(&mut self, expr: &BinaryRangeExpr) -> PlanResult<()> {
        let kind = self.scalar_field(expr.field_id)?;
        if kind == ValueKind::Bool {
            return Err(PlanError::invalid_tree(format!(
                "range on boolean field {}",
                expr.field_id
            )));
        }
        self.check_literal(expr.field_id, kind, &expr.lower)?;
        self.check_literal(expr.field_id, kind, &expr.upper)
    }

    fn visit_binary_arith_op_eval_range(
        &mut self,
        expr: &BinaryArithOpEvalRangeExpr,
    ) -> PlanResult<()> {
        let kind = self.scalar_field(expr.field_id)?;
        if kind != ValueKind::Number {
            return Err(PlanError::invalid_tree(format!(
                "arithmetic on non-numeric field {}",
                expr.field_id
            )));
        }
        self.check_op(expr.field_id, expr.op, kind)?;
        self.check_literal(expr.field_id, kind, &expr.right_operand)?;
        self.check_literal(expr.field_id, kind, &expr.value)?;

        let is_zero = match expr.right_operand {
            GenericValue::Int64(v) => v == 0,
            GenericValue::Float64(v) => v == 0.0,
            _ => false,
        };
        if expr.arith_op.rejects_zero() && is_zero {
            return Err(PlanError::invalid_tree(format!(
                "{} by zero on field {}",
                expr.arith_op.as_str(),
                expr.field_id
            )));
        }
        Ok(())
    }

    fn visit_compare(&mut self, expr: &CompareExpr) -> PlanResult<()> {
        let left = self.scalar_field(expr.left_field_id)?;
        let right = self.scalar_field(expr.right_field_id)?;
        if left != right {
            return Err(PlanError::invalid_tree(format!(
                "cannot compare field {} ({:?}) with field {} ({:?})",
                expr.left_field_id, left, expr.right_field_id, right
            )));
        }
        self.check_op(expr.left_field_id, expr.op, left)
    }
}

/// Helper function to validate a predicate against a schema
pub fn verify_expression(expr: &Expr, schema: &Schema) -> PlanResult<()> {
    VerifyExprVisitor::new(schema).verify(expr)
}
