//! Plan-info extraction: one pass over a predicate tree that records which
//! fields it reads and whether an index can answer each of them.
//!
//! Classification rules:
//! - term, unary range and binary range leaves are index-eligible
//! - arithmetic ranges are scan-only, the transform has to run on raw values
//! - field-to-field compares are scan-only for both sides and set the
//!   cross-field flag
//! - negation and boolean combinators contribute nothing of their own
//!
//! A field touched by any scan-only form ends up scan-only.

use crate::error::{PlanError, PlanResult};
use crate::expression::expr::{
    BinaryArithOpEvalRangeExpr, BinaryRangeExpr, CompareExpr, Expr, LogicalBinaryExpr,
    LogicalUnaryExpr, TermExpr, UnaryRangeExpr,
};
use crate::expression::visitor::ExprVisitor;
use crate::plan::{AnalyzerConfig, Eligibility, ExtractedPlanInfo};
use crate::schema::FieldId;
use log::trace;

/// Fills an [`ExtractedPlanInfo`] from one predicate tree.
///
/// An instance is meant for a single traversal of a single tree.
pub struct ExtractInfoVisitor<'a> {
    plan_info: &'a mut ExtractedPlanInfo,
    max_depth: Option<usize>,
    depth: usize,
}

impl<'a> ExtractInfoVisitor<'a> {
    pub fn new(plan_info: &'a mut ExtractedPlanInfo) -> Self {
        Self {
            plan_info,
            max_depth: None,
            depth: 0,
        }
    }

    pub fn with_config(plan_info: &'a mut ExtractedPlanInfo, config: &AnalyzerConfig) -> Self {
        Self {
            plan_info,
            max_depth: config.max_depth,
            depth: 0,
        }
    }

    /// Descend into a child, enforcing the depth limit
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

    /// Entry point: visit the root of a tree
    pub fn extract(&mut self, root: &Expr) -> PlanResult<()> {
        self.descend(root)
    }

    fn leaf(&mut self, kind: &str, field_id: FieldId, eligibility: Eligibility) {
        trace!("{} on field {} -> {:?}", kind, field_id, eligibility);
        self.plan_info.add_involved_field(field_id, eligibility);
    }
}

impl ExprVisitor for ExtractInfoVisitor<'_> {
    type Output = PlanResult<()>;

    fn visit_logical_unary(&mut self, expr: &LogicalUnaryExpr) -> PlanResult<()> {
        self.descend(&expr.child)
    }

    fn visit_logical_binary(&mut self, expr: &LogicalBinaryExpr) -> PlanResult<()> {
        self.descend(&expr.left)?;
        self.descend(&expr.right)
    }

    fn visit_term(&mut self, expr: &TermExpr) -> PlanResult<()> {
        self.leaf("term", expr.field_id, Eligibility::Indexable);
        Ok(())
    }

    fn visit_unary_range(&mut self, expr: &UnaryRangeExpr) -> PlanResult<()> {
        self.leaf("unary range", expr.field_id, Eligibility::Indexable);
        Ok(())
    }

    fn visit_binary_range(&mut self, expr: &BinaryRangeExpr) -> PlanResult<()> {
        self.leaf("binary range", expr.field_id, Eligibility::Indexable);
        Ok(())
    }

    fn visit_binary_arith_op_eval_range(
        &mut self,
        expr: &BinaryArithOpEvalRangeExpr,
    ) -> PlanResult<()> {
        self.leaf("arith range", expr.field_id, Eligibility::ScanOnly);
        Ok(())
    }

    fn visit_compare(&mut self, expr: &CompareExpr) -> PlanResult<()> {
        self.leaf("compare", expr.left_field_id, Eligibility::ScanOnly);
        self.leaf("compare", expr.right_field_id, Eligibility::ScanOnly);
        self.plan_info.mark_cross_field_compare();
        Ok(())
    }
}

/// Analyze `expr` into a fresh [`ExtractedPlanInfo`]
pub fn extract_plan_info(expr: &Expr, config: &AnalyzerConfig) -> PlanResult<ExtractedPlanInfo> {
    let mut plan_info = ExtractedPlanInfo::new();
    ExtractInfoVisitor::with_config(&mut plan_info, config).extract(expr)?;
    Ok(plan_info)
}
