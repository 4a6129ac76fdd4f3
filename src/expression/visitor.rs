//! Double dispatch from an [`Expr`] to a per-variant handler.
//!
//! `Expr::accept` invokes exactly one handler for the node's variant and does
//! not recurse on its own. Handlers for logical nodes call `accept` on their
//! children when they want to descend.

use crate::expression::expr::{
    BinaryArithOpEvalRangeExpr, BinaryRangeExpr, CompareExpr, Expr, LogicalBinaryExpr,
    LogicalUnaryExpr, TermExpr, UnaryRangeExpr,
};

pub trait ExprVisitor {
    type Output;

    fn visit_logical_unary(&mut self, expr: &LogicalUnaryExpr) -> Self::Output;

    fn visit_logical_binary(&mut self, expr: &LogicalBinaryExpr) -> Self::Output;

    fn visit_term(&mut self, expr: &TermExpr) -> Self::Output;

    fn visit_unary_range(&mut self, expr: &UnaryRangeExpr) -> Self::Output;

    fn visit_binary_range(&mut self, expr: &BinaryRangeExpr) -> Self::Output;

    fn visit_binary_arith_op_eval_range(
        &mut self,
        expr: &BinaryArithOpEvalRangeExpr,
    ) -> Self::Output;

    fn visit_compare(&mut self, expr: &CompareExpr) -> Self::Output;
}

impl Expr {
    /// Route this node to the matching handler of `visitor`
    pub fn accept<V: ExprVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::LogicalUnary(expr) => visitor.visit_logical_unary(expr),
            Expr::LogicalBinary(expr) => visitor.visit_logical_binary(expr),
            Expr::Term(expr) => visitor.visit_term(expr),
            Expr::UnaryRange(expr) => visitor.visit_unary_range(expr),
            Expr::BinaryRange(expr) => visitor.visit_binary_range(expr),
            Expr::BinaryArithOpEvalRange(expr) => visitor.visit_binary_arith_op_eval_range(expr),
            Expr::Compare(expr) => visitor.visit_compare(expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::operator::{ArithOpType, OpType};
    use crate::schema::FieldId;

    /// Records which handler ran, without descending
    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl ExprVisitor for Recorder {
        type Output = ();

        fn visit_logical_unary(&mut self, _: &LogicalUnaryExpr) {
            self.calls.push("logical_unary");
        }

        fn visit_logical_binary(&mut self, _: &LogicalBinaryExpr) {
            self.calls.push("logical_binary");
        }

        fn visit_term(&mut self, _: &TermExpr) {
            self.calls.push("term");
        }

        fn visit_unary_range(&mut self, _: &UnaryRangeExpr) {
            self.calls.push("unary_range");
        }

        fn visit_binary_range(&mut self, _: &BinaryRangeExpr) {
            self.calls.push("binary_range");
        }

        fn visit_binary_arith_op_eval_range(&mut self, _: &BinaryArithOpEvalRangeExpr) {
            self.calls.push("binary_arith_op_eval_range");
        }

        fn visit_compare(&mut self, _: &CompareExpr) {
            self.calls.push("compare");
        }
    }

    #[test]
    fn test_accept_invokes_one_handler() {
        let cases = vec![
            (Expr::not(Expr::term(FieldId(1), [1i64])), "logical_unary"),
            (
                Expr::and(Expr::term(FieldId(1), [1i64]), Expr::term(FieldId(2), [2i64])),
                "logical_binary",
            ),
            (Expr::term(FieldId(1), [1i64]), "term"),
            (
                Expr::unary_range(FieldId(1), OpType::LessThan, 3i64),
                "unary_range",
            ),
            (
                Expr::binary_range(FieldId(1), 1i64, true, 3i64, true),
                "binary_range",
            ),
            (
                Expr::arith_range(FieldId(1), ArithOpType::Add, 1i64, OpType::Equal, 3i64),
                "binary_arith_op_eval_range",
            ),
            (
                Expr::compare(FieldId(1), OpType::LessThan, FieldId(2)),
                "compare",
            ),
        ];

        for (expr, expected) in cases {
            let mut recorder = Recorder::default();
            expr.accept(&mut recorder);
            // composite handlers here do not recurse, so the children stay unvisited
            assert_eq!(recorder.calls, vec![expected]);
        }
    }
}
