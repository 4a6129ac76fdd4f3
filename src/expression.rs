//! Predicate expression trees and the passes that analyze them.
//!
//! This module provides:
//! - The expression tree (`Expr` and one node type per predicate form)
//! - Double dispatch over the closed node set (`ExprVisitor`)
//! - Plan-info extraction (`ExtractInfoVisitor`)
//! - Schema validation and display passes

pub mod expr;
pub mod extract_info;
pub mod operator;
pub mod show;
pub mod verify;
pub mod visitor;

pub use expr::{
    BinaryArithOpEvalRangeExpr, BinaryRangeExpr, CompareExpr, Expr, LogicalBinaryExpr,
    LogicalUnaryExpr, TermExpr, UnaryRangeExpr,
};
pub use extract_info::{extract_plan_info, ExtractInfoVisitor};
pub use operator::{ArithOpType, LogicalBinaryOp, LogicalUnaryOp, OpType};
pub use show::ShowExprVisitor;
pub use verify::{verify_expression, VerifyExprVisitor};
pub use visitor::ExprVisitor;
