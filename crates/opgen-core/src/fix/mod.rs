//! Code fixes for the compound-assignment analyzer
//!
//! [`CompoundAssignmentFix`] turns a single [`CompoundCandidate`] into its
//! rewritten expression; [`fix_all`] applies every fix in a statement list.

mod fix_all;

pub use fix_all::{fix_all, FixAllOutcome};

use crate::analyzer::operators::compound_assignment_operator;
use crate::analyzer::{AssignmentContext, CompoundCandidate, IfNullCandidate, Verdict};
use crate::syntax::{factory, AssignmentOp, Expr, PostfixOp, PrefixOp, Stmt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixAllError {
    #[error("fix-all was cancelled")]
    Cancelled,
}

/// Cooperative cancellation shared between a host and a running fix-all
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), FixAllError> {
        if self.is_cancelled() {
            Err(FixAllError::Cancelled)
        } else {
            Ok(())
        }
    }
}

pub struct CompoundAssignmentFix;

impl CompoundAssignmentFix {
    /// Rewritten form of `original`, keeping its span. A candidate without an
    /// opportunity leaves the expression unchanged.
    pub fn rewrite(
        original: &Expr,
        candidate: &CompoundCandidate<'_>,
        context: &AssignmentContext<'_>,
    ) -> Expr {
        let target = candidate.target.clone();
        let operand = candidate.operand.clone();

        let mut rewritten = match candidate.verdict {
            Verdict::NoOpportunity => return original.clone(),
            Verdict::CompoundOperator(op) => match compound_assignment_operator(op) {
                Some(compound) => factory::assignment(target, compound, operand),
                None => return original.clone(),
            },
            Verdict::Increment if context.prefers_postfix() => {
                factory::postfix(PostfixOp::Increment, target)
            }
            Verdict::Increment => factory::prefix(PrefixOp::Increment, target),
            Verdict::Decrement if context.prefers_postfix() => {
                factory::postfix(PostfixOp::Decrement, target)
            }
            Verdict::Decrement => factory::prefix(PrefixOp::Decrement, target),
            Verdict::CoalesceAssign { .. } => {
                let assignment = factory::assignment(target, AssignmentOp::CoalesceAssign, operand);
                match &candidate.cast_type {
                    Some(ty) => factory::cast(ty.to_syntax(), factory::parenthesized(assignment)),
                    None => assignment,
                }
            }
        };

        rewritten.span = original.span;
        rewritten
    }

    /// `x ??= y;` replacing the whole `if` statement
    pub fn rewrite_if_null(candidate: &IfNullCandidate<'_>) -> Stmt {
        let assignment = factory::assignment(
            candidate.target.clone(),
            AssignmentOp::CoalesceAssign,
            candidate.value.clone(),
        );
        let mut statement = factory::expression_statement(assignment);
        statement.span = candidate.statement.span;
        statement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerOptions, CompoundAssignmentAnalyzer};
    use crate::semantic::DeclarationModel;
    use crate::span::Span;
    use crate::symbols::TypeRef;
    use crate::syntax::factory::*;
    use crate::syntax::{BinaryOp, Expr, ExprKind};

    fn model() -> DeclarationModel {
        let mut model = DeclarationModel::new();
        model.add_local("a", TypeRef::int());
        model.add_local("n", TypeRef::nullable(TypeRef::int()));
        model.add_local("o", TypeRef::class("Widget"));
        model
    }

    fn fix(model: &DeclarationModel, expr: &Expr, context: AssignmentContext<'_>) -> String {
        let analyzer = CompoundAssignmentAnalyzer::new(model, AnalyzerOptions::default());
        let candidate = analyzer.candidate(expr, &context).unwrap();
        CompoundAssignmentFix::rewrite(expr, &candidate, &context).to_string()
    }

    fn self_assign(name: &str, op: BinaryOp, operand: Expr) -> Expr {
        simple_assignment(identifier(name), binary(op, identifier(name), operand))
    }

    #[test]
    fn test_compound_operator() {
        let model = model();
        let expr = self_assign("a", BinaryOp::Add, integer(10));
        assert_eq!(
            fix(&model, &expr, AssignmentContext::ExpressionStatement),
            "a += 10"
        );
        let expr = self_assign("a", BinaryOp::ShiftLeft, integer(2));
        assert_eq!(fix(&model, &expr, AssignmentContext::Other), "a <<= 2");
    }

    #[test]
    fn test_increment_spelling_follows_context() {
        let model = model();
        let inc = self_assign("a", BinaryOp::Add, integer(1));
        let dec = self_assign("a", BinaryOp::Subtract, integer(1));
        assert_eq!(fix(&model, &inc, AssignmentContext::ExpressionStatement), "a++");
        assert_eq!(fix(&model, &dec, AssignmentContext::ExpressionStatement), "a--");
        assert_eq!(fix(&model, &inc, AssignmentContext::Other), "++a");
        assert_eq!(fix(&model, &dec, AssignmentContext::ForIncrementor), "--a");
    }

    #[test]
    fn test_coalesce_with_and_without_cast() {
        let model = model();
        let expr = binary(
            BinaryOp::Coalesce,
            identifier("o"),
            parenthesized(simple_assignment(identifier("o"), identifier("o"))),
        );
        assert_eq!(fix(&model, &expr, AssignmentContext::Other), "o ??= o");

        let expr = binary(
            BinaryOp::Coalesce,
            identifier("n"),
            parenthesized(simple_assignment(identifier("n"), integer(1))),
        );
        assert_eq!(fix(&model, &expr, AssignmentContext::Other), "(int?)(n ??= 1)");
        assert_eq!(
            fix(&model, &expr, AssignmentContext::ExpressionStatement),
            "n ??= 1"
        );
    }

    #[test]
    fn test_rewrite_keeps_span() {
        let model = model();
        let span = Span::new(4, 14, 1, 5);
        let expr = Expr::new(
            ExprKind::Assignment(
                Box::new(identifier("a")),
                AssignmentOp::Assign,
                Box::new(binary(BinaryOp::Multiply, identifier("a"), integer(3))),
            ),
            span,
        );
        let context = AssignmentContext::ExpressionStatement;
        let analyzer = CompoundAssignmentAnalyzer::new(&model, AnalyzerOptions::default());
        let candidate = analyzer.candidate(&expr, &context).unwrap();
        let rewritten = CompoundAssignmentFix::rewrite(&expr, &candidate, &context);
        assert_eq!(rewritten.span, span);
        assert_eq!(rewritten.to_string(), "a *= 3");
    }

    #[test]
    fn test_rewrite_if_null() {
        let model = model();
        let stmt = if_statement(
            binary(BinaryOp::Equal, identifier("o"), null_literal()),
            expression_statement(simple_assignment(identifier("o"), identifier("o"))),
            None,
        );
        let analyzer = CompoundAssignmentAnalyzer::new(&model, AnalyzerOptions::default());
        let candidate = analyzer.if_null_candidate(&stmt).unwrap();
        assert_eq!(
            CompoundAssignmentFix::rewrite_if_null(&candidate).to_string(),
            "o ??= o;"
        );
    }

    #[test]
    fn test_cancellation_token_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.check(), Err(FixAllError::Cancelled));
    }
}
