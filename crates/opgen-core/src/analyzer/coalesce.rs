//! `x ?? (x = y)` and `if (x == null) x = y;` -> `x ??= y`

use super::{AssignmentContext, CompoundAssignmentAnalyzer, CompoundCandidate, RewriteRule, Verdict};
use crate::semantic::are_equivalent;
use crate::syntax::{
    factory, walk_down_parentheses, AssignmentOp, BinaryOp, Expr, ExprKind, IsPattern, Literal,
    Stmt, StmtKind,
};
use tracing::debug;

/// `if (x == null) x = y;` that can become `x ??= y;`
#[derive(Debug, Clone, PartialEq)]
pub struct IfNullCandidate<'s> {
    pub target: &'s Expr,
    pub value: &'s Expr,
    /// The whole `if` statement being replaced
    pub statement: &'s Stmt,
}

impl CompoundAssignmentAnalyzer<'_> {
    pub(super) fn analyze_coalesce<'e>(
        &self,
        expr: &'e Expr,
        context: &AssignmentContext<'_>,
    ) -> Option<CompoundCandidate<'e>> {
        if !self.options.coalesce_assignment_available() {
            return None;
        }
        let ExprKind::Binary(BinaryOp::Coalesce, left, right) = &expr.kind else {
            return None;
        };
        // The assignment must be the parenthesized right operand itself
        let ExprKind::Parenthesized(inner) = &right.kind else {
            return None;
        };
        let ExprKind::Assignment(target, AssignmentOp::Assign, value) =
            &walk_down_parentheses(inner).kind
        else {
            return None;
        };

        if !are_equivalent(self.model, left, target) {
            return None;
        }
        if !self.is_valid_target(left) || !self.is_valid_target(target) {
            debug!(%expr, "rejected coalesce target");
            return None;
        }

        let original = self.model.type_of(expr)?;
        let rewritten =
            factory::assignment((**left).clone(), AssignmentOp::CoalesceAssign, (**value).clone());
        let cast_type = self.coalesce_cast(&original, &rewritten, context);

        Some(CompoundCandidate {
            target: left,
            operator: BinaryOp::Coalesce,
            operand: value,
            verdict: Verdict::CoalesceAssign {
                needs_cast: cast_type.is_some(),
            },
            rule: RewriteRule::CoalesceAssignment,
            cast_type,
        })
    }

    pub(super) fn analyze_if_null_statement<'s>(&self, stmt: &'s Stmt) -> Option<IfNullCandidate<'s>> {
        if !self.options.coalesce_assignment_available() {
            return None;
        }
        let StmtKind::If(if_statement) = &stmt.kind else {
            return None;
        };
        if if_statement.else_branch.is_some() {
            return None;
        }

        let tested = null_tested_expression(&if_statement.condition)?;
        let assignment = single_expression_statement(&if_statement.then_branch)?;
        let ExprKind::Assignment(target, AssignmentOp::Assign, value) = &assignment.kind else {
            return None;
        };

        if !are_equivalent(self.model, tested, target) {
            return None;
        }
        if !self.is_valid_target(tested) || !self.is_valid_target(target) {
            debug!(%target, "rejected if-null target");
            return None;
        }
        // `x == null` on a non-nullable value type is always false
        if !self.model.type_of(target)?.admits_null() {
            return None;
        }

        Some(IfNullCandidate {
            target,
            value,
            statement: stmt,
        })
    }
}

/// `x` from `x == null`, `null == x` or `x is null`
fn null_tested_expression(condition: &Expr) -> Option<&Expr> {
    let is_null = |e: &Expr| matches!(walk_down_parentheses(e).kind, ExprKind::Literal(Literal::Null));
    match &walk_down_parentheses(condition).kind {
        ExprKind::Binary(BinaryOp::Equal, left, right) if is_null(right) => Some(&**left),
        ExprKind::Binary(BinaryOp::Equal, left, right) if is_null(left) => Some(&**right),
        ExprKind::Is(operand, IsPattern::Constant(constant)) if is_null(constant) => Some(&**operand),
        _ => None,
    }
}

/// The expression of `e;` or `{ e; }`
fn single_expression_statement(stmt: &Stmt) -> Option<&Expr> {
    match &stmt.kind {
        StmtKind::Expression(expr) => Some(expr),
        StmtKind::Block(block) => match block.statements.as_slice() {
            [only] => match &only.kind {
                StmtKind::Expression(expr) => Some(expr),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}
