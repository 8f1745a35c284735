//! `x = x OP y` -> `x OP= y`, `x++`, `x--`

use super::operators::is_available;
use super::{AssignmentContext, CompoundAssignmentAnalyzer, CompoundCandidate, RewriteRule, Verdict};
use crate::semantic::are_equivalent;
use crate::symbols::TypeRef;
use crate::syntax::{factory, walk_down_parentheses, AssignmentOp, BinaryOp, Expr, ExprKind, Literal, PrefixOp};
use tracing::{debug, trace};

impl CompoundAssignmentAnalyzer<'_> {
    pub(super) fn analyze_assignment<'e>(
        &self,
        expr: &'e Expr,
        context: &AssignmentContext<'_>,
    ) -> Option<CompoundCandidate<'e>> {
        let ExprKind::Assignment(target, AssignmentOp::Assign, value) = &expr.kind else {
            return None;
        };
        let value = walk_down_parentheses(value);
        let ExprKind::Binary(op, left, right) = &value.kind else {
            return None;
        };
        let op = *op;

        if !is_available(op, &self.options) {
            trace!(operator = op.token(), "no compound form available");
            return None;
        }
        if !are_equivalent(self.model, target, left) {
            return None;
        }
        if !self.is_valid_target(target) {
            debug!(%expr, "rejected compound assignment target");
            return None;
        }
        // Unbound or ill-typed operands never qualify
        self.model.type_of(value)?;

        if op == BinaryOp::Coalesce {
            // `x = x ?? (x = y)` stores `y` once
            let operand = self.repeated_assignment_value(target, right).unwrap_or(&**right);
            let original = self.model.type_of(expr)?;
            let rewritten =
                factory::assignment((**target).clone(), AssignmentOp::CoalesceAssign, operand.clone());
            let cast_type = self.coalesce_cast(&original, &rewritten, context);
            return Some(CompoundCandidate {
                target,
                operator: op,
                operand,
                verdict: Verdict::CoalesceAssign {
                    needs_cast: cast_type.is_some(),
                },
                rule: RewriteRule::CompoundAssignment,
                cast_type,
            });
        }

        let verdict = self
            .increment_verdict(op, target, right)
            .unwrap_or(Verdict::CompoundOperator(op));

        Some(CompoundCandidate {
            target,
            operator: op,
            operand: right,
            verdict,
            rule: RewriteRule::CompoundAssignment,
            cast_type: None,
        })
    }

    /// `y` when `expr` is the parenthesized `(x = y)` for the same `x`
    fn repeated_assignment_value<'e>(&self, target: &Expr, expr: &'e Expr) -> Option<&'e Expr> {
        let ExprKind::Parenthesized(inner) = &expr.kind else {
            return None;
        };
        match &walk_down_parentheses(inner).kind {
            ExprKind::Assignment(inner_target, AssignmentOp::Assign, value)
                if are_equivalent(self.model, target, inner_target) =>
            {
                Some(&**value)
            }
            _ => None,
        }
    }

    /// `x + 1`, `x - 1`, `x + (-1)`, `x - (-1)` on a type with `++`/`--`
    fn increment_verdict(&self, op: BinaryOp, target: &Expr, operand: &Expr) -> Option<Verdict> {
        if !matches!(op, BinaryOp::Add | BinaryOp::Subtract) {
            return None;
        }
        let target_type = self.model.type_of(target)?;
        if !target_type.supports_increment() {
            return None;
        }

        let negated = self.unit_literal(operand, &target_type)?;
        let is_increment = (op == BinaryOp::Add) != negated;
        Some(if is_increment {
            Verdict::Increment
        } else {
            Verdict::Decrement
        })
    }

    /// `Some(negated)` when `expr` is the literal one, possibly negated and
    /// cast to the target's own type
    fn unit_literal(&self, expr: &Expr, target_type: &TypeRef) -> Option<bool> {
        let expr = walk_down_parentheses(expr);
        match &expr.kind {
            ExprKind::Literal(Literal::Integer(1)) => Some(false),
            ExprKind::Literal(Literal::Float(value)) if *value == 1.0 => Some(false),
            ExprKind::Prefix(PrefixOp::Negate, operand) => {
                self.unit_literal(operand, target_type).map(|negated| !negated)
            }
            ExprKind::Cast(_, operand) => {
                let cast_type = self.model.type_of(expr)?;
                if cast_type == *target_type || cast_type == *target_type.underlying() {
                    self.unit_literal(operand, target_type)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
