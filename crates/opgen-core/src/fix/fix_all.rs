use super::{CancellationToken, CompoundAssignmentFix, FixAllError};
use crate::analyzer::{AnalyzerOptions, AssignmentContext, CompoundAssignmentAnalyzer, RewriteRule};
use crate::config::OpgenConfig;
use crate::diagnostics::{Diagnostic, DiagnosticHandler};
use crate::semantic::SemanticModel;
use crate::span::Span;
use crate::syntax::{
    Argument, AssignmentOp, Block, Expr, ExprKind, ForStatement, IfStatement, IsPattern, ObjectCreation, Stmt,
    StmtKind, SwitchSection, SwitchStatement, WhileStatement,
};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Rewritten statements and the number of fixes applied per diagnostic code
#[derive(Debug, Clone, PartialEq)]
pub struct FixAllOutcome {
    pub statements: Vec<Stmt>,
    pub fixes: FxHashMap<&'static str, usize>,
}

impl FixAllOutcome {
    pub fn fix_count(&self) -> usize {
        self.fixes.values().sum()
    }
}

/// Apply every compound-assignment fix in `statements`
///
/// A node is analyzed before its children so `a = a ?? (a = 1)` is matched
/// as a whole; the operands of the rewritten node are then fixed in turn,
/// so `a = a + (b = b + 1)` becomes `a += (++b)`. Each rewrite is reported to `handler` at the
/// severity configured for its rule. `cancellation` is checked before each
/// analyzer call; a cancelled run returns no partial result.
pub fn fix_all(
    statements: &[Stmt],
    model: &dyn SemanticModel,
    config: &OpgenConfig,
    handler: &dyn DiagnosticHandler,
    cancellation: &CancellationToken,
) -> Result<FixAllOutcome, FixAllError> {
    let mut rewriter = FixAllRewriter {
        analyzer: CompoundAssignmentAnalyzer::new(model, AnalyzerOptions::from(config)),
        config,
        handler,
        cancellation,
        fixes: FxHashMap::default(),
    };

    let statements = statements
        .iter()
        .map(|stmt| rewriter.statement(stmt))
        .collect::<Result<Vec<_>, _>>()?;

    let outcome = FixAllOutcome {
        statements,
        fixes: rewriter.fixes,
    };
    info!("Applied {} compound assignment fix(es)", outcome.fix_count());
    Ok(outcome)
}

struct FixAllRewriter<'a> {
    analyzer: CompoundAssignmentAnalyzer<'a>,
    config: &'a OpgenConfig,
    handler: &'a dyn DiagnosticHandler,
    cancellation: &'a CancellationToken,
    fixes: FxHashMap<&'static str, usize>,
}

impl FixAllRewriter<'_> {
    fn record(&mut self, rule: RewriteRule, span: Span) {
        *self.fixes.entry(rule.code()).or_insert(0) += 1;

        let severity = match rule {
            RewriteRule::CompoundAssignment => self.config.prefer_compound_assignment.severity,
            RewriteRule::CoalesceAssignment => self.config.prefer_coalesce_assignment.severity,
        };
        if let Some(level) = severity.level() {
            self.handler
                .report(Diagnostic::new(level, rule.code(), span, rule.message()));
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn statement(&mut self, stmt: &Stmt) -> Result<Stmt, FixAllError> {
        use AssignmentContext::{ExpressionStatement, ForIncrementor, Other, Return};

        let kind = match &stmt.kind {
            StmtKind::Expression(expr) => {
                StmtKind::Expression(self.expression(expr, ExpressionStatement)?)
            }
            StmtKind::Block(block) => StmtKind::Block(self.block(block)?),
            StmtKind::If(if_statement) => StmtKind::If(IfStatement {
                condition: self.expression(&if_statement.condition, Other)?,
                then_branch: Box::new(self.statement(&if_statement.then_branch)?),
                else_branch: match &if_statement.else_branch {
                    Some(branch) => Some(Box::new(self.statement(branch)?)),
                    None => None,
                },
            }),
            StmtKind::Return(value) => StmtKind::Return(self.optional(value.as_ref(), Return)?),
            StmtKind::YieldReturn(value) => StmtKind::YieldReturn(self.expression(value, Other)?),
            StmtKind::Throw(value) => StmtKind::Throw(self.optional(value.as_ref(), Other)?),
            StmtKind::Labeled(label, inner) => {
                StmtKind::Labeled(label.clone(), Box::new(self.statement(inner)?))
            }
            StmtKind::For(for_statement) => StmtKind::For(ForStatement {
                // Initializer values are discarded like incrementor values
                initializers: self.expressions(&for_statement.initializers, ForIncrementor)?,
                condition: self.optional(for_statement.condition.as_ref(), Other)?,
                incrementors: self.expressions(&for_statement.incrementors, ForIncrementor)?,
                body: Box::new(self.statement(&for_statement.body)?),
            }),
            StmtKind::While(while_statement) => StmtKind::While(WhileStatement {
                condition: self.expression(&while_statement.condition, Other)?,
                body: Box::new(self.statement(&while_statement.body)?),
            }),
            StmtKind::Switch(switch) => StmtKind::Switch(self.switch(switch)?),
            StmtKind::YieldBreak | StmtKind::Empty => stmt.kind.clone(),
        };
        let rebuilt = Stmt::new(kind, stmt.span);

        if !matches!(rebuilt.kind, StmtKind::If(_)) {
            return Ok(rebuilt);
        }
        self.cancellation.check()?;
        match self.analyzer.if_null_candidate(&rebuilt) {
            Some(candidate) => {
                let rewritten = CompoundAssignmentFix::rewrite_if_null(&candidate);
                debug!(span = %rebuilt.span, "rewrote if-null assignment");
                self.record(RewriteRule::CoalesceAssignment, rebuilt.span);
                Ok(rewritten)
            }
            None => Ok(rebuilt),
        }
    }

    fn block(&mut self, block: &Block) -> Result<Block, FixAllError> {
        Ok(Block {
            statements: self.statements(&block.statements)?,
        })
    }

    fn statements(&mut self, statements: &[Stmt]) -> Result<Vec<Stmt>, FixAllError> {
        statements.iter().map(|stmt| self.statement(stmt)).collect()
    }

    fn switch(&mut self, switch: &SwitchStatement) -> Result<SwitchStatement, FixAllError> {
        let governing = self.expression(&switch.governing, AssignmentContext::Other)?;
        let sections = switch
            .sections
            .iter()
            .map(|section| {
                Ok::<_, FixAllError>(SwitchSection {
                    labels: self.expressions(&section.labels, AssignmentContext::Other)?,
                    statements: self.statements(&section.statements)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SwitchStatement {
            governing,
            sections,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn expression(
        &mut self,
        expr: &Expr,
        context: AssignmentContext<'_>,
    ) -> Result<Expr, FixAllError> {
        self.cancellation.check()?;
        let Some(candidate) = self.analyzer.candidate(expr, &context) else {
            return self.children(expr, context);
        };
        let rewritten = CompoundAssignmentFix::rewrite(expr, &candidate, &context);
        debug!(original = %expr, %rewritten, "rewrote assignment");
        self.record(candidate.rule, expr.span);
        self.children(&rewritten, context)
    }

    fn optional(
        &mut self,
        expr: Option<&Expr>,
        context: AssignmentContext<'_>,
    ) -> Result<Option<Expr>, FixAllError> {
        expr.map(|e| self.expression(e, context)).transpose()
    }

    fn expressions(
        &mut self,
        exprs: &[Expr],
        context: AssignmentContext<'_>,
    ) -> Result<Vec<Expr>, FixAllError> {
        exprs.iter().map(|e| self.expression(e, context)).collect()
    }

    fn operand(&mut self, expr: &Expr) -> Result<Box<Expr>, FixAllError> {
        self.expression(expr, AssignmentContext::Other).map(Box::new)
    }

    /// `arguments` of `invocation`, or of a callee the model cannot resolve
    /// overloads for when `invocation` is `None`
    fn arguments(
        &mut self,
        arguments: &[Argument],
        invocation: Option<&Expr>,
    ) -> Result<Vec<Argument>, FixAllError> {
        arguments
            .iter()
            .enumerate()
            .map(|(index, argument)| {
                let context = match invocation {
                    Some(invocation) => AssignmentContext::Argument { invocation, index },
                    None => AssignmentContext::Other,
                };
                Ok::<_, FixAllError>(Argument {
                    name: argument.name.clone(),
                    ref_kind: argument.ref_kind,
                    value: self.expression(&argument.value, context)?,
                })
            })
            .collect()
    }

    /// `expr` with every child expression rewritten
    fn children(&mut self, expr: &Expr, context: AssignmentContext<'_>) -> Result<Expr, FixAllError> {
        let kind = match &expr.kind {
            ExprKind::Literal(_) | ExprKind::Identifier(_) | ExprKind::This => expr.kind.clone(),
            ExprKind::MemberAccess(receiver, name) => {
                ExprKind::MemberAccess(self.operand(receiver)?, name.clone())
            }
            ExprKind::ElementAccess(receiver, arguments) => {
                ExprKind::ElementAccess(self.operand(receiver)?, self.arguments(arguments, None)?)
            }
            ExprKind::Invocation(callee, arguments) => {
                ExprKind::Invocation(self.operand(callee)?, self.arguments(arguments, Some(expr))?)
            }
            // Parentheses do not change where the value flows
            ExprKind::Parenthesized(inner) => {
                ExprKind::Parenthesized(Box::new(self.expression(inner, context)?))
            }
            ExprKind::Conditional(condition, when_true, when_false) => ExprKind::Conditional(
                self.operand(condition)?,
                self.operand(when_true)?,
                self.operand(when_false)?,
            ),
            ExprKind::Binary(op, left, right) => {
                ExprKind::Binary(*op, self.operand(left)?, self.operand(right)?)
            }
            ExprKind::Prefix(op, operand) => ExprKind::Prefix(*op, self.operand(operand)?),
            ExprKind::Postfix(op, operand) => ExprKind::Postfix(*op, self.operand(operand)?),
            ExprKind::Assignment(target, op, value) => {
                let value_context = match op {
                    AssignmentOp::Assign => AssignmentContext::AssignedTo(&**target),
                    _ => AssignmentContext::Other,
                };
                ExprKind::Assignment(
                    self.operand(target)?,
                    *op,
                    Box::new(self.expression(value, value_context)?),
                )
            }
            ExprKind::Cast(ty, operand) => ExprKind::Cast(ty.clone(), self.operand(operand)?),
            ExprKind::Is(operand, pattern) => {
                let pattern = match pattern {
                    IsPattern::Constant(constant) => IsPattern::Constant(self.operand(constant)?),
                    IsPattern::Type(ty) => IsPattern::Type(ty.clone()),
                };
                ExprKind::Is(self.operand(operand)?, pattern)
            }
            ExprKind::Throw(exception) => ExprKind::Throw(self.operand(exception)?),
            ExprKind::ObjectCreation(creation) => ExprKind::ObjectCreation(ObjectCreation {
                ty: creation.ty.clone(),
                // Constructor overloads are not modeled
                arguments: self.arguments(&creation.arguments, None)?,
                initializer: match &creation.initializer {
                    Some(initializer) => {
                        Some(self.expressions(initializer, AssignmentContext::Other)?)
                    }
                    None => None,
                },
            }),
        };
        Ok(Expr::new(kind, expr.span))
    }
}
