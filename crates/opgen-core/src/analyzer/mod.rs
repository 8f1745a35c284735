//! Compound-assignment rewrite analysis
//!
//! Decides whether `x = x OP y`, `x ?? (x = y)` or `if (x == null) x = y;`
//! can be rewritten to a compound form without changing behavior. The
//! analysis is conservative: anything it cannot prove safe (unbound symbols,
//! possible side effects, unknown types) is [`Verdict::NoOpportunity`].

mod coalesce;
mod compound;
pub mod operators;

pub use coalesce::IfNullCandidate;

use crate::config::{LanguageVersion, OpgenConfig};
use crate::diagnostics::codes;
use crate::semantic::{is_side_effect_free, SemanticModel};
use crate::symbols::{Symbol, TypeRef};
use crate::syntax::{walk_down_parentheses, BinaryOp, Expr, ExprKind, Stmt};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NoOpportunity,
    /// `x OP= y`
    CompoundOperator(BinaryOp),
    Increment,
    Decrement,
    /// `x ??= y`, wrapped in a cast back to the original type when
    /// `needs_cast` is set
    CoalesceAssign { needs_cast: bool },
}

impl Verdict {
    pub fn is_opportunity(&self) -> bool {
        !matches!(self, Verdict::NoOpportunity)
    }
}

/// Where the analyzed expression sits; decides `x++` versus `++x` and
/// whether a changed static type can be observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignmentContext<'a> {
    /// `x = x + 1;`
    ExpressionStatement,
    /// `for (...; ...; i = i + 1)`
    ForIncrementor,
    /// The `index`th argument of `invocation`
    Argument { invocation: &'a Expr, index: usize },
    /// Right-hand side of `target = ...`
    AssignedTo(&'a Expr),
    /// `return ...;` in the analyzed member
    Return,
    /// Conditions, operands and everything else
    Other,
}

impl AssignmentContext<'_> {
    /// The value of the rewritten expression is discarded, so `x++` reads
    /// naturally; elsewhere `++x` keeps the assigned value.
    pub fn prefers_postfix(&self) -> bool {
        matches!(self, AssignmentContext::ExpressionStatement)
    }
}

/// Which code-style rule a rewrite belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewriteRule {
    CompoundAssignment,
    CoalesceAssignment,
}

impl RewriteRule {
    pub fn code(self) -> &'static str {
        match self {
            RewriteRule::CompoundAssignment => codes::USE_COMPOUND_ASSIGNMENT,
            RewriteRule::CoalesceAssignment => codes::USE_COALESCE_COMPOUND_ASSIGNMENT,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RewriteRule::CompoundAssignment => "Use compound assignment",
            RewriteRule::CoalesceAssignment => "Use '??=' compound assignment",
        }
    }
}

/// Result of a successful match, borrowed from the analyzed tree
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCandidate<'a> {
    /// Left-hand side of the rewritten assignment
    pub target: &'a Expr,
    pub operator: BinaryOp,
    /// Right-hand side of the rewritten assignment; unused for `++`/`--`
    pub operand: &'a Expr,
    pub verdict: Verdict,
    pub rule: RewriteRule,
    /// Set when `verdict` needs a cast
    pub cast_type: Option<TypeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub language_version: LanguageVersion,
    pub prefer_compound_assignment: bool,
    pub prefer_coalesce_assignment: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            language_version: LanguageVersion::Latest,
            prefer_compound_assignment: true,
            prefer_coalesce_assignment: true,
        }
    }
}

impl From<&OpgenConfig> for AnalyzerOptions {
    fn from(config: &OpgenConfig) -> Self {
        Self {
            language_version: config.language_version,
            prefer_compound_assignment: config.prefer_compound_assignment.enabled,
            prefer_coalesce_assignment: config.prefer_coalesce_assignment.enabled,
        }
    }
}

impl AnalyzerOptions {
    pub fn with_language_version(mut self, version: LanguageVersion) -> Self {
        self.language_version = version;
        self
    }

    fn coalesce_assignment_available(&self) -> bool {
        self.prefer_coalesce_assignment && self.language_version.supports_coalesce_assignment()
    }
}

pub struct CompoundAssignmentAnalyzer<'m> {
    model: &'m dyn SemanticModel,
    options: AnalyzerOptions,
}

impl<'m> CompoundAssignmentAnalyzer<'m> {
    pub fn new(model: &'m dyn SemanticModel, options: AnalyzerOptions) -> Self {
        Self { model, options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn analyze(&self, expr: &Expr, context: &AssignmentContext<'_>) -> Verdict {
        self.candidate(expr, context)
            .map_or(Verdict::NoOpportunity, |candidate| candidate.verdict)
    }

    /// Match `x = x OP y` or `x ?? (x = y)`
    pub fn candidate<'e>(
        &self,
        expr: &'e Expr,
        context: &AssignmentContext<'_>,
    ) -> Option<CompoundCandidate<'e>> {
        match &expr.kind {
            ExprKind::Assignment(..) => self.analyze_assignment(expr, context),
            ExprKind::Binary(BinaryOp::Coalesce, ..) => self.analyze_coalesce(expr, context),
            _ => None,
        }
    }

    /// Match `if (x == null) x = y;`
    pub fn if_null_candidate<'s>(&self, stmt: &'s Stmt) -> Option<IfNullCandidate<'s>> {
        self.analyze_if_null_statement(stmt)
    }

    /// A location that can be read and written once instead of twice
    fn is_valid_target(&self, target: &Expr) -> bool {
        if !is_side_effect_free(self.model, target) {
            trace!(%target, "target may have side effects");
            return false;
        }
        // Array elements are variables; indexers have no symbol here
        if let ExprKind::ElementAccess(..) = &walk_down_parentheses(target).kind {
            return self.model.type_of(target).is_some();
        }
        match self.model.symbol_info(target) {
            Some(Symbol::Property(property)) => !property.returns_by_ref,
            Some(Symbol::Method(_)) | None => false,
            Some(_) => true,
        }
    }

    /// Cast needed to keep `rewritten` binding like an expression of type
    /// `original` at `context`
    fn coalesce_cast(
        &self,
        original: &TypeRef,
        rewritten: &Expr,
        context: &AssignmentContext<'_>,
    ) -> Option<TypeRef> {
        let rewritten_type = self.model.type_of(rewritten)?;
        if rewritten_type == *original {
            return None;
        }
        self.model
            .changes_binding(context, original, &rewritten_type)
            .then(|| original.clone())
    }
}
