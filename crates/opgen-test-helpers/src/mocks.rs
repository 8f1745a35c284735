//! Mock implementations for testing

use opgen_core::symbols::{Symbol, TypeRef};
use opgen_core::syntax::Expr;
use opgen_core::{AssignmentContext, SemanticModel};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps a model and answers `changes_binding` with a fixed value, counting
/// how often it is asked
pub struct FixedBindingModel<M> {
    inner: M,
    changes_binding: bool,
    queries: AtomicUsize,
}

impl<M: SemanticModel> FixedBindingModel<M> {
    pub fn new(inner: M, changes_binding: bool) -> Self {
        Self {
            inner,
            changes_binding,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn binding_queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl<M: SemanticModel> SemanticModel for FixedBindingModel<M> {
    fn symbol_info(&self, expr: &Expr) -> Option<Symbol> {
        self.inner.symbol_info(expr)
    }

    fn type_of(&self, expr: &Expr) -> Option<TypeRef> {
        self.inner.type_of(expr)
    }

    fn changes_binding(
        &self,
        _context: &AssignmentContext<'_>,
        _original: &TypeRef,
        _rewritten: &TypeRef,
    ) -> bool {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.changes_binding
    }
}

/// A model that binds nothing
pub struct EmptyModel;

impl SemanticModel for EmptyModel {
    fn symbol_info(&self, _expr: &Expr) -> Option<Symbol> {
        None
    }

    fn type_of(&self, _expr: &Expr) -> Option<TypeRef> {
        None
    }
}
