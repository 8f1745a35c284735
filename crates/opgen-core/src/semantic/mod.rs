//! Symbol and type oracle consulted by the analyzer
//!
//! The host owns the real semantic model; [`DeclarationModel`] is a small
//! in-memory implementation for the CLI and tests.

pub mod effects;
pub mod model;

pub use effects::{are_equivalent, is_side_effect_free};
pub use model::{
    DeclarationModel, MethodDeclaration, ParameterDeclaration, PropertyDeclaration,
    TypeDeclaration, VariableDeclaration,
};

use crate::analyzer::AssignmentContext;
use crate::symbols::{Symbol, TypeRef};
use crate::syntax::Expr;

pub trait SemanticModel: Sync {
    /// Symbol the expression binds to, `None` when it does not bind
    fn symbol_info(&self, expr: &Expr) -> Option<Symbol>;

    /// Static type of the expression
    fn type_of(&self, expr: &Expr) -> Option<TypeRef>;

    /// Whether replacing an expression of type `original` with one of type
    /// `rewritten` at `context` would bind differently (overload choice,
    /// inferred type, conversion).
    fn changes_binding(
        &self,
        _context: &AssignmentContext<'_>,
        _original: &TypeRef,
        _rewritten: &TypeRef,
    ) -> bool {
        true
    }
}
