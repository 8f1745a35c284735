//! Operation IR to syntax generation
//!
//! A recursive dispatcher over [`OperationData`]. The caller requests a
//! [`SyntaxRole`]; each handler decides whether its operation can produce
//! that shape and recurses into children with the roles they need. Children
//! are generated before their parents because syntax nodes are built from
//! fully-formed children.
//!
//! `Ok(None)` means "nothing to emit" (absent input, implicit operation) and
//! is not an error. Parents drop `None` children from sequences and fail only
//! when a required slot comes back empty.

mod expressions;
mod statements;
pub mod wrap;

use crate::errors::{GenerateError, GenerateResult};
use crate::ir::{Operation, OperationData, OperationKind};
use crate::syntax::{Expr, Stmt, SyntaxNode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Grammatical category a generation call must produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxRole {
    /// Let the operation pick its natural shape
    #[default]
    Unspecified,
    Statement,
    Expression,
}

impl fmt::Display for SyntaxRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyntaxRole::Unspecified => "Unspecified",
            SyntaxRole::Statement => "Statement",
            SyntaxRole::Expression => "Expression",
        })
    }
}

/// Converts Operation IR trees into syntax
///
/// Stateless: one instance can serve any number of calls, from any thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxGenerator;

impl SyntaxGenerator {
    pub fn new() -> Self {
        SyntaxGenerator
    }

    /// Generate `operation` in the requested role
    pub fn generate(
        &self,
        operation: Option<Operation>,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        let Some(operation) = operation else {
            return Ok(None);
        };

        let kind = operation.kind();
        trace!(%kind, %role, implicit = operation.is_implicit, "generating operation");

        let result = self.dispatch(operation, role);
        if let Err(err) = &result {
            debug!(%kind, %role, error = %err, "generation failed");
        }
        result
    }

    /// Generate in statement role
    pub fn generate_statement(&self, operation: Option<Operation>) -> GenerateResult<Option<Stmt>> {
        let kind = operation
            .as_ref()
            .map_or(OperationKind::Invalid, Operation::kind);
        match self.generate(operation, SyntaxRole::Statement)? {
            None => Ok(None),
            Some(SyntaxNode::Statement(stmt)) => Ok(Some(stmt)),
            Some(_) => Err(GenerateError::unsupported_role(kind, SyntaxRole::Statement)),
        }
    }

    /// Generate in expression role
    pub fn generate_expression(&self, operation: Option<Operation>) -> GenerateResult<Option<Expr>> {
        let kind = operation
            .as_ref()
            .map_or(OperationKind::Invalid, Operation::kind);
        match self.generate(operation, SyntaxRole::Expression)? {
            None => Ok(None),
            Some(SyntaxNode::Expression(expr)) => Ok(Some(expr)),
            Some(_) => Err(GenerateError::unsupported_role(kind, SyntaxRole::Expression)),
        }
    }

    fn dispatch(&self, operation: Operation, role: SyntaxRole) -> GenerateResult<Option<SyntaxNode>> {
        let kind = operation.kind();
        let Operation {
            data,
            is_implicit,
            ty,
        } = operation;

        match data {
            OperationData::Literal(value) => self.generate_literal(value, is_implicit, role),
            OperationData::LocalReference(local) => {
                self.generate_reference(OperationKind::LocalReference, local.name, is_implicit, role)
            }
            OperationData::ParameterReference(parameter) => self.generate_reference(
                OperationKind::ParameterReference,
                parameter.name,
                is_implicit,
                role,
            ),
            OperationData::InstanceReference => self.generate_instance_reference(is_implicit, role),
            OperationData::FieldReference(field) => self.generate_field_reference(field, role),
            OperationData::Conditional(conditional) => {
                self.generate_conditional(conditional, ty.is_some(), role)
            }
            OperationData::Block(block) => self.generate_block(block, role),
            OperationData::Return(ret) => self.generate_return(kind, ret, is_implicit, role),
            OperationData::Throw(throw) => self.generate_throw(throw, is_implicit, role),
            OperationData::NameOf(name_of) => self.generate_name_of(name_of, role),
            OperationData::ObjectCreation(creation) => {
                self.generate_object_creation(creation, ty, role)
            }
            OperationData::Parenthesized(parenthesized) => {
                self.generate_parenthesized(parenthesized, role)
            }
            OperationData::Argument(argument) => {
                if is_implicit {
                    return Ok(None);
                }
                self.check_not_statement(kind, role)?;
                Ok(Some(SyntaxNode::Argument(self.generate_argument(argument)?)))
            }
            OperationData::Labeled(labeled) => self.generate_labeled(labeled, is_implicit, role),
            OperationData::Empty => self.generate_empty(is_implicit, role),

            OperationData::Invocation(_)
            | OperationData::Binary(_)
            | OperationData::Unary(_)
            | OperationData::SimpleAssignment(_)
            | OperationData::CompoundAssignment(_)
            | OperationData::Increment(_)
            | OperationData::Coalesce(_)
            | OperationData::Conversion(_)
            | OperationData::PropertyReference(_)
            | OperationData::ExpressionStatement(_)
            | OperationData::Other(_) => Err(GenerateError::not_implemented(kind)),
        }
    }

    /// Fill a slot the grammar cannot leave empty
    fn required<T>(&self, value: Option<T>, kind: OperationKind, slot: &'static str) -> GenerateResult<T> {
        value.ok_or(GenerateError::missing_child(kind, slot))
    }

    fn check_not_statement(&self, kind: OperationKind, role: SyntaxRole) -> GenerateResult<()> {
        if role == SyntaxRole::Statement {
            return Err(GenerateError::unsupported_role(kind, role));
        }
        Ok(())
    }

    fn check_not_expression(&self, kind: OperationKind, role: SyntaxRole) -> GenerateResult<()> {
        if role == SyntaxRole::Expression {
            return Err(GenerateError::unsupported_role(kind, role));
        }
        Ok(())
    }
}
