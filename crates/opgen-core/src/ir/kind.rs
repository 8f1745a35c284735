use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of operation the IR producer can emit
///
/// `Operation::kind()` maps each payload onto this table; the generator
/// reports unported kinds through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    // Ported to the generator
    Literal,
    LocalReference,
    ParameterReference,
    InstanceReference,
    FieldReference,
    Conditional,
    Block,
    Return,
    YieldReturn,
    YieldBreak,
    Throw,
    NameOf,
    ObjectCreation,
    Parenthesized,
    Argument,
    Labeled,
    Empty,

    // Not yet ported
    Invocation,
    Binary,
    Unary,
    SimpleAssignment,
    CompoundAssignment,
    CoalesceAssignment,
    Increment,
    Decrement,
    Coalesce,
    Conversion,
    PropertyReference,
    MethodReference,
    EventReference,
    ArrayElementReference,
    ArrayCreation,
    ArrayInitializer,
    ObjectOrCollectionInitializer,
    ExpressionStatement,
    VariableDeclarationGroup,
    Loop,
    Switch,
    Branch,
    Try,
    Using,
    Lock,
    Await,
    AnonymousFunction,
    DelegateCreation,
    Tuple,
    InterpolatedString,
    IsType,
    IsPattern,
    TypeOf,
    SizeOf,
    DefaultValue,
    ConditionalAccess,
    Invalid,
}

impl OperationKind {
    /// Whether the generator has a handler for this kind
    pub fn is_ported(self) -> bool {
        matches!(
            self,
            OperationKind::Literal
                | OperationKind::LocalReference
                | OperationKind::ParameterReference
                | OperationKind::InstanceReference
                | OperationKind::FieldReference
                | OperationKind::Conditional
                | OperationKind::Block
                | OperationKind::Return
                | OperationKind::YieldReturn
                | OperationKind::YieldBreak
                | OperationKind::Throw
                | OperationKind::NameOf
                | OperationKind::ObjectCreation
                | OperationKind::Parenthesized
                | OperationKind::Argument
                | OperationKind::Labeled
                | OperationKind::Empty
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
