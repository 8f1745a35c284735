//! Concrete syntax for a C#-like target grammar
//!
//! Produced by the generator and consumed (and rewritten) by the
//! compound-assignment analyzer. Nodes are immutable once built; parents are
//! constructed from fully-formed children.

pub mod display;
pub mod equivalence;
pub mod factory;

use crate::span::Span;
use crate::symbols::{PrimitiveType, RefKind};
use serde::{Deserialize, Serialize};

pub use equivalence::walk_down_parentheses;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    #[serde(default)]
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// A node with no source location
    pub fn synthesized(kind: ExprKind) -> Self {
        Expr {
            kind,
            span: Span::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    This,
    MemberAccess(Box<Expr>, String),
    ElementAccess(Box<Expr>, Vec<Argument>),
    Invocation(Box<Expr>, Vec<Argument>),
    Parenthesized(Box<Expr>),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Prefix(PrefixOp, Box<Expr>),
    Postfix(PostfixOp, Box<Expr>),
    Assignment(Box<Expr>, AssignmentOp, Box<Expr>),
    Cast(TypeSyntax, Box<Expr>),
    Is(Box<Expr>, IsPattern),
    Throw(Box<Expr>),
    ObjectCreation(ObjectCreation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Char(char),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Coalesce,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOp {
    pub fn token(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::BitwiseAnd => "&",
            BinaryOp::BitwiseXor => "^",
            BinaryOp::BitwiseOr => "|",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::UnsignedShiftRight => ">>>",
            BinaryOp::Coalesce => "??",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanOrEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanOrEqual => ">=",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::LessThan
                | BinaryOp::LessThanOrEqual
                | BinaryOp::GreaterThan
                | BinaryOp::GreaterThanOrEqual
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrefixOp {
    Plus,
    Negate,
    LogicalNot,
    BitwiseNot,
    Increment,
    Decrement,
}

impl PrefixOp {
    pub fn token(self) -> &'static str {
        match self {
            PrefixOp::Plus => "+",
            PrefixOp::Negate => "-",
            PrefixOp::LogicalNot => "!",
            PrefixOp::BitwiseNot => "~",
            PrefixOp::Increment => "++",
            PrefixOp::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostfixOp {
    Increment,
    Decrement,
}

impl PostfixOp {
    pub fn token(self) -> &'static str {
        match self {
            PostfixOp::Increment => "++",
            PostfixOp::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignmentOp {
    Assign,                   // =
    AddAssign,                // +=
    SubtractAssign,           // -=
    MultiplyAssign,           // *=
    DivideAssign,             // /=
    ModuloAssign,             // %=
    BitwiseAndAssign,         // &=
    BitwiseXorAssign,         // ^=
    BitwiseOrAssign,          // |=
    LeftShiftAssign,          // <<=
    RightShiftAssign,         // >>=
    UnsignedRightShiftAssign, // >>>=
    CoalesceAssign,           // ??=
}

impl AssignmentOp {
    pub fn token(self) -> &'static str {
        match self {
            AssignmentOp::Assign => "=",
            AssignmentOp::AddAssign => "+=",
            AssignmentOp::SubtractAssign => "-=",
            AssignmentOp::MultiplyAssign => "*=",
            AssignmentOp::DivideAssign => "/=",
            AssignmentOp::ModuloAssign => "%=",
            AssignmentOp::BitwiseAndAssign => "&=",
            AssignmentOp::BitwiseXorAssign => "^=",
            AssignmentOp::BitwiseOrAssign => "|=",
            AssignmentOp::LeftShiftAssign => "<<=",
            AssignmentOp::RightShiftAssign => ">>=",
            AssignmentOp::UnsignedRightShiftAssign => ">>>=",
            AssignmentOp::CoalesceAssign => "??=",
        }
    }
}

/// Pattern on the right of `is`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IsPattern {
    Constant(Box<Expr>),
    Type(TypeSyntax),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ref_kind: RefKind,
    pub value: Expr,
}

impl Argument {
    pub fn positional(value: Expr) -> Self {
        Argument {
            name: None,
            ref_kind: RefKind::None,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectCreation {
    pub ty: TypeSyntax,
    pub arguments: Vec<Argument>,
    #[serde(default)]
    pub initializer: Option<Vec<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeSyntax {
    Predefined(PrimitiveType),
    Name(String),
    Qualified(Box<TypeSyntax>, String),
    Nullable(Box<TypeSyntax>),
    Array(Box<TypeSyntax>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    #[serde(default)]
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    pub fn synthesized(kind: StmtKind) -> Self {
        Stmt {
            kind,
            span: Span::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StmtKind {
    Expression(Expr),
    Block(Block),
    If(IfStatement),
    Return(Option<Expr>),
    YieldReturn(Expr),
    YieldBreak,
    Throw(Option<Expr>),
    Labeled(String, Box<Stmt>),
    Empty,
    For(ForStatement),
    While(WhileStatement),
    Switch(SwitchStatement),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfStatement {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    #[serde(default)]
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForStatement {
    #[serde(default)]
    pub initializers: Vec<Expr>,
    #[serde(default)]
    pub condition: Option<Expr>,
    #[serde(default)]
    pub incrementors: Vec<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatement {
    pub governing: Expr,
    #[serde(default)]
    pub sections: Vec<SwitchSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchSection {
    /// Case labels; an empty list is the `default` section
    #[serde(default)]
    pub labels: Vec<Expr>,
    pub statements: Vec<Stmt>,
}

/// Output of a generation call: the grammatical category depends on the
/// requested role
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Statement(Stmt),
    Expression(Expr),
    /// Only produced for `Argument` operations
    Argument(Argument),
}

impl SyntaxNode {
    pub fn into_statement(self) -> Option<Stmt> {
        match self {
            SyntaxNode::Statement(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn into_expression(self) -> Option<Expr> {
        match self {
            SyntaxNode::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn is_statement(&self) -> bool {
        matches!(self, SyntaxNode::Statement(_))
    }
}
