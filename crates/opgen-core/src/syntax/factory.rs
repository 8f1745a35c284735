//! Constructors for synthesized syntax
//!
//! Every node built here carries `Span::default()`.

use super::*;

pub fn identifier(name: impl Into<String>) -> Expr {
    Expr::synthesized(ExprKind::Identifier(name.into()))
}

pub fn this_expression() -> Expr {
    Expr::synthesized(ExprKind::This)
}

pub fn literal(value: Literal) -> Expr {
    Expr::synthesized(ExprKind::Literal(value))
}

pub fn integer(value: i64) -> Expr {
    literal(Literal::Integer(value))
}

pub fn null_literal() -> Expr {
    literal(Literal::Null)
}

pub fn member_access(receiver: Expr, name: impl Into<String>) -> Expr {
    Expr::synthesized(ExprKind::MemberAccess(Box::new(receiver), name.into()))
}

/// `Type.name`, used for static member access
pub fn qualified_member_access(ty: &TypeSyntax, name: impl Into<String>) -> Expr {
    member_access(type_expression(ty), name)
}

/// A type in expression position (the qualifier of a static access)
pub fn type_expression(ty: &TypeSyntax) -> Expr {
    match ty {
        TypeSyntax::Qualified(left, right) => member_access(type_expression(left), right.clone()),
        other => identifier(other.to_string()),
    }
}

pub fn element_access(receiver: Expr, arguments: Vec<Argument>) -> Expr {
    Expr::synthesized(ExprKind::ElementAccess(Box::new(receiver), arguments))
}

pub fn invocation(callee: Expr, arguments: Vec<Argument>) -> Expr {
    Expr::synthesized(ExprKind::Invocation(Box::new(callee), arguments))
}

pub fn argument(ref_kind: RefKind, value: Expr) -> Argument {
    Argument {
        name: None,
        ref_kind,
        value,
    }
}

pub fn parenthesized(inner: Expr) -> Expr {
    Expr::synthesized(ExprKind::Parenthesized(Box::new(inner)))
}

pub fn conditional(condition: Expr, when_true: Expr, when_false: Expr) -> Expr {
    Expr::synthesized(ExprKind::Conditional(
        Box::new(condition),
        Box::new(when_true),
        Box::new(when_false),
    ))
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::synthesized(ExprKind::Binary(op, Box::new(left), Box::new(right)))
}

pub fn prefix(op: PrefixOp, operand: Expr) -> Expr {
    Expr::synthesized(ExprKind::Prefix(op, Box::new(operand)))
}

pub fn postfix(op: PostfixOp, operand: Expr) -> Expr {
    Expr::synthesized(ExprKind::Postfix(op, Box::new(operand)))
}

pub fn assignment(target: Expr, op: AssignmentOp, value: Expr) -> Expr {
    Expr::synthesized(ExprKind::Assignment(Box::new(target), op, Box::new(value)))
}

pub fn simple_assignment(target: Expr, value: Expr) -> Expr {
    assignment(target, AssignmentOp::Assign, value)
}

pub fn cast(ty: TypeSyntax, operand: Expr) -> Expr {
    Expr::synthesized(ExprKind::Cast(ty, Box::new(operand)))
}

pub fn throw_expression(exception: Expr) -> Expr {
    Expr::synthesized(ExprKind::Throw(Box::new(exception)))
}

pub fn object_creation(
    ty: TypeSyntax,
    arguments: Vec<Argument>,
    initializer: Option<Vec<Expr>>,
) -> Expr {
    Expr::synthesized(ExprKind::ObjectCreation(ObjectCreation {
        ty,
        arguments,
        initializer,
    }))
}

pub fn expression_statement(expr: Expr) -> Stmt {
    Stmt::synthesized(StmtKind::Expression(expr))
}

pub fn block(statements: Vec<Stmt>) -> Stmt {
    Stmt::synthesized(StmtKind::Block(Block { statements }))
}

pub fn if_statement(condition: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Stmt {
    Stmt::synthesized(StmtKind::If(IfStatement {
        condition,
        then_branch: Box::new(then_branch),
        else_branch: else_branch.map(Box::new),
    }))
}

pub fn return_statement(value: Option<Expr>) -> Stmt {
    Stmt::synthesized(StmtKind::Return(value))
}

pub fn yield_return_statement(value: Expr) -> Stmt {
    Stmt::synthesized(StmtKind::YieldReturn(value))
}

pub fn yield_break_statement() -> Stmt {
    Stmt::synthesized(StmtKind::YieldBreak)
}

pub fn throw_statement(exception: Option<Expr>) -> Stmt {
    Stmt::synthesized(StmtKind::Throw(exception))
}

pub fn labeled_statement(label: impl Into<String>, statement: Stmt) -> Stmt {
    Stmt::synthesized(StmtKind::Labeled(label.into(), Box::new(statement)))
}

pub fn empty_statement() -> Stmt {
    Stmt::synthesized(StmtKind::Empty)
}

pub fn for_statement(
    initializers: Vec<Expr>,
    condition: Option<Expr>,
    incrementors: Vec<Expr>,
    body: Stmt,
) -> Stmt {
    Stmt::synthesized(StmtKind::For(ForStatement {
        initializers,
        condition,
        incrementors,
        body: Box::new(body),
    }))
}

pub fn while_statement(condition: Expr, body: Stmt) -> Stmt {
    Stmt::synthesized(StmtKind::While(WhileStatement {
        condition,
        body: Box::new(body),
    }))
}

pub fn switch_statement(governing: Expr, sections: Vec<SwitchSection>) -> Stmt {
    Stmt::synthesized(StmtKind::Switch(SwitchStatement {
        governing,
        sections,
    }))
}
