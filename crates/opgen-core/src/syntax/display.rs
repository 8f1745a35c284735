//! Canonical single-line rendering of syntax trees
//!
//! This is not a formatter: the tree is printed exactly as built, without
//! inserting parentheses or making layout decisions. Used for diagnostics,
//! the CLI and tests.

use super::*;
use std::fmt::{self, Display, Formatter, Write};

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{:?}", n),
            Literal::Char(c) => write!(f, "'{}'", c.escape_default()),
            Literal::String(s) => write!(f, "\"{}\"", s.escape_default()),
        }
    }
}

impl Display for TypeSyntax {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Predefined(p) => f.write_str(p.keyword()),
            TypeSyntax::Name(name) => f.write_str(name),
            TypeSyntax::Qualified(left, right) => write!(f, "{}.{}", left, right),
            TypeSyntax::Nullable(inner) => write!(f, "{}?", inner),
            TypeSyntax::Array(element) => write!(f, "{}[]", element),
        }
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}: ", name)?;
        }
        if let Some(keyword) = self.ref_kind.keyword() {
            write!(f, "{} ", keyword)?;
        }
        write!(f, "{}", self.value)
    }
}

fn write_separated<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(lit) => write!(f, "{}", lit),
            ExprKind::Identifier(name) => f.write_str(name),
            ExprKind::This => f.write_str("this"),
            ExprKind::MemberAccess(receiver, name) => write!(f, "{}.{}", receiver, name),
            ExprKind::ElementAccess(receiver, args) => {
                write!(f, "{}[", receiver)?;
                write_separated(f, args, ", ")?;
                f.write_char(']')
            }
            ExprKind::Invocation(callee, args) => {
                write!(f, "{}(", callee)?;
                write_separated(f, args, ", ")?;
                f.write_char(')')
            }
            ExprKind::Parenthesized(inner) => write!(f, "({})", inner),
            ExprKind::Conditional(condition, when_true, when_false) => {
                write!(f, "{} ? {} : {}", condition, when_true, when_false)
            }
            ExprKind::Binary(op, left, right) => write!(f, "{} {} {}", left, op.token(), right),
            ExprKind::Prefix(op, operand) => write!(f, "{}{}", op.token(), operand),
            ExprKind::Postfix(op, operand) => write!(f, "{}{}", operand, op.token()),
            ExprKind::Assignment(target, op, value) => {
                write!(f, "{} {} {}", target, op.token(), value)
            }
            ExprKind::Cast(ty, operand) => write!(f, "({}){}", ty, operand),
            ExprKind::Is(operand, IsPattern::Constant(constant)) => {
                write!(f, "{} is {}", operand, constant)
            }
            ExprKind::Is(operand, IsPattern::Type(ty)) => write!(f, "{} is {}", operand, ty),
            ExprKind::Throw(exception) => write!(f, "throw {}", exception),
            ExprKind::ObjectCreation(creation) => {
                write!(f, "new {}(", creation.ty)?;
                write_separated(f, &creation.arguments, ", ")?;
                f.write_char(')')?;
                if let Some(initializer) = &creation.initializer {
                    f.write_str(" { ")?;
                    write_separated(f, initializer, ", ")?;
                    f.write_str(" }")?;
                }
                Ok(())
            }
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Expression(expr) => write!(f, "{};", expr),
            StmtKind::Block(block) => write!(f, "{}", block),
            StmtKind::If(if_stmt) => {
                write!(f, "if ({}) {}", if_stmt.condition, if_stmt.then_branch)?;
                if let Some(else_branch) = &if_stmt.else_branch {
                    write!(f, " else {}", else_branch)?;
                }
                Ok(())
            }
            StmtKind::Return(Some(value)) => write!(f, "return {};", value),
            StmtKind::Return(None) => f.write_str("return;"),
            StmtKind::YieldReturn(value) => write!(f, "yield return {};", value),
            StmtKind::YieldBreak => f.write_str("yield break;"),
            StmtKind::Throw(Some(exception)) => write!(f, "throw {};", exception),
            StmtKind::Throw(None) => f.write_str("throw;"),
            StmtKind::Labeled(label, statement) => write!(f, "{}: {}", label, statement),
            StmtKind::Empty => f.write_char(';'),
            StmtKind::For(for_stmt) => {
                f.write_str("for (")?;
                write_separated(f, &for_stmt.initializers, ", ")?;
                f.write_str(";")?;
                if let Some(condition) = &for_stmt.condition {
                    write!(f, " {}", condition)?;
                }
                f.write_str(";")?;
                if !for_stmt.incrementors.is_empty() {
                    f.write_char(' ')?;
                    write_separated(f, &for_stmt.incrementors, ", ")?;
                }
                write!(f, ") {}", for_stmt.body)
            }
            StmtKind::While(while_stmt) => {
                write!(f, "while ({}) {}", while_stmt.condition, while_stmt.body)
            }
            StmtKind::Switch(switch) => {
                write!(f, "switch ({}) {{", switch.governing)?;
                for section in &switch.sections {
                    if section.labels.is_empty() {
                        f.write_str(" default:")?;
                    }
                    for label in &section.labels {
                        write!(f, " case {}:", label)?;
                    }
                    for statement in &section.statements {
                        write!(f, " {}", statement)?;
                    }
                }
                f.write_str(" }")
            }
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for statement in &self.statements {
            write!(f, " {}", statement)?;
        }
        f.write_str(" }")
    }
}

impl Display for SyntaxNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxNode::Statement(stmt) => write!(f, "{}", stmt),
            SyntaxNode::Expression(expr) => write!(f, "{}", expr),
            SyntaxNode::Argument(arg) => write!(f, "{}", arg),
        }
    }
}
