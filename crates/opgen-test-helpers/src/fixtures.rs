//! Test fixtures - declaration models, syntax and operation trees

use opgen_core::ir::ConstantValue;
use opgen_core::semantic::{
    MethodDeclaration, PropertyDeclaration, TypeDeclaration, VariableDeclaration,
};
use opgen_core::symbols::{FieldSymbol, NamedTypeKind, PrimitiveType, RefKind, TypeRef};
use opgen_core::syntax::factory::*;
use opgen_core::syntax::{BinaryOp, Expr, Stmt};
use opgen_core::{DeclarationModel, Operation};
use serde_json::json;

pub fn int_nullable() -> TypeRef {
    TypeRef::nullable(TypeRef::int())
}

/// Scope inside an instance method of class `C`
///
/// | name       | kind                  | type    |
/// |------------|-----------------------|---------|
/// | `a`, `b`   | local                 | int     |
/// | `by`       | local                 | byte    |
/// | `l`        | local                 | long    |
/// | `d`        | local                 | double  |
/// | `ch`       | local                 | char    |
/// | `color`    | local                 | Color   |
/// | `n`        | local                 | int?    |
/// | `s`        | local                 | string  |
/// | `o`, `p`   | local                 | Widget  |
/// | `x`        | parameter             | int     |
/// | `count`    | field                 | int     |
/// | `Total`    | static field          | int     |
/// | `cache`    | field                 | Widget  |
/// | `Value`    | property              | int     |
/// | `Inner`    | property              | C       |
/// | `Slot`     | ref-returning property| int     |
/// | `Goo()`    | method                | C       |
/// | `M(int?)`, `M(int)`   | overloads  |         |
/// | `N(int?)`  | method                |         |
pub fn sample_model() -> DeclarationModel {
    let mut model = DeclarationModel::for_type(
        "C",
        TypeDeclaration::class()
            .with_field(VariableDeclaration::new("count", TypeRef::int()))
            .with_field(VariableDeclaration::new("Total", TypeRef::int()).as_static())
            .with_field(VariableDeclaration::new("cache", TypeRef::class("Widget")))
            .with_property(PropertyDeclaration::new("Value", TypeRef::int()))
            .with_property(PropertyDeclaration::new("Inner", TypeRef::class("C")))
            .with_property(PropertyDeclaration::new("Slot", TypeRef::int()).by_ref())
            .with_method(MethodDeclaration::new("Goo").returning(TypeRef::class("C")))
            .with_method(MethodDeclaration::new("M").with_parameter("x", int_nullable()))
            .with_method(MethodDeclaration::new("M").with_parameter("x", TypeRef::int()))
            .with_method(MethodDeclaration::new("N").with_parameter("x", int_nullable())),
    );
    model.add_type("Color", TypeDeclaration::new(NamedTypeKind::Enum));
    model.add_type("Widget", TypeDeclaration::class());

    for (name, ty) in [
        ("a", TypeRef::int()),
        ("b", TypeRef::int()),
        ("by", TypeRef::Primitive(PrimitiveType::Byte)),
        ("l", TypeRef::Primitive(PrimitiveType::Long)),
        ("d", TypeRef::Primitive(PrimitiveType::Double)),
        ("ch", TypeRef::Primitive(PrimitiveType::Char)),
        ("color", TypeRef::enumeration("Color")),
        ("n", int_nullable()),
        ("s", TypeRef::string()),
        ("o", TypeRef::class("Widget")),
        ("p", TypeRef::class("Widget")),
    ] {
        model.add_local(name, ty);
    }
    model.add_parameter("x", TypeRef::int());
    model
}

/// `name = name OP operand`
pub fn self_assignment(name: &str, op: BinaryOp, operand: Expr) -> Expr {
    simple_assignment(identifier(name), binary(op, identifier(name), operand))
}

/// `left ?? (target = value)`
pub fn coalesce_assignment(left: Expr, target: Expr, value: Expr) -> Expr {
    binary(
        BinaryOp::Coalesce,
        left,
        parenthesized(simple_assignment(target, value)),
    )
}

/// A method body exercising both rules
pub fn sample_statements() -> Vec<Stmt> {
    vec![
        expression_statement(self_assignment("a", BinaryOp::Add, integer(10))),
        expression_statement(self_assignment("b", BinaryOp::Subtract, integer(1))),
        if_statement(
            binary(BinaryOp::Equal, identifier("o"), null_literal()),
            block(vec![expression_statement(simple_assignment(
                identifier("o"),
                identifier("p"),
            ))]),
            None,
        ),
        expression_statement(invocation(
            identifier("M"),
            vec![argument(
                RefKind::None,
                coalesce_assignment(identifier("n"), identifier("n"), integer(1)),
            )],
        )),
        return_statement(Some(self_assignment("x", BinaryOp::Multiply, integer(2)))),
    ]
}

/// `{ "model": ..., "statements": ... }` as read by `opgen fix`
pub fn fix_document(statements: &[Stmt]) -> String {
    json!({
        "model": sample_model(),
        "statements": statements,
    })
    .to_string()
}

pub fn sample_fix_document() -> String {
    fix_document(&sample_statements())
}

/// `flag ? 1 : 2` with `flag` a bool local
pub fn conditional_operation() -> Operation {
    Operation::conditional(
        Operation::local("flag", TypeRef::bool()),
        Operation::literal(ConstantValue::Integer(1)),
        Some(Operation::literal(ConstantValue::Integer(2))),
    )
    .with_type(TypeRef::int())
}

/// `this.count` read through an explicit instance
pub fn field_operation() -> Operation {
    Operation::field_reference(
        FieldSymbol {
            name: "count".to_string(),
            ty: TypeRef::int(),
            containing_type: TypeRef::class("C"),
            is_static: false,
        },
        Some(Operation::instance_reference(TypeRef::class("C"))),
    )
}

/// `{ return; done: ; }`
pub fn block_operation() -> Operation {
    Operation::block(vec![
        Operation::return_value(None),
        Operation::labeled("done", Some(Operation::empty())),
    ])
}

pub fn operations_json(operations: &[Operation]) -> String {
    serde_json::to_string(operations).unwrap_or_default()
}
