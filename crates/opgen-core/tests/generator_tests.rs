use opgen_core::ir::ConstantValue;
use opgen_core::symbols::TypeRef;
use opgen_core::{
    ContractViolation, GenerateError, Operation, OperationKind, SyntaxGenerator, SyntaxNode,
    SyntaxRole, Unimplemented,
};
use opgen_test_helpers::fixtures::{
    block_operation, conditional_operation, field_operation, operations_json,
};
use opgen_test_helpers::rewrite::generate;

fn int(n: i64) -> Operation {
    Operation::literal(ConstantValue::Integer(n))
}

// ============================================================================
// Conditional
// ============================================================================

#[test]
fn test_conditional_expression_parenthesizes_all_operands() {
    let rendered = generate(conditional_operation(), SyntaxRole::Expression).unwrap();
    assert_eq!(rendered.as_deref(), Some("(flag) ? (1) : (2)"));
}

#[test]
fn test_typed_conditional_defaults_to_expression() {
    let node = SyntaxGenerator::new()
        .generate(Some(conditional_operation()), SyntaxRole::Unspecified)
        .unwrap();
    assert!(matches!(node, Some(SyntaxNode::Expression(_))));
}

#[test]
fn test_untyped_conditional_becomes_if_statement() {
    let op = Operation::conditional(
        Operation::local("flag", TypeRef::bool()),
        Operation::return_value(None),
        None,
    );
    let rendered = generate(op, SyntaxRole::Unspecified).unwrap();
    assert_eq!(rendered.as_deref(), Some("if (flag) { return; }"));
}

// ============================================================================
// Block
// ============================================================================

#[test]
fn test_block_drops_implicit_children() {
    let op = Operation::block(vec![
        Operation::return_value(Some(int(1))),
        Operation::return_value(None).implicit(),
    ]);
    let stmt = SyntaxGenerator::new()
        .generate_statement(Some(op))
        .unwrap()
        .unwrap();
    assert_eq!(stmt.to_string(), "{ return 1; }");
}

#[test]
fn test_block_with_label() {
    let rendered = generate(block_operation(), SyntaxRole::Statement).unwrap();
    assert_eq!(rendered.as_deref(), Some("{ return; done: ; }"));
}

// ============================================================================
// Role contract
// ============================================================================

#[test]
fn test_field_reference_in_statement_role_fails() {
    let err = generate(field_operation(), SyntaxRole::Statement).unwrap_err();
    assert_eq!(
        err,
        GenerateError::ContractViolation(ContractViolation::UnsupportedRole {
            kind: OperationKind::FieldReference,
            role: SyntaxRole::Statement,
        })
    );
}

#[test]
fn test_block_in_expression_role_fails() {
    let err = generate(block_operation(), SyntaxRole::Expression).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(
        err.to_string(),
        "contract violation: Block cannot be generated in Expression role"
    );
}

#[test]
fn test_field_reference_renders_receiver() {
    let rendered = generate(field_operation(), SyntaxRole::Expression).unwrap();
    assert_eq!(rendered.as_deref(), Some("this.count"));
}

// ============================================================================
// Unported kinds and absent input
// ============================================================================

#[test]
fn test_absent_operation_is_not_an_error() {
    assert_eq!(
        SyntaxGenerator::new()
            .generate(None, SyntaxRole::Statement)
            .unwrap(),
        None
    );
}

#[test]
fn test_unported_kind_inside_block_fails_the_tree() {
    let op = Operation::block(vec![
        Operation::return_value(None),
        Operation::other(OperationKind::Lock, vec![]),
    ]);
    let err = generate(op, SyntaxRole::Statement).unwrap_err();
    assert_eq!(
        err,
        GenerateError::NotImplemented(Unimplemented::Kind(OperationKind::Lock))
    );
}

// ============================================================================
// JSON input
// ============================================================================

#[test]
fn test_operations_survive_json() {
    let json = operations_json(&[conditional_operation(), field_operation(), block_operation()]);
    let operations: Vec<Operation> = serde_json::from_str(&json).unwrap();
    assert_eq!(operations.len(), 3);

    let rendered: Vec<String> = operations
        .into_iter()
        .filter_map(|op| generate(op, SyntaxRole::Unspecified).unwrap())
        .collect();
    assert_eq!(
        rendered,
        vec!["(flag) ? (1) : (2)", "this.count", "{ return; done: ; }"]
    );
}
