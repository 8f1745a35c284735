//! Property-based tests for the compound-assignment analyzer and fix
//!
//! Identifiers, operators and operands are generated at random; each
//! property must hold for every combination.

use opgen_core::analyzer::operators::{binary_operator, compound_assignment_operator};
use opgen_core::symbols::TypeRef;
use opgen_core::syntax::factory::*;
use opgen_core::syntax::{BinaryOp, Expr};
use opgen_core::{
    AnalyzerOptions, AssignmentContext, CompoundAssignmentAnalyzer, DeclarationModel, OpgenConfig,
    Verdict,
};
use opgen_test_helpers::rewrite::fix_with_model;
use proptest::prelude::*;

const ALL_OPERATORS: [BinaryOp; 20] = [
    BinaryOp::Add,
    BinaryOp::Subtract,
    BinaryOp::Multiply,
    BinaryOp::Divide,
    BinaryOp::Modulo,
    BinaryOp::BitwiseAnd,
    BinaryOp::BitwiseXor,
    BinaryOp::BitwiseOr,
    BinaryOp::ShiftLeft,
    BinaryOp::ShiftRight,
    BinaryOp::UnsignedShiftRight,
    BinaryOp::Coalesce,
    BinaryOp::Equal,
    BinaryOp::NotEqual,
    BinaryOp::LessThan,
    BinaryOp::LessThanOrEqual,
    BinaryOp::GreaterThan,
    BinaryOp::GreaterThanOrEqual,
    BinaryOp::LogicalAnd,
    BinaryOp::LogicalOr,
];

/// Arithmetic, bitwise and shift operators valid on `int`
fn int_operator_strategy() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
        BinaryOp::Modulo,
        BinaryOp::BitwiseAnd,
        BinaryOp::BitwiseXor,
        BinaryOp::BitwiseOr,
        BinaryOp::ShiftLeft,
        BinaryOp::ShiftRight,
        BinaryOp::UnsignedShiftRight,
    ])
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-zA-Z0-9_]{0,12}"
}

/// Operands other than the unit literal, which would become `++`/`--`
fn operand_strategy() -> impl Strategy<Value = i64> {
    2i64..10_000
}

fn model_with(names: &[&str]) -> DeclarationModel {
    let mut model = DeclarationModel::new();
    for name in names {
        model.add_local(*name, TypeRef::int());
    }
    model
}

fn wrap_in_parentheses(mut expr: Expr, depth: usize) -> Expr {
    for _ in 0..depth {
        expr = parenthesized(expr);
    }
    expr
}

#[test]
fn test_operator_table_round_trips() {
    for op in ALL_OPERATORS {
        if let Some(compound) = compound_assignment_operator(op) {
            assert_eq!(binary_operator(compound), Some(op));
            assert_eq!(compound.token(), format!("{}=", op.token()));
        }
    }
}

proptest! {
    #[test]
    fn self_assignment_becomes_compound(
        name in identifier_strategy(),
        op in int_operator_strategy(),
        operand in operand_strategy(),
    ) {
        let model = model_with(&[name.as_str()]);
        let expr = simple_assignment(identifier(&name), binary(op, identifier(&name), integer(operand)));
        let verdict = CompoundAssignmentAnalyzer::new(&model, AnalyzerOptions::default())
            .analyze(&expr, &AssignmentContext::ExpressionStatement);
        prop_assert_eq!(verdict, Verdict::CompoundOperator(op));

        let (fixed, _) = fix_with_model(&[expression_statement(expr)], &model, &OpgenConfig::default());
        prop_assert_eq!(fixed, vec![format!("{} {}= {};", name, op.token(), operand)]);
    }

    #[test]
    fn different_symbols_never_match(
        target in identifier_strategy(),
        other in identifier_strategy(),
        op in int_operator_strategy(),
        operand in operand_strategy(),
    ) {
        prop_assume!(target != other);
        let model = model_with(&[target.as_str(), other.as_str()]);
        let expr = simple_assignment(identifier(&target), binary(op, identifier(&other), integer(operand)));
        let verdict = CompoundAssignmentAnalyzer::new(&model, AnalyzerOptions::default())
            .analyze(&expr, &AssignmentContext::Other);
        prop_assert_eq!(verdict, Verdict::NoOpportunity);
    }

    #[test]
    fn parentheses_do_not_change_the_verdict(
        name in identifier_strategy(),
        op in int_operator_strategy(),
        operand in 1i64..4,
        depth in 0usize..4,
    ) {
        let model = model_with(&[name.as_str()]);
        let analyzer = CompoundAssignmentAnalyzer::new(&model, AnalyzerOptions::default());
        let context = AssignmentContext::ExpressionStatement;

        let plain = simple_assignment(identifier(&name), binary(op, identifier(&name), integer(operand)));
        let wrapped = simple_assignment(
            identifier(&name),
            wrap_in_parentheses(binary(op, identifier(&name), integer(operand)), depth),
        );
        prop_assert_eq!(analyzer.analyze(&wrapped, &context), analyzer.analyze(&plain, &context));
    }

    #[test]
    fn undeclared_names_are_never_rewritten(
        name in identifier_strategy(),
        op in int_operator_strategy(),
        operand in operand_strategy(),
    ) {
        let model = DeclarationModel::new();
        let expr = simple_assignment(identifier(&name), binary(op, identifier(&name), integer(operand)));
        let verdict = CompoundAssignmentAnalyzer::new(&model, AnalyzerOptions::default())
            .analyze(&expr, &AssignmentContext::ExpressionStatement);
        prop_assert_eq!(verdict, Verdict::NoOpportunity);
    }
}
