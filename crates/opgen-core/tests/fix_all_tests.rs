use indoc::indoc;
use opgen_core::symbols::{RefKind, TypeRef};
use opgen_core::syntax::factory::*;
use opgen_core::syntax::{BinaryOp, Expr};
use opgen_core::{
    codes, fix_all, CancellationToken, CollectingDiagnosticHandler, DiagnosticHandler,
    DiagnosticLevel, FixAllError, LanguageVersion, OpgenConfig, Severity, Stmt,
};
use opgen_test_helpers::fixtures::{
    coalesce_assignment, int_nullable, sample_model, sample_statements, self_assignment,
};
use opgen_test_helpers::rewrite::{fix, fix_with_config, fix_with_model};
use std::fs;
use tempfile::TempDir;

fn render(statements: &[Stmt]) -> Vec<String> {
    statements.iter().map(ToString::to_string).collect()
}

#[test]
fn test_sample_body_is_fully_rewritten() {
    let model = sample_model();
    let handler = CollectingDiagnosticHandler::new();
    let statements = sample_statements();

    let outcome = fix_all(
        &statements,
        &model,
        &OpgenConfig::default(),
        &handler,
        &CancellationToken::new(),
    )
    .unwrap();

    assert_eq!(
        render(&outcome.statements),
        vec![
            "a += 10;",
            "b--;",
            "o ??= p;",
            "M((int?)(n ??= 1));",
            "return x *= 2;",
        ]
    );
    assert_eq!(outcome.fix_count(), 5);
    assert_eq!(outcome.fixes.get(codes::USE_COMPOUND_ASSIGNMENT), Some(&3));
    assert_eq!(outcome.fixes.get(codes::USE_COALESCE_COMPOUND_ASSIGNMENT), Some(&2));

    let diagnostics = handler.get_diagnostics();
    assert_eq!(diagnostics.len(), 5);
    assert!(diagnostics.iter().all(|d| d.level == DiagnosticLevel::Info));

    // Input is left untouched
    assert_eq!(statements, sample_statements());
}

#[test]
fn test_fixing_twice_changes_nothing() {
    let model = sample_model();
    let config = OpgenConfig::default();
    let token = CancellationToken::new();

    let first = fix_all(
        &sample_statements(),
        &model,
        &config,
        &CollectingDiagnosticHandler::new(),
        &token,
    )
    .unwrap();
    let handler = CollectingDiagnosticHandler::new();
    let second = fix_all(&first.statements, &model, &config, &handler, &token).unwrap();

    assert_eq!(second.statements, first.statements);
    assert_eq!(second.fix_count(), 0);
    assert!(handler.get_diagnostics().is_empty());
}

#[test]
fn test_nested_assignments_are_fixed_inside_out() {
    let inner = self_assignment("b", BinaryOp::Add, integer(1));
    let outer = self_assignment("a", BinaryOp::Add, parenthesized(inner));
    assert_eq!(fix(&[expression_statement(outer)]), vec!["a += (++b);"]);
}

#[test]
fn test_assigned_coalesce_of_same_target() {
    let statements = vec![
        expression_statement(self_assignment(
            "n",
            BinaryOp::Coalesce,
            parenthesized(simple_assignment(identifier("n"), integer(1))),
        )),
        expression_statement(self_assignment(
            "o",
            BinaryOp::Coalesce,
            parenthesized(simple_assignment(identifier("o"), identifier("p"))),
        )),
    ];

    let (fixed, diagnostics) = fix_with_config(&statements, &OpgenConfig::default());
    assert_eq!(fixed, vec!["n ??= 1;", "o ??= p;"]);
    assert_eq!(diagnostics.len(), 2);

    let config = OpgenConfig {
        language_version: LanguageVersion::V7_3,
        ..OpgenConfig::default()
    };
    let (fixed, diagnostics) = fix_with_config(&statements, &config);
    assert_eq!(fixed, vec!["n = n ?? (n = 1);", "o = o ?? (o = p);"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_coalesce_into_slot_of_same_type_has_no_cast() {
    let coalesce = || coalesce_assignment(identifier("n"), identifier("n"), integer(1));
    let statements = vec![
        expression_statement(simple_assignment(identifier("m"), coalesce())),
        return_statement(Some(coalesce())),
    ];

    let mut model = sample_model();
    model.add_local("m", int_nullable());
    model.set_return_type(int_nullable());
    let (fixed, _) = fix_with_model(&statements, &model, &OpgenConfig::default());
    assert_eq!(fixed, vec!["m = n ??= 1;", "return n ??= 1;"]);

    // Without a declared return type the original type is kept explicitly
    let (fixed, _) = fix_with_model(&statements[1..], &sample_model(), &OpgenConfig::default());
    assert_eq!(fixed, vec!["return (int?)(n ??= 1);"]);
}

#[test]
fn test_array_elements_with_plain_indices() {
    let mut model = sample_model();
    model.add_local("arr", TypeRef::Array(Box::new(TypeRef::int())));
    let element = |index: Expr| element_access(identifier("arr"), vec![argument(RefKind::None, index)]);
    let self_update = |index: Expr, operand: Expr| {
        expression_statement(simple_assignment(
            element(index.clone()),
            binary(BinaryOp::Add, element(index), operand),
        ))
    };

    let statements = vec![
        self_update(integer(0), integer(10)),
        self_update(identifier("a"), integer(1)),
        self_update(
            invocation(member_access(this_expression(), "Goo"), vec![]),
            integer(10),
        ),
    ];
    let (fixed, _) = fix_with_model(&statements, &model, &OpgenConfig::default());
    assert_eq!(
        fixed,
        vec![
            "arr[0] += 10;",
            "arr[a]++;",
            "arr[this.Goo()] = arr[this.Goo()] + 10;",
        ]
    );
}

#[test]
fn test_unrelated_code_is_kept() {
    let statements = vec![
        expression_statement(simple_assignment(
            identifier("a"),
            binary(BinaryOp::Add, identifier("b"), integer(1)),
        )),
        expression_statement(invocation(
            identifier("N"),
            vec![argument(RefKind::None, identifier("n"))],
        )),
    ];
    assert_eq!(fix(&statements), vec!["a = b + 1;", "N(n);"]);
}

#[test]
fn test_severity_per_rule() {
    let mut config = OpgenConfig::default();
    config.prefer_compound_assignment.severity = Severity::Warning;
    config.prefer_coalesce_assignment.severity = Severity::Silent;

    let (fixed, diagnostics) = fix_with_config(&sample_statements(), &config);
    assert!(fixed.contains(&"o ??= p;".to_string()));
    assert_eq!(diagnostics.len(), 3);
    assert!(diagnostics
        .iter()
        .all(|d| d.level == DiagnosticLevel::Warning && d.code == codes::USE_COMPOUND_ASSIGNMENT));
}

#[test]
fn test_disabled_rule_is_not_applied() {
    let mut config = OpgenConfig::default();
    config.prefer_coalesce_assignment.enabled = false;

    let (fixed, diagnostics) = fix_with_config(&sample_statements(), &config);
    assert_eq!(fixed[0], "a += 10;");
    assert!(fixed[2].starts_with("if (o == null)"), "{}", fixed[2]);
    assert_eq!(fixed[3], "M(n ?? (n = 1));");
    assert!(diagnostics
        .iter()
        .all(|d| d.code == codes::USE_COMPOUND_ASSIGNMENT));
}

#[test]
fn test_yaml_config_gates_coalesce_assignment() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("opgen.yaml");
    fs::write(
        &path,
        indoc! {r#"
            languageVersion: "7.3"
            preferCompoundAssignment:
              severity: error
        "#},
    )
    .unwrap();

    let config = OpgenConfig::load(&path).unwrap();
    assert_eq!(config.language_version, LanguageVersion::V7_3);

    let model = sample_model();
    let handler = CollectingDiagnosticHandler::new();
    let outcome = fix_all(
        &sample_statements(),
        &model,
        &config,
        &handler,
        &CancellationToken::new(),
    )
    .unwrap();

    let fixed = render(&outcome.statements);
    assert!(fixed.iter().all(|line| !line.contains("??=")));
    assert_eq!(outcome.fixes.get(codes::USE_COALESCE_COMPOUND_ASSIGNMENT), None);
    assert_eq!(handler.error_count(), 3);
}

#[test]
fn test_cancelled_run_returns_no_result() {
    let model = sample_model();
    let handler = CollectingDiagnosticHandler::new();
    let token = CancellationToken::new();
    token.clone().cancel();

    let result = fix_all(
        &sample_statements(),
        &model,
        &OpgenConfig::default(),
        &handler,
        &token,
    );
    assert_eq!(result, Err(FixAllError::Cancelled));
    assert!(handler.get_diagnostics().is_empty());
}

#[test]
fn test_concurrent_runs_share_one_model() {
    let model = sample_model();
    let config = OpgenConfig::default();

    let results: Vec<Vec<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let handler = CollectingDiagnosticHandler::new();
                    let outcome = fix_all(
                        &sample_statements(),
                        &model,
                        &config,
                        &handler,
                        &CancellationToken::new(),
                    )
                    .unwrap();
                    render(&outcome.statements)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in &results {
        assert_eq!(result, &results[0]);
    }
}
