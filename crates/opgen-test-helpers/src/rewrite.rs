//! Shorthands for running the generator and fix-all in tests

use crate::fixtures::sample_model;
use opgen_core::syntax::Stmt;
use opgen_core::{
    fix_all, CancellationToken, CollectingDiagnosticHandler, Diagnostic, DiagnosticHandler,
    GenerateError, Operation, OpgenConfig, SemanticModel, SyntaxGenerator, SyntaxRole,
};

/// Fix `statements` against [`sample_model`] with the default configuration
pub fn fix(statements: &[Stmt]) -> Vec<String> {
    fix_with_config(statements, &OpgenConfig::default()).0
}

/// Fix `statements` against [`sample_model`], returning the rendered
/// statements and the reported diagnostics
pub fn fix_with_config(statements: &[Stmt], config: &OpgenConfig) -> (Vec<String>, Vec<Diagnostic>) {
    fix_with_model(statements, &sample_model(), config)
}

pub fn fix_with_model(
    statements: &[Stmt],
    model: &dyn SemanticModel,
    config: &OpgenConfig,
) -> (Vec<String>, Vec<Diagnostic>) {
    let handler = CollectingDiagnosticHandler::new();
    match fix_all(statements, model, config, &handler, &CancellationToken::new()) {
        Ok(outcome) => (
            outcome.statements.iter().map(ToString::to_string).collect(),
            handler.get_diagnostics(),
        ),
        Err(err) => panic!("fix-all failed: {}", err),
    }
}

/// Generate `operation` in `role` and render the result
pub fn generate(operation: Operation, role: SyntaxRole) -> Result<Option<String>, GenerateError> {
    Ok(SyntaxGenerator::new()
        .generate(Some(operation), role)?
        .map(|node| node.to_string()))
}
