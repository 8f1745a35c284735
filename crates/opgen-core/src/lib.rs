pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod fix;
pub mod generator;
pub mod ir;
pub mod semantic;
pub mod span;
pub mod symbols;
pub mod syntax;

pub use analyzer::{
    AnalyzerOptions, AssignmentContext, CompoundAssignmentAnalyzer, CompoundCandidate,
    IfNullCandidate, RewriteRule, Verdict,
};
pub use config::{CliOverrides, CodeStyleOption, LanguageVersion, OpgenConfig, Severity};
pub use diagnostics::{
    codes, CollectingDiagnosticHandler, ConsoleDiagnosticHandler, Diagnostic, DiagnosticHandler,
    DiagnosticLevel,
};
pub use errors::{ConfigError, ContractViolation, GenerateError, GenerateResult, OpgenError, Unimplemented};
pub use fix::{fix_all, CancellationToken, CompoundAssignmentFix, FixAllError, FixAllOutcome};
pub use generator::{SyntaxGenerator, SyntaxRole};
pub use ir::{Operation, OperationData, OperationKind};
pub use semantic::{DeclarationModel, SemanticModel};
pub use span::Span;
pub use syntax::{Expr, Stmt, SyntaxNode};
