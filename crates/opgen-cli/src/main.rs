use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use opgen_core::{
    fix_all, CancellationToken, CliOverrides, CollectingDiagnosticHandler,
    ConsoleDiagnosticHandler, DeclarationModel, Diagnostic, DiagnosticHandler, LanguageVersion,
    Operation, OpgenConfig, OpgenError, Severity, Stmt, SyntaxGenerator, SyntaxNode, SyntaxRole,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "opgen.json";

/// opgen - Operation IR to syntax generation and compound-assignment fixes
#[derive(Parser, Debug)]
#[command(name = "opgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Highlight diagnostic levels
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render JSON operation trees as source text
    Generate {
        /// JSON files holding one operation or an array of operations
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Syntactic role requested for each top-level operation
        #[arg(long, value_enum, default_value_t = RoleArg::Unspecified)]
        role: RoleArg,
    },

    /// Apply compound-assignment fixes to JSON documents
    Fix {
        /// JSON documents of the form { "model": ..., "statements": [...] }
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Path to an opgen.json / opgen.yaml configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Language version of the rewritten code (7.3, 8, ..., 12, latest)
        #[arg(long, value_name = "VERSION")]
        language_version: Option<LanguageVersion>,

        /// Severity for both rules, overriding the configuration file
        #[arg(long, value_enum)]
        severity: Option<SeverityArg>,
    },

    /// Write a default configuration file
    Init {
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum RoleArg {
    Unspecified,
    Statement,
    Expression,
}

impl From<RoleArg> for SyntaxRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Unspecified => SyntaxRole::Unspecified,
            RoleArg::Statement => SyntaxRole::Statement,
            RoleArg::Expression => SyntaxRole::Expression,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SeverityArg {
    Silent,
    Suggestion,
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(severity: SeverityArg) -> Self {
        match severity {
            SeverityArg::Silent => Severity::Silent,
            SeverityArg::Suggestion => Severity::Suggestion,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OperationInput {
    Many(Vec<Operation>),
    One(Box<Operation>),
}

/// Input of `opgen fix`
#[derive(Deserialize)]
struct FixDocument {
    #[serde(default)]
    model: DeclarationModel,
    statements: Vec<Stmt>,
}

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug for detailed logs
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let succeeded = match cli.command {
        Command::Generate { files, role } => generate(&files, role.into())?,
        Command::Fix {
            files,
            config,
            language_version,
            severity,
        } => {
            let overrides = CliOverrides {
                language_version,
                severity: severity.map(Severity::from),
            };
            let config = load_config(config.as_deref(), &overrides)?;
            fix(&files, &config, cli.pretty)?
        }
        Command::Init { path } => {
            init_config(&path)?;
            true
        }
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

fn init_config(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    OpgenConfig::init_file(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Explicit `--config`, else `opgen.json` in the working directory, else
/// defaults; command-line overrides apply last
fn load_config(path: Option<&Path>, overrides: &CliOverrides) -> anyhow::Result<OpgenConfig> {
    let mut config = match path {
        Some(path) => OpgenConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            debug!("Using {}", DEFAULT_CONFIG_FILE);
            OpgenConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => OpgenConfig::default(),
    };
    config.merge_with_cli(overrides);
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

// =============================================================================
// generate
// =============================================================================

fn generate(files: &[PathBuf], role: SyntaxRole) -> anyhow::Result<bool> {
    let generator = SyntaxGenerator::new();
    let mut succeeded = true;

    for path in files {
        match generate_file(&generator, path, role) {
            Ok(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(err) => {
                eprintln!("error: {}: {:#}", path.display(), err);
                succeeded = false;
            }
        }
    }
    Ok(succeeded)
}

fn generate_file(
    generator: &SyntaxGenerator,
    path: &Path,
    role: SyntaxRole,
) -> anyhow::Result<Vec<String>> {
    let text = read(path)?;
    let operations = match serde_json::from_str::<OperationInput>(&text).map_err(OpgenError::from)? {
        OperationInput::Many(operations) => operations,
        OperationInput::One(operation) => vec![*operation],
    };

    let mut lines = Vec::with_capacity(operations.len());
    for operation in operations {
        let node = generator
            .generate(Some(operation), role)
            .map_err(OpgenError::from)?;
        match node {
            Some(SyntaxNode::Statement(stmt)) => lines.push(stmt.to_string()),
            Some(SyntaxNode::Expression(expr)) => lines.push(expr.to_string()),
            Some(SyntaxNode::Argument(argument)) => lines.push(argument.to_string()),
            None => debug!("{}: operation produced no syntax", path.display()),
        }
    }
    Ok(lines)
}

// =============================================================================
// fix
// =============================================================================

struct FixedFile {
    statements: Vec<Stmt>,
    diagnostics: Vec<Diagnostic>,
}

fn fix(files: &[PathBuf], config: &OpgenConfig, pretty: bool) -> anyhow::Result<bool> {
    use rayon::prelude::*;

    info!(
        "Fixing {} file(s) for language version {}",
        files.len(),
        config.language_version
    );

    let cancellation = CancellationToken::new();
    let results: Vec<(&PathBuf, anyhow::Result<FixedFile>)> = files
        .par_iter()
        .map(|path| (path, fix_file(path, config, &cancellation)))
        .collect();

    let console = ConsoleDiagnosticHandler::new(pretty);
    let mut succeeded = true;
    for (path, result) in results {
        match result {
            Ok(fixed) => {
                if files.len() > 1 {
                    println!("// {}", path.display());
                }
                for statement in &fixed.statements {
                    println!("{}", statement);
                }
                for diagnostic in fixed.diagnostics {
                    console.report(diagnostic);
                }
            }
            Err(err) => {
                warn!("Skipping {}", path.display());
                eprintln!("error: {}: {:#}", path.display(), err);
                succeeded = false;
            }
        }
    }

    Ok(succeeded && !console.has_errors())
}

fn fix_file(
    path: &Path,
    config: &OpgenConfig,
    cancellation: &CancellationToken,
) -> anyhow::Result<FixedFile> {
    let text = read(path)?;
    let document: FixDocument = serde_json::from_str(&text).map_err(OpgenError::from)?;

    let handler = CollectingDiagnosticHandler::new();
    let outcome = fix_all(
        &document.statements,
        &document.model,
        config,
        &handler,
        cancellation,
    )
    .map_err(OpgenError::from)?;
    debug!("{}: {} fix(es)", path.display(), outcome.fix_count());

    Ok(FixedFile {
        statements: outcome.statements,
        diagnostics: handler.get_diagnostics(),
    })
}
