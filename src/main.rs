//! CLI tool to tokenize, check, and translate Java sources to Python.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use javabridge::{Analysis, TranslateOptions};

#[derive(Debug, Parser)]
#[command(name = "javabridge", version, about = "Translate a subset of Java to Python")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the tokens and lexical errors of each file
    Tokens {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Report lexical and syntax errors
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the Python translation of each file
    Translate {
        /// Spaces per indentation level
        #[arg(long, default_value_t = 4)]
        indent: usize,
        /// Prepend a banner comment
        #[arg(long)]
        header: bool,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print a JSON report with tokens, errors, declarations, and output
    Analyze {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();
    let (files, options) = match &cli.command {
        Command::Tokens { files } | Command::Check { files } | Command::Analyze { files } => {
            (files, TranslateOptions::default())
        }
        Command::Translate {
            indent,
            header,
            files,
        } => (
            files,
            TranslateOptions::new()
                .with_indent_width(*indent)
                .with_header(*header),
        ),
    };

    let mut had_error = false;

    for path in files {
        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                had_error = true;
                continue;
            }
        };

        let analysis = javabridge::analyze_with(&source, &options);
        let ok = match cli.command {
            Command::Tokens { .. } => print_tokens(path, &analysis),
            Command::Check { .. } => check(path, &analysis),
            Command::Translate { .. } => {
                report(path, &analysis);
                println!("{}", analysis.python);
                analysis.success
            }
            Command::Analyze { .. } => match serde_json::to_string_pretty(&analysis) {
                Ok(json) => {
                    println!("{json}");
                    analysis.success
                }
                Err(e) => {
                    eprintln!("{}: {e}", path.display());
                    false
                }
            },
        };
        had_error |= !ok;
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_tokens(path: &Path, analysis: &Analysis) -> bool {
    println!("{}:", path.display());
    for token in &analysis.tokens {
        let span = format!("{}:{}", token.span.line, token.span.column);
        println!("  {span:<8} {:<14} {}", format!("{:?}", token.kind), token.text);
    }
    for error in &analysis.lexical_errors {
        eprintln!("{}: {error}", path.display());
    }
    analysis.lexical_errors.is_empty()
}

fn check(path: &Path, analysis: &Analysis) -> bool {
    if analysis.success {
        eprintln!(
            "{}: ok ({} statement(s), {} declaration(s))",
            path.display(),
            analysis.program.body.len(),
            analysis.declarations.len()
        );
    } else {
        report(path, analysis);
    }
    analysis.success
}

fn report(path: &Path, analysis: &Analysis) {
    for diagnostic in analysis.diagnostics() {
        eprintln!("{}: {diagnostic}", path.display());
    }
}
