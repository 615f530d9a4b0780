//! minterp CLI
//!
//! Main entry point for the `minterp` command.

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use minterp::harness::{self, Verdict};
use minterp::{SourceFile, format_output};

#[derive(Parser)]
#[command(name = "minterp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for a tiny floating-point imperative language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program and print everything it writes
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Parse a program without running it
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show the parsed AST as JSON
        #[arg(long)]
        show_ast: bool,

        /// Show the token stream
        #[arg(long)]
        show_tokens: bool,
    },

    /// Run every `prg`/`exp` fixture directory under DIR
    Test {
        /// Fixture root
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Start the interactive REPL
    Repl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { input } => run(&input),
        Commands::Check {
            input,
            show_ast,
            show_tokens,
        } => check(&input, show_ast, show_tokens),
        Commands::Test { dir } => test(&dir),
        Commands::Repl => minterp::repl::start(),
    }
}

fn read_source(input: &Path) -> Result<SourceFile> {
    let content = std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))?;
    Ok(SourceFile::new(input.display().to_string(), content))
}

fn run(input: &Path) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let source = read_source(input)?;
    let env = minterp::run_file(&source)?;
    print!("{}", format_output(env.output()));
    Ok(())
}

fn check(input: &Path, show_ast: bool, show_tokens: bool) -> Result<()> {
    tracing::info!("Checking {:?}", input);

    let source = read_source(input)?;

    if show_tokens {
        println!("=== Tokens ===");
        for token in minterp::lexer::lex(&source.content) {
            println!("  {:>5}  {}", token.span.start, token);
        }
        println!();
    }

    let (program, warnings) = minterp::parser::parse_with_diagnostics(&source.name, &source.content);
    for warning in warnings {
        eprintln!(
            "{:?}",
            miette::Report::new(warning).with_source_code(source.to_named_source())
        );
    }
    let program = program?;

    if show_ast {
        println!("=== AST ===");
        let json = serde_json::to_string_pretty(&program).into_diagnostic()?;
        println!("{}", json);
        println!();
    }

    println!("Parsed {} ({} statements)", input.display(), program.block.len());
    Ok(())
}

fn test(dir: &Path) -> Result<()> {
    let fixtures = harness::load_fixtures(dir)?;
    let mut failed = 0;

    for fixture in &fixtures {
        println!("==================================================");
        println!("TESTING DIRECTORY {}", fixture.dir.display());

        let outcome = fixture.run();
        match &outcome.verdict {
            Verdict::Pass => {
                println!("SUCCESS!");
                println!("Output:");
                println!("{}", outcome.actual);
            }
            Verdict::Mismatch => {
                failed += 1;
                println!("FAIL! Output doesn't match expected.");
                println!("Output:");
                println!("{}", outcome.actual);
                println!("--------------------:");
                println!("Expected:");
                println!("{}", outcome.expected);
            }
            Verdict::Failed(rendered) => {
                failed += 1;
                println!("FAIL! Program did not complete.");
                eprintln!("{}", rendered);
            }
        }
    }

    println!(
        "{} passed, {} failed",
        fixtures.len() - failed,
        failed
    );
    if failed > 0 {
        return Err(miette::miette!("{} of {} fixtures failed", failed, fixtures.len()));
    }
    Ok(())
}
