//! minterp: a tiny imperative language over doubles
//!
//! A flat-scoped, floating-point-only language with assignment, `wr`
//! (write), `if`/`then`/`else`, `while`/`do` and `begin`/`end` blocks.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer (pulled on demand) → Parser → AST → Evaluator → Environment
//! ```
//!
//! # Example
//!
//! ```
//! let mut env = minterp::Environment::new();
//! let program = minterp::parse("x = 0; while x < 3 do begin wr x; x = x + 1 end").unwrap();
//! minterp::evaluate(&program, &mut env).unwrap();
//! assert_eq!(env.output(), &[0.0, 1.0, 2.0]);
//! ```

pub mod ast;
pub mod common;
pub mod diagnostics;
pub mod harness;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

// Re-export diagnostics for convenience
pub use diagnostics::{Expected, IllegalCharacter, InterpError, Result, SourceFile};

// Re-exports for convenience
pub use ast::Program;
pub use interp::{Environment, evaluate, format_output};
pub use parser::parse;

/// Interpreter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse and run `source` in a fresh environment
///
/// Runtime errors carry the source text so their labels render.
pub fn run(source: &str) -> miette::Result<Environment> {
    run_file(&SourceFile::new(parser::DEFAULT_SOURCE_NAME, source))
}

/// Parse and run a named source in a fresh environment
pub fn run_file(file: &SourceFile) -> miette::Result<Environment> {
    let mut env = Environment::new();
    run_in(file, &mut env)?;
    Ok(env)
}

/// Parse and run a named source against an existing environment,
/// returning the program's value
pub fn run_in(file: &SourceFile, env: &mut Environment) -> miette::Result<f64> {
    let (program, _) = parser::parse_with_diagnostics(&file.name, &file.content);
    let program = program?;
    evaluate(&program, env)
        .map_err(|e| miette::Report::new(e).with_source_code(file.to_named_source()))
}
