//! Interactive read-eval-print loop
//!
//! Every input line is a complete program run against one environment that
//! persists for the whole session, so assignments carry over between lines.

use miette::IntoDiagnostic;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::diagnostics::SourceFile;
use crate::interp::Environment;

/// What a single input line produced
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Values written by the line's program
    Output(Vec<f64>),
    /// Current bindings, sorted by name
    Vars(Vec<(String, f64)>),
    Help,
    Quit,
    /// Rendered parse or runtime error
    Error(String),
    Empty,
}

/// REPL state: the shared environment
#[derive(Debug, Default)]
pub struct Session {
    env: Environment,
    line_no: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn eval_line(&mut self, line: &str) -> Reply {
        let trimmed = line.trim();
        match trimmed {
            "" => Reply::Empty,
            ":quit" | ":q" => Reply::Quit,
            ":help" | ":h" => Reply::Help,
            ":vars" => {
                let mut vars: Vec<_> = self
                    .env
                    .variables()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect();
                vars.sort_by(|a, b| a.0.cmp(&b.0));
                Reply::Vars(vars)
            }
            _ => {
                self.line_no += 1;
                let file = SourceFile::new(format!("<repl:{}>", self.line_no), trimmed);
                let result = crate::run_in(&file, &mut self.env);
                // Output written before a runtime error is still reported
                let written = self.env.take_output();
                match result {
                    Ok(_) => Reply::Output(written),
                    Err(report) => Reply::Error(format!("{:?}", report)),
                }
            }
        }
    }
}

/// Run the REPL on the terminal until `:quit` or end of input
pub fn start() -> miette::Result<()> {
    println!("minterp REPL v{}", crate::VERSION);
    println!("Type :help for help, :quit to exit");
    println!();

    let mut editor = DefaultEditor::new().into_diagnostic()?;
    let mut session = Session::new();

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).into_diagnostic(),
        };
        let _ = editor.add_history_entry(line.as_str());

        match session.eval_line(&line) {
            Reply::Empty => {}
            Reply::Quit => break,
            Reply::Help => {
                println!("Commands:");
                println!("  :help, :h    Show this help");
                println!("  :vars        List variable bindings");
                println!("  :quit, :q    Exit the REPL");
                println!();
            }
            Reply::Vars(vars) => {
                for (name, value) in vars {
                    println!("  {} = {}", name, value);
                }
            }
            Reply::Output(values) => print!("{}", crate::format_output(&values)),
            Reply::Error(rendered) => eprintln!("{}", rendered),
        }
    }

    println!("Goodbye!");
    Ok(())
}
