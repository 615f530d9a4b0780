//! Directory-driven program fixtures
//!
//! Each sub-directory of a fixture root holds a `prg` file (the program) and
//! an `exp` file (expected output, one value per line). A case passes when
//! the program's formatted output equals `exp`, both trimmed.

use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::diagnostics::SourceFile;
use crate::interp::{Environment, evaluate, format_output};
use crate::parser;

pub const PROGRAM_FILE: &str = "prg";
pub const EXPECTED_FILE: &str = "exp";

#[derive(Error, Debug, Diagnostic)]
pub enum FixtureError {
    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(harness::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Fixture directory {} has no `prg`/`exp` pair", dir.display())]
    #[diagnostic(code(harness::missing_files))]
    MissingFiles { dir: PathBuf },
}

/// One program together with its expected output
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: String,
    pub dir: PathBuf,
    pub program: String,
    pub expected: String,
}

/// Result of running one fixture
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Pass,
    Mismatch,
    /// Parse or runtime failure, rendered
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub name: String,
    pub actual: String,
    pub expected: String,
    pub verdict: Verdict,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

fn read(path: &Path) -> Result<String, FixtureError> {
    fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every fixture under `root`, sorted by directory name
pub fn load_fixtures(root: &Path) -> Result<Vec<Fixture>, FixtureError> {
    let entries = fs::read_dir(root).map_err(|source| FixtureError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| FixtureError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();

    dirs.into_iter().map(|dir| Fixture::load(&dir)).collect()
}

impl Fixture {
    pub fn load(dir: &Path) -> Result<Self, FixtureError> {
        let prg = dir.join(PROGRAM_FILE);
        let exp = dir.join(EXPECTED_FILE);
        if !prg.is_file() || !exp.is_file() {
            return Err(FixtureError::MissingFiles {
                dir: dir.to_path_buf(),
            });
        }
        Ok(Fixture {
            name: dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            dir: dir.to_path_buf(),
            program: read(&prg)?,
            expected: read(&exp)?,
        })
    }

    /// Run the trimmed program in a fresh environment and compare output
    pub fn run(&self) -> Outcome {
        let source = SourceFile::new(
            self.dir.join(PROGRAM_FILE).display().to_string(),
            self.program.trim(),
        );
        let mut env = Environment::new();
        let (program, _) = parser::parse_with_diagnostics(&source.name, &source.content);
        let result = program.and_then(|program| evaluate(&program, &mut env));

        let actual = format_output(env.output());
        let verdict = match result {
            Err(e) => Verdict::Failed(format!(
                "{:?}",
                miette::Report::new(e).with_source_code(source.to_named_source())
            )),
            Ok(_) if actual.trim() == self.expected.trim() => Verdict::Pass,
            Ok(_) => Verdict::Mismatch,
        };
        tracing::debug!("fixture {}: {:?}", self.name, verdict);

        Outcome {
            name: self.name.clone(),
            actual,
            expected: self.expected.clone(),
            verdict,
        }
    }
}
