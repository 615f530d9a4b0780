//! Diagnostic reporting with source locations
//!
//! Fatal conditions are variants of [`InterpError`]; illegal characters are
//! recoverable and surface as [`IllegalCharacter`] warnings instead.

use crate::common::Span;
use crate::lexer::TokenKind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::num::ParseFloatError;
use std::sync::Arc;
use thiserror::Error;

/// Source file for error reporting
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: Arc<str>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.to_string())
    }
}

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// What the parser was looking for when it gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    RelOp,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "`{}`", kind),
            Expected::RelOp => write!(f, "a relational operator"),
        }
    }
}

/// Result alias used throughout the front end and evaluator
pub type Result<T, E = InterpError> = std::result::Result<T, E>;

/// Parse and evaluation failures
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum InterpError {
    // === Parse Errors ===
    #[error("Unexpected token `{lexeme}` at position {position}: expected {expected}, found `{found}`")]
    #[diagnostic(code(parse::unexpected_token))]
    Syntax {
        expected: Expected,
        found: TokenKind,
        lexeme: String,
        position: usize,
        #[label("expected {expected} here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    // === Runtime Errors ===
    #[error("Undefined variable `{name}` at position {position}")]
    #[diagnostic(
        code(eval::undefined_variable),
        help("assign `{name}` before reading it")
    )]
    UndefinedVariable {
        name: String,
        position: usize,
        #[label("never assigned")]
        span: SourceSpan,
    },

    #[error("Malformed number literal `{text}` at position {position}")]
    #[diagnostic(code(eval::number_format))]
    NumberFormat {
        text: String,
        position: usize,
        #[label("not a floating-point value")]
        span: SourceSpan,
        #[source]
        source: ParseFloatError,
    },
}

impl InterpError {
    /// Byte offset the error refers to
    pub fn position(&self) -> usize {
        match self {
            InterpError::Syntax { position, .. }
            | InterpError::UndefinedVariable { position, .. }
            | InterpError::NumberFormat { position, .. } => *position,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, InterpError::Syntax { .. })
    }
}

/// A character the lexer could not start any token with
///
/// Reported and skipped; scanning continues with the next character.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("illegal character {ch:?} at position {position}")]
#[diagnostic(code(lex::illegal_character), severity(Warning))]
pub struct IllegalCharacter {
    pub ch: char,
    pub position: usize,
    #[label("skipped")]
    pub span: SourceSpan,
}

impl IllegalCharacter {
    pub fn new(ch: char, span: Span) -> Self {
        Self {
            ch,
            position: span.start,
            span: span.into(),
        }
    }
}
