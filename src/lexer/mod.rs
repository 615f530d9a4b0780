//! Lexer for the minterp language
//!
//! Token recognition is generated by logos; this module wraps it in a
//! pull-based scanner with a single current token, which is what the parser
//! drives. Characters that cannot start a token are reported and skipped.

mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::Span;
use crate::diagnostics::IllegalCharacter;
use logos::Logos;

/// Pull-based scanner holding one token of lookahead
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    current: Token,
    diagnostics: Vec<IllegalCharacter>,
}

impl<'src> Lexer<'src> {
    /// Create a scanner positioned before the first token.
    ///
    /// The current token is the end-of-input sentinel until [`Lexer::advance`]
    /// is called.
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            current: Token::eof(0),
            diagnostics: Vec::new(),
        }
    }

    /// Scan the next token, skipping whitespace and comments.
    ///
    /// Returns false once input is exhausted; the current token is then
    /// [`TokenKind::Eof`].
    pub fn advance(&mut self) -> bool {
        loop {
            match self.inner.next() {
                Some(Ok(kind)) => {
                    self.current = Token::new(kind, self.inner.span().into(), self.inner.slice());
                    return true;
                }
                Some(Err(_)) => self.report_illegal(),
                None => {
                    self.current = Token::eof(self.inner.source().len());
                    return false;
                }
            }
        }
    }

    fn report_illegal(&mut self) {
        let start = self.inner.span().start;
        for (offset, ch) in self.inner.slice().char_indices() {
            let pos = start + offset;
            let diag = IllegalCharacter::new(ch, Span::new(pos, pos + ch.len_utf8()));
            tracing::warn!("{}", diag);
            self.diagnostics.push(diag);
        }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn peek(&self) -> TokenKind {
        self.current.kind
    }

    /// Byte offset where the current token starts
    pub fn position(&self) -> usize {
        self.current.span.start
    }

    pub fn source(&self) -> &'src str {
        self.inner.source()
    }

    /// Illegal characters skipped so far
    pub fn diagnostics(&self) -> &[IllegalCharacter] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<IllegalCharacter> {
        self.diagnostics
    }
}

/// Tokenize a whole program, terminated by an [`TokenKind::Eof`] token
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while lexer.advance() {
        tokens.push(lexer.current().clone());
    }
    tokens.push(lexer.current().clone());
    tracing::debug!("Lexed {} tokens", tokens.len());
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_sentinel() {
        let lexer = Lexer::new("wr 1");
        assert!(lexer.current().is(TokenKind::Eof));
    }

    #[test]
    fn test_advance_reports_exhaustion() {
        let mut lexer = Lexer::new("x");
        assert!(lexer.advance());
        assert_eq!(lexer.current().text, "x");
        assert!(!lexer.advance());
        assert!(lexer.current().is(TokenKind::Eof));
        assert_eq!(lexer.position(), 1);
    }

    #[test]
    fn test_illegal_character_is_skipped() {
        let mut lexer = Lexer::new("a $ b");
        assert!(lexer.advance());
        assert!(lexer.advance());
        assert_eq!(lexer.current().text, "b");
        assert_eq!(lexer.diagnostics().len(), 1);
        assert_eq!(lexer.diagnostics()[0].ch, '$');
        assert_eq!(lexer.diagnostics()[0].position, 2);
    }

    #[test]
    fn test_lex_appends_eof() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }
}
