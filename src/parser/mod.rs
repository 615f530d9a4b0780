//! Parser for the minterp language
//!
//! A recursive descent parser that pulls tokens from the [`Lexer`] one at a
//! time. One token of lookahead, no backtracking, no error recovery: the
//! first mismatch aborts the parse.
//!
//! ```text
//! Program      := Block <eof>
//! Block        := Statement (';' Statement)*
//! Statement    := id '=' Expr
//!               | 'wr' Expr (RelOp Expr)?
//!               | 'if' BoolExpr 'then' Statement ('else' Statement)?
//!               | 'while' BoolExpr 'do' Statement
//!               | 'begin' Block 'end'
//! BoolExpr     := Expr RelOp Expr
//! Expr         := Term (('+' | '-') Term)*
//! Term         := SignedFactor (('*' | '/') SignedFactor)*
//! SignedFactor := '-'? Factor
//! Factor       := id | dbl | '(' Expr ')'
//! ```

use crate::ast::*;
use crate::common::Span;
use crate::diagnostics::{Expected, IllegalCharacter, InterpError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use miette::NamedSource;

/// Name used for the source in diagnostics when none is given
pub const DEFAULT_SOURCE_NAME: &str = "<input>";

/// Parse program text into an AST
///
/// Illegal characters are logged and skipped; use
/// [`parse_with_diagnostics`] to inspect them.
pub fn parse(source: &str) -> Result<Program> {
    parse_with_diagnostics(DEFAULT_SOURCE_NAME, source).0
}

/// Parse program text, also returning every illegal character the lexer
/// skipped, whether or not the parse succeeded
pub fn parse_with_diagnostics(
    name: &str,
    source: &str,
) -> (Result<Program>, Vec<IllegalCharacter>) {
    let mut parser = Parser::new(name, source);
    let program = parser.parse_program();
    (program, parser.lexer.into_diagnostics())
}

/// Parser state
struct Parser<'src> {
    name: &'src str,
    lexer: Lexer<'src>,
    /// Span of the most recently consumed token
    last: Span,
}

impl<'src> Parser<'src> {
    fn new(name: &'src str, source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        lexer.advance();
        Self {
            name,
            lexer,
            last: Span::point(0),
        }
    }

    fn current(&self) -> &Token {
        self.lexer.current()
    }

    fn peek(&self) -> TokenKind {
        self.lexer.peek()
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        self.last = tok.span;
        self.lexer.advance();
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(Expected::Token(kind)))
        }
    }

    fn error(&self, expected: Expected) -> InterpError {
        let tok = self.current();
        InterpError::Syntax {
            expected,
            found: tok.kind,
            lexeme: tok.text.clone(),
            position: tok.span.start,
            span: tok.span.into(),
            src: NamedSource::new(self.name, self.lexer.source().to_string()),
        }
    }

    /// Span from `start` to the end of the last consumed token
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.last)
    }

    // ==================== PROGRAM ====================

    fn parse_program(&mut self) -> Result<Program> {
        let block = self.parse_block()?;
        self.expect(TokenKind::Eof)?;
        tracing::debug!("Parsed {} top-level statements", block.len());
        Ok(Program { block })
    }

    fn parse_block(&mut self) -> Result<Block> {
        let start = self.current().span;
        let mut stmts = vec![self.parse_stmt()?];
        while self.at(TokenKind::Semi) {
            self.advance();
            stmts.push(self.parse_stmt()?);
        }
        Ok(Block {
            stmts,
            span: self.span_from(start),
        })
    }

    // ==================== STATEMENTS ====================

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.peek() {
            TokenKind::Wr => self.parse_write(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Begin => self.parse_compound(),
            _ => self.parse_assign(),
        }
    }

    fn parse_assign(&mut self) -> Result<Stmt> {
        let id = self.expect(TokenKind::Id)?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        Ok(Stmt::Assign {
            name: id.text,
            value,
            span: self.span_from(id.span),
        })
    }

    fn parse_write(&mut self) -> Result<Stmt> {
        let start = self.expect(TokenKind::Wr)?.span;
        let left = self.parse_expr()?;
        let value = match RelOp::from_token(self.peek()) {
            Some(op) => {
                let op_span = self.advance().span;
                let right = self.parse_expr()?;
                Operand::Compare(BoolExpr {
                    left,
                    op: OpNode::new(op, op_span),
                    right,
                })
            }
            None => Operand::Expr(left),
        };
        Ok(Stmt::Write {
            value,
            span: self.span_from(start),
        })
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        let start = self.expect(TokenKind::If)?.span;
        let cond = self.parse_bool_expr()?;
        self.expect(TokenKind::Then)?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.at(TokenKind::Else) {
            self.advance();
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
            span: self.span_from(start),
        })
    }

    fn parse_while(&mut self) -> Result<Stmt> {
        let start = self.expect(TokenKind::While)?.span;
        let cond = self.parse_bool_expr()?;
        self.expect(TokenKind::Do)?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::While {
            cond,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_compound(&mut self) -> Result<Stmt> {
        let start = self.expect(TokenKind::Begin)?.span;
        let block = self.parse_block()?;
        self.expect(TokenKind::End)?;
        Ok(Stmt::Compound {
            block,
            span: self.span_from(start),
        })
    }

    // ==================== EXPRESSIONS ====================

    fn parse_bool_expr(&mut self) -> Result<BoolExpr> {
        let left = self.parse_expr()?;
        let Some(op) = RelOp::from_token(self.peek()) else {
            return Err(self.error(Expected::RelOp));
        };
        let op_span = self.advance().span;
        let right = self.parse_expr()?;
        Ok(BoolExpr {
            left,
            op: OpNode::new(op, op_span),
            right,
        })
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let first = self.parse_term()?;
        let mut rest = Vec::new();
        while let Some(op) = AddOp::from_token(self.peek()) {
            let span = self.advance().span;
            rest.push((OpNode::new(op, span), self.parse_term()?));
        }
        Ok(Expr { first, rest })
    }

    fn parse_term(&mut self) -> Result<Term> {
        let first = self.parse_signed_factor()?;
        let mut rest = Vec::new();
        while let Some(op) = MulOp::from_token(self.peek()) {
            let span = self.advance().span;
            rest.push((OpNode::new(op, span), self.parse_signed_factor()?));
        }
        Ok(Term { first, rest })
    }

    fn parse_signed_factor(&mut self) -> Result<SignedFactor> {
        let start = self.current().span;
        let negative = if self.at(TokenKind::Minus) {
            self.advance();
            true
        } else {
            false
        };
        let factor = self.parse_factor()?;
        Ok(SignedFactor {
            negative,
            factor,
            span: self.span_from(start),
        })
    }

    fn parse_factor(&mut self) -> Result<Factor> {
        match self.peek() {
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(Factor::Paren(Box::new(inner)))
            }
            TokenKind::Id => {
                let tok = self.advance();
                Ok(Factor::Identifier {
                    name: tok.text,
                    span: tok.span,
                })
            }
            _ => {
                let tok = self.expect(TokenKind::Dbl)?;
                Ok(Factor::Literal {
                    text: tok.text,
                    span: tok.span,
                })
            }
        }
    }
}
