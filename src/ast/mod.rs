//! Abstract Syntax Tree for the minterp language
//!
//! This module defines the AST types produced by the parser. The node set is
//! closed: every statement and expression kind is a variant here and the
//! evaluator matches on it exhaustively.
//!
//! Operator chains are stored flat, in source order, so that evaluation is a
//! left fold: `a - b - c` is `first = a, rest = [(-, b), (-, c)]`.

use crate::common::Span;
use crate::lexer::TokenKind;
use serde::{Deserialize, Serialize};

/// Top-level AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub block: Block,
}

/// A non-empty sequence of statements separated by `;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

// ==================== STATEMENTS ====================

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// `id = expr`
    Assign {
        name: String,
        value: Expr,
        span: Span,
    },
    /// `wr expr` or `wr expr relop expr`
    Write { value: Operand, span: Span },
    /// `if cond then stmt [else stmt]`
    If {
        cond: BoolExpr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        span: Span,
    },
    /// `while cond do stmt`
    While {
        cond: BoolExpr,
        body: Box<Stmt>,
        span: Span,
    },
    /// `begin block end`
    Compound { block: Block, span: Span },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign { span, .. }
            | Stmt::Write { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::Compound { span, .. } => *span,
        }
    }
}

/// Value written by `wr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Expr(Expr),
    Compare(BoolExpr),
}

// ==================== EXPRESSIONS ====================

/// `left relop right`, evaluating to exactly 1.0 or 0.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolExpr {
    pub left: Expr,
    pub op: OpNode<RelOp>,
    pub right: Expr,
}

/// Additive chain of terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub first: Term,
    pub rest: Vec<(OpNode<AddOp>, Term)>,
}

impl Expr {
    pub fn span(&self) -> Span {
        self.rest
            .last()
            .map_or(self.first.span(), |(_, t)| self.first.span().merge(t.span()))
    }
}

/// Multiplicative chain of signed factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub first: SignedFactor,
    pub rest: Vec<(OpNode<MulOp>, SignedFactor)>,
}

impl Term {
    pub fn span(&self) -> Span {
        self.rest
            .last()
            .map_or(self.first.span, |(_, f)| self.first.span.merge(f.span))
    }
}

/// Factor with an optional leading unary minus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedFactor {
    pub negative: bool,
    pub factor: Factor,
    pub span: Span,
}

/// Smallest evaluable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Factor {
    Identifier { name: String, span: Span },
    /// Numeric literal, kept as written and parsed at evaluation time
    Literal { text: String, span: Span },
    Paren(Box<Expr>),
}

// ==================== OPERATORS ====================

/// Operator symbol together with its source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpNode<K> {
    pub kind: K,
    pub span: Span,
}

impl<K> OpNode<K> {
    pub fn new(kind: K, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddOp {
    Add,
    Sub,
}

impl AddOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(AddOp::Add),
            TokenKind::Minus => Some(AddOp::Sub),
            _ => None,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            AddOp::Add => lhs + rhs,
            AddOp::Sub => lhs - rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MulOp {
    Mul,
    Div,
}

impl MulOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Star => Some(MulOp::Mul),
            TokenKind::Slash => Some(MulOp::Div),
            _ => None,
        }
    }

    /// IEEE-754 semantics; division by zero yields infinity or NaN
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            MulOp::Mul => lhs * rhs,
            MulOp::Div => lhs / rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelOp {
    Lt,
    Le,
    Gt,
    Ge,
    /// `<>`
    Ne,
    /// `==`
    Eq,
}

impl RelOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Lt => Some(RelOp::Lt),
            TokenKind::Le => Some(RelOp::Le),
            TokenKind::Gt => Some(RelOp::Gt),
            TokenKind::Ge => Some(RelOp::Ge),
            TokenKind::Ne => Some(RelOp::Ne),
            TokenKind::EqEq => Some(RelOp::Eq),
            _ => None,
        }
    }

    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            RelOp::Lt => lhs < rhs,
            RelOp::Le => lhs <= rhs,
            RelOp::Gt => lhs > rhs,
            RelOp::Ge => lhs >= rhs,
            RelOp::Ne => lhs != rhs,
            RelOp::Eq => lhs == rhs,
        }
    }

    /// 1.0 when the relation holds, 0.0 otherwise
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        if self.holds(lhs, rhs) { 1.0 } else { 0.0 }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
            RelOp::Ne => "<>",
            RelOp::Eq => "==",
        }
    }
}
