//! Tree-walking evaluator for the AST

use crate::ast::*;
use crate::diagnostics::{InterpError, Result};

use super::env::Environment;

/// Evaluate a program against `env`
///
/// The returned value is that of the last statement executed. Output from
/// `wr` statements accumulates in the environment.
pub fn evaluate(program: &Program, env: &mut Environment) -> Result<f64> {
    Evaluator::new(env).eval_program(program)
}

/// Tree-walking evaluator borrowing an environment for one run
pub struct Evaluator<'env> {
    env: &'env mut Environment,
}

impl<'env> Evaluator<'env> {
    pub fn new(env: &'env mut Environment) -> Self {
        Evaluator { env }
    }

    pub fn eval_program(&mut self, program: &Program) -> Result<f64> {
        self.eval_block(&program.block)
    }

    /// Run each statement in order; the block's value is the last one's
    pub fn eval_block(&mut self, block: &Block) -> Result<f64> {
        let mut result = 0.0;
        for stmt in &block.stmts {
            result = self.eval_stmt(stmt)?;
        }
        Ok(result)
    }

    pub fn eval_stmt(&mut self, stmt: &Stmt) -> Result<f64> {
        match stmt {
            Stmt::Assign { name, value, .. } => {
                let value = self.eval_expr(value)?;
                tracing::trace!("{} = {}", name, value);
                Ok(self.env.put(name.as_str(), value))
            }

            Stmt::Write { value, .. } => {
                let value = match value {
                    Operand::Expr(expr) => self.eval_expr(expr)?,
                    Operand::Compare(cond) => self.eval_bool_expr(cond)?,
                };
                tracing::trace!("wr {}", value);
                self.env.push_output(value);
                Ok(value)
            }

            // `if` and `while` always evaluate to 0.0, whichever branch ran
            Stmt::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                if self.eval_bool_expr(cond)? == 1.0 {
                    self.eval_stmt(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.eval_stmt(else_branch)?;
                }
                Ok(0.0)
            }

            Stmt::While { cond, body, .. } => {
                while self.eval_bool_expr(cond)? == 1.0 {
                    self.eval_stmt(body)?;
                }
                Ok(0.0)
            }

            Stmt::Compound { block, .. } => self.eval_block(block),
        }
    }

    pub fn eval_bool_expr(&mut self, cond: &BoolExpr) -> Result<f64> {
        let lhs = self.eval_expr(&cond.left)?;
        let rhs = self.eval_expr(&cond.right)?;
        Ok(cond.op.kind.apply(lhs, rhs))
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> Result<f64> {
        let mut acc = self.eval_term(&expr.first)?;
        for (op, term) in &expr.rest {
            acc = op.kind.apply(acc, self.eval_term(term)?);
        }
        Ok(acc)
    }

    fn eval_term(&mut self, term: &Term) -> Result<f64> {
        let mut acc = self.eval_signed_factor(&term.first)?;
        for (op, factor) in &term.rest {
            acc = op.kind.apply(acc, self.eval_signed_factor(factor)?);
        }
        Ok(acc)
    }

    fn eval_signed_factor(&mut self, signed: &SignedFactor) -> Result<f64> {
        let value = self.eval_factor(&signed.factor)?;
        Ok(if signed.negative { -value } else { value })
    }

    fn eval_factor(&mut self, factor: &Factor) -> Result<f64> {
        match factor {
            Factor::Identifier { name, span } => self.env.lookup(name, *span),
            Factor::Literal { text, span } => {
                text.parse::<f64>()
                    .map_err(|source| InterpError::NumberFormat {
                        text: text.clone(),
                        position: span.start,
                        span: (*span).into(),
                        source,
                    })
            }
            Factor::Paren(inner) => self.eval_expr(inner),
        }
    }
}
