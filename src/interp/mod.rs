//! Tree-walking interpreter for the AST
//!
//! Executes a parsed [`Program`](crate::ast::Program) against an
//! [`Environment`], collecting the values written by `wr`.

pub mod env;
pub mod eval;

pub use env::Environment;
pub use eval::{Evaluator, evaluate};

/// Render written values one per line
///
/// Integral values print without a fractional part (`5`, not `5.0`).
pub fn format_output(values: &[f64]) -> String {
    values.iter().map(|v| format!("{}\n", v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_output() {
        assert_eq!(format_output(&[5.0, 0.5, -2.0]), "5\n0.5\n-2\n");
        assert_eq!(format_output(&[]), "");
    }
}
