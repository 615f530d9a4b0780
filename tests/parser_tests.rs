//! Parser tests

use minterp::ast::*;
use minterp::lexer::TokenKind;
use minterp::parser::{parse, parse_with_diagnostics};
use minterp::{Expected, InterpError};

fn parse_source(source: &str) -> Program {
    parse(source).unwrap()
}

/// Unwrap a syntax error into (expected, found, position)
fn syntax_error(source: &str) -> (Expected, TokenKind, usize) {
    match parse(source) {
        Err(InterpError::Syntax {
            expected,
            found,
            position,
            ..
        }) => (expected, found, position),
        Err(e) => panic!("Expected syntax error, got {:?}", e),
        Ok(p) => panic!("Expected syntax error, parsed {:?}", p),
    }
}

fn literal_text(factor: &SignedFactor) -> &str {
    match &factor.factor {
        Factor::Literal { text, .. } => text,
        other => panic!("Expected literal, got {:?}", other),
    }
}

#[test]
fn test_parse_single_write() {
    let program = parse_source("wr 1");
    assert_eq!(program.block.len(), 1);
    assert!(matches!(
        &program.block.stmts[0],
        Stmt::Write {
            value: Operand::Expr(_),
            ..
        }
    ));
}

#[test]
fn test_parse_block_sequence() {
    let program = parse_source("x = 1; y = 2; wr x + y");
    assert_eq!(program.block.len(), 3);

    if let Stmt::Assign { name, .. } = &program.block.stmts[1] {
        assert_eq!(name, "y");
    } else {
        panic!("Expected assignment");
    }
}

#[test]
fn test_parse_expr_chain_is_flat_in_source_order() {
    let program = parse_source("wr 10 - 3 + 2");
    let Stmt::Write {
        value: Operand::Expr(expr),
        ..
    } = &program.block.stmts[0]
    else {
        panic!("Expected write of expression");
    };

    assert_eq!(literal_text(&expr.first.first), "10");
    assert_eq!(expr.rest.len(), 2);
    assert_eq!(expr.rest[0].0.kind, AddOp::Sub);
    assert_eq!(literal_text(&expr.rest[0].1.first), "3");
    assert_eq!(expr.rest[1].0.kind, AddOp::Add);
    assert_eq!(literal_text(&expr.rest[1].1.first), "2");
}

#[test]
fn test_parse_term_binds_tighter() {
    let program = parse_source("wr 1 + 2 * 3");
    let Stmt::Write {
        value: Operand::Expr(expr),
        ..
    } = &program.block.stmts[0]
    else {
        panic!("Expected write of expression");
    };
    assert_eq!(expr.rest.len(), 1);
    let term = &expr.rest[0].1;
    assert_eq!(term.rest.len(), 1);
    assert_eq!(term.rest[0].0.kind, MulOp::Mul);
}

#[test]
fn test_parse_signed_and_paren_factors() {
    let program = parse_source("wr -(a)");
    let Stmt::Write {
        value: Operand::Expr(expr),
        ..
    } = &program.block.stmts[0]
    else {
        panic!("Expected write of expression");
    };
    let signed = &expr.first.first;
    assert!(signed.negative);
    assert!(matches!(signed.factor, Factor::Paren(_)));
    assert_eq!((signed.span.start, signed.span.end), (3, 7));
}

#[test]
fn test_parse_if_without_else() {
    let program = parse_source("if x < 1 then wr 1");
    match &program.block.stmts[0] {
        Stmt::If {
            cond, else_branch, ..
        } => {
            assert_eq!(cond.op.kind, RelOp::Lt);
            assert!(else_branch.is_none());
        }
        other => panic!("Expected if, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_binds_inner_statement() {
    let program = parse_source("if a == b then x = 1 else x = 2; wr x");
    assert_eq!(program.block.len(), 2);
    assert!(matches!(
        &program.block.stmts[0],
        Stmt::If {
            else_branch: Some(_),
            ..
        }
    ));
}

#[test]
fn test_parse_while_with_compound_body() {
    let program = parse_source("while i <> 0 do begin wr i; i = i - 1 end");
    match &program.block.stmts[0] {
        Stmt::While { cond, body, .. } => {
            assert_eq!(cond.op.kind, RelOp::Ne);
            match body.as_ref() {
                Stmt::Compound { block, .. } => assert_eq!(block.len(), 2),
                other => panic!("Expected compound body, got {:?}", other),
            }
        }
        other => panic!("Expected while, got {:?}", other),
    }
}

#[test]
fn test_parse_all_relational_operators() {
    for (src, op) in [
        ("<", RelOp::Lt),
        ("<=", RelOp::Le),
        (">", RelOp::Gt),
        (">=", RelOp::Ge),
        ("<>", RelOp::Ne),
        ("==", RelOp::Eq),
    ] {
        let program = parse_source(&format!("if 1 {} 2 then wr 0", src));
        let Stmt::If { cond, .. } = &program.block.stmts[0] else {
            panic!("Expected if");
        };
        assert_eq!(cond.op.kind, op);
        assert_eq!(cond.op.kind.as_str(), src);
    }
}

#[test]
fn test_parse_write_comparison() {
    let program = parse_source("wr 3 < 5");
    assert!(matches!(
        &program.block.stmts[0],
        Stmt::Write {
            value: Operand::Compare(_),
            ..
        }
    ));
}

#[test]
fn test_reject_chained_comparison() {
    let (expected, found, position) = syntax_error("wr 3 < 5 == 5 > 3");
    assert_eq!(expected, Expected::Token(TokenKind::Eof));
    assert_eq!(found, TokenKind::EqEq);
    assert_eq!(position, 9);
}

#[test]
fn test_reject_comparison_as_operand() {
    let (expected, found, _) = syntax_error("x = 1 < 2");
    assert_eq!(expected, Expected::Token(TokenKind::Eof));
    assert_eq!(found, TokenKind::Lt);
}

#[test]
fn test_reject_missing_relop() {
    let (expected, found, _) = syntax_error("if x then wr 1");
    assert_eq!(expected, Expected::RelOp);
    assert_eq!(found, TokenKind::Then);
}

#[test]
fn test_reject_missing_then() {
    let (expected, found, position) = syntax_error("if x < 1 wr 1");
    assert_eq!(expected, Expected::Token(TokenKind::Then));
    assert_eq!(found, TokenKind::Wr);
    assert_eq!(position, 9);
}

#[test]
fn test_reject_unclosed_begin() {
    let (expected, found, _) = syntax_error("begin wr 1; wr 2");
    assert_eq!(expected, Expected::Token(TokenKind::End));
    assert_eq!(found, TokenKind::Eof);
}

#[test]
fn test_reject_trailing_semicolon() {
    // `;` must be followed by another statement
    let (expected, found, _) = syntax_error("wr 1;");
    assert_eq!(expected, Expected::Token(TokenKind::Id));
    assert_eq!(found, TokenKind::Eof);
}

#[test]
fn test_reject_empty_program() {
    let (expected, found, _) = syntax_error("  # nothing here");
    assert_eq!(expected, Expected::Token(TokenKind::Id));
    assert_eq!(found, TokenKind::Eof);
}

#[test]
fn test_reject_missing_factor() {
    let (expected, found, _) = syntax_error("wr 1 + )");
    assert_eq!(expected, Expected::Token(TokenKind::Dbl));
    assert_eq!(found, TokenKind::RParen);
}

#[test]
fn test_reject_double_negation() {
    let (expected, found, _) = syntax_error("wr - - 1");
    assert_eq!(expected, Expected::Token(TokenKind::Dbl));
    assert_eq!(found, TokenKind::Minus);
}

#[test]
fn test_illegal_character_then_syntax_error() {
    let (result, diagnostics) = parse_with_diagnostics("prog", "wr 1 @ wr 2");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].ch, '@');
    match result {
        Err(InterpError::Syntax {
            expected, found, ..
        }) => {
            assert_eq!(expected, Expected::Token(TokenKind::Eof));
            assert_eq!(found, TokenKind::Wr);
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_illegal_character_skipped_in_valid_program() {
    let (result, diagnostics) = parse_with_diagnostics("prog", "wr 1 ;@ wr 2");
    assert_eq!(result.unwrap().block.len(), 2);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_syntax_error_message() {
    let err = parse("wr )").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("expected `dbl`"), "{}", message);
    assert!(message.contains("position 3"), "{}", message);
    assert!(err.is_syntax());
    assert_eq!(err.position(), 3);
}

#[test]
fn test_ast_serializes() {
    let program = parse_source("x = 1; wr x");
    let json = serde_json::to_string(&program).unwrap();
    assert!(json.contains("\"Assign\""));
    let back: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(back, program);
}
