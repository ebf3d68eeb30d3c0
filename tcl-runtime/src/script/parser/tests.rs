//! # Parser 测试

use super::*;
use crate::error::TclError;
use crate::script::ast::Script;

fn parse_one(source: &str) -> Stmt {
    let mut parser = Parser::new(source);
    let stmt = parser.next_statement().unwrap().unwrap();
    assert!(parser.next_statement().unwrap().is_none());
    stmt
}

fn parse_err(source: &str) -> TclError {
    Script::parse(source).unwrap_err()
}

// -------------------------------------------------------------------------
// 指令形式
// -------------------------------------------------------------------------

#[test]
fn test_parse_set_number() {
    assert_eq!(
        parse_one("set a 5"),
        Stmt::Set {
            name: "a".to_string(),
            value: Word::Number(5.0),
        }
    );
}

#[test]
fn test_parse_set_bare_word() {
    assert_eq!(
        parse_one("set greeting hello"),
        Stmt::Set {
            name: "greeting".to_string(),
            value: Word::Bare("hello".to_string()),
        }
    );
}

#[test]
fn test_parse_set_quoted_string() {
    // $ 替换保留在文本里，推迟到求值期
    assert_eq!(
        parse_one(r#"set msg "hi $name""#),
        Stmt::Set {
            name: "msg".to_string(),
            value: Word::Quoted("hi $name".to_string()),
        }
    );
}

#[test]
fn test_parse_set_braced_string() {
    assert_eq!(
        parse_one("set raw {no $subst here}"),
        Stmt::Set {
            name: "raw".to_string(),
            value: Word::Braced("no $subst here".to_string()),
        }
    );
}

#[test]
fn test_parse_set_variable_reference() {
    assert_eq!(
        parse_one("set b $a"),
        Stmt::Set {
            name: "b".to_string(),
            value: Word::VarRef("a".to_string()),
        }
    );
}

#[test]
fn test_parse_unset() {
    assert_eq!(
        parse_one("unset a"),
        Stmt::Unset {
            name: "a".to_string(),
        }
    );
}

#[test]
fn test_parse_puts() {
    assert_eq!(
        parse_one("puts $x"),
        Stmt::Puts {
            arg: Word::VarRef("x".to_string()),
        }
    );
}

#[test]
fn test_parse_block_statement() {
    // 块原文逐字保存，不在此时解析
    assert_eq!(
        parse_one("{set 局部 1; puts $局部}"),
        Stmt::Block {
            source: "set 局部 1; puts $局部".to_string(),
        }
    );
}

#[test]
fn test_parse_command_substitution() {
    assert_eq!(
        parse_one("puts [expr 1 + 2]"),
        Stmt::Puts {
            arg: Word::Subst(vec![Stmt::Expr {
                expr: Expr::add(Expr::number(1.0), Expr::number(2.0)),
            }]),
        }
    );
}

#[test]
fn test_parse_nested_command_substitution() {
    // [...] 可嵌套
    let stmt = parse_one("puts [expr [expr 1 + 1] * 3]");
    let Stmt::Puts {
        arg: Word::Subst(outer),
    } = stmt
    else {
        panic!("期望指令替换参数");
    };
    assert_eq!(outer.len(), 1);
}

#[test]
fn test_parse_substitution_inside_expression() {
    // [...] 可以作为运算数出现在表达式里
    assert_eq!(
        parse_one("expr [expr 1 + 1] * 3"),
        Stmt::Expr {
            expr: Expr::mul(
                Expr::subst(vec![Stmt::Expr {
                    expr: Expr::add(Expr::number(1.0), Expr::number(1.0)),
                }]),
                Expr::number(3.0),
            ),
        }
    );
}

#[test]
fn test_parse_substitution_with_multiple_statements() {
    let stmt = parse_one("puts [set a 1; expr $a + 1]");
    assert!(matches!(
        stmt,
        Stmt::Puts { arg: Word::Subst(stmts) } if stmts.len() == 2
    ));
}

// -------------------------------------------------------------------------
// 语句分隔
// -------------------------------------------------------------------------

#[test]
fn test_separator_runs_collapse() {
    // 分隔符连续串折叠为零条空语句
    let script = Script::parse("\n\n;;set a 1;;\n;set b 2\n\n").unwrap();
    assert_eq!(script.len(), 2);
}

#[test]
fn test_semicolon_and_newline_equivalent() {
    let with_semi = Script::parse("set a 1; set b 2").unwrap();
    let with_eol = Script::parse("set a 1\nset b 2").unwrap();
    assert_eq!(with_semi, with_eol);
}

// -------------------------------------------------------------------------
// 表达式文法
// -------------------------------------------------------------------------

#[test]
fn test_expression_precedence() {
    // 1 + 2 * 3 -> Add(1, Mul(2, 3))
    assert_eq!(
        parse_one("expr 1 + 2 * 3"),
        Stmt::Expr {
            expr: Expr::add(
                Expr::number(1.0),
                Expr::mul(Expr::number(2.0), Expr::number(3.0)),
            ),
        }
    );
}

#[test]
fn test_expression_left_associative() {
    // 10 - 4 - 3 -> Sub(Sub(10, 4), 3)
    assert_eq!(
        parse_one("expr 10 - 4 - 3"),
        Stmt::Expr {
            expr: Expr::sub(
                Expr::sub(Expr::number(10.0), Expr::number(4.0)),
                Expr::number(3.0),
            ),
        }
    );
}

#[test]
fn test_expression_parentheses_override_precedence() {
    // (1 + 2) * 3 -> Mul(Add(1, 2), 3)
    assert_eq!(
        parse_one("expr (1 + 2) * 3"),
        Stmt::Expr {
            expr: Expr::mul(
                Expr::add(Expr::number(1.0), Expr::number(2.0)),
                Expr::number(3.0),
            ),
        }
    );
}

#[test]
fn test_expression_variables() {
    // $x 与裸 name 都是变量引用
    assert_eq!(
        parse_one("expr $x + y"),
        Stmt::Expr {
            expr: Expr::add(Expr::var("x"), Expr::var("y")),
        }
    );
}

// -------------------------------------------------------------------------
// 错误
// -------------------------------------------------------------------------

#[test]
fn test_set_missing_name_fails() {
    assert!(matches!(
        parse_err("set"),
        TclError::Parse(ParseError::MissingParameter { command, .. }) if command == "set"
    ));
}

#[test]
fn test_set_missing_value_fails() {
    assert!(matches!(
        parse_err("set a\nset b 2"),
        TclError::Parse(ParseError::MissingParameter { command, .. }) if command == "set"
    ));
}

#[test]
fn test_unset_missing_name_fails() {
    assert!(matches!(
        parse_err("unset"),
        TclError::Parse(ParseError::MissingParameter { command, .. }) if command == "unset"
    ));
}

#[test]
fn test_unknown_command_fails() {
    assert!(matches!(
        parse_err("frobnicate x"),
        TclError::Parse(ParseError::UnknownCommand { name, line: 1, column: 1 }) if name == "frobnicate"
    ));
}

#[test]
fn test_unmatched_paren_fails() {
    assert!(matches!(
        parse_err("expr (1 + 2"),
        TclError::Parse(ParseError::UnexpectedToken { expected, .. }) if expected == "')'"
    ));
}

#[test]
fn test_missing_operand_fails() {
    assert!(matches!(
        parse_err("expr 1 +"),
        TclError::Parse(ParseError::UnexpectedEof { .. })
    ));
}

#[test]
fn test_unclosed_substitution_fails() {
    assert!(matches!(
        parse_err("puts [expr 1 + 2"),
        TclError::Parse(ParseError::UnexpectedEof { expected }) if expected == "']'"
    ));
}

#[test]
fn test_lex_error_propagates() {
    assert!(matches!(parse_err(r#"puts "hello"#), TclError::Lex(_)));
}

#[test]
fn test_error_carries_position() {
    let err = parse_err("set a 1\nnosuch b");
    assert!(matches!(
        err,
        TclError::Parse(ParseError::UnknownCommand { line: 2, column: 1, .. })
    ));
}
