//! # Parser 模块
//!
//! 拉取式递归下降解析器（手写，无 regex 依赖）。
//!
//! ## 架构
//!
//! ```text
//! 原始文本 → [Lexer: 按需产出 token] → [Parser: next_statement] → Stmt
//! ```
//!
//! ## 设计原则
//!
//! - 与词法器流水线衔接：一次只向前看一个 token，不物化整条 token 流
//! - 按语句拉取：`next_statement` 每次交出一条语句，解释器可以
//!   边解析边执行（后面的语句可能依赖前面语句的副作用）
//! - 不做错误恢复：首个结构错误终止本次解析
//!
//! ## 表达式文法（优先级从低到高）
//!
//! ```text
//! expression := term (('+' | '-') term)*        左结合
//! term       := primary (('*' | '/') primary)*  左结合
//! primary    := NUMBER | NAME | '$' NAME | '[' stmts ']' | '(' expression ')'
//! ```

#[cfg(test)]
mod tests;

use crate::error::{ParseError, TclResult};
use crate::script::ast::{Stmt, Word};
use crate::script::expr::Expr;
use crate::script::lexer::Lexer;
use crate::script::token::{Token, TokenKind};

/// 脚本解析器
///
/// 借用脚本文本，按需从词法器拉取 token。
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// 单 token 前瞻
    lookahead: Option<Token>,
}

impl<'a> Parser<'a> {
    /// 创建新的解析器
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: None,
        }
    }

    /// 拉取下一条语句
    ///
    /// 分隔符（`;` / 换行）的连续串折叠为零条空语句；
    /// 脚本结束返回 `Ok(None)`。
    pub fn next_statement(&mut self) -> TclResult<Option<Stmt>> {
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Semicolon | TokenKind::Eol => {
                    self.bump()?;
                }
                TokenKind::Eof => return Ok(None),
                _ => break,
            }
        }
        Ok(Some(self.parse_command()?))
    }

    fn peek(&mut self) -> TclResult<Token> {
        if let Some(token) = &self.lookahead {
            return Ok(token.clone());
        }
        let token = self.lexer.next_token()?;
        self.lookahead = Some(token.clone());
        Ok(token)
    }

    fn bump(&mut self) -> TclResult<Token> {
        if let Some(token) = self.lookahead.take() {
            return Ok(token);
        }
        Ok(self.lexer.next_token()?)
    }

    /// 解析一条指令
    fn parse_command(&mut self) -> TclResult<Stmt> {
        let token = self.bump()?;
        match token.kind {
            TokenKind::Set => {
                let name = self.expect_name("set", "变量名")?;
                let value = self.parse_word("set")?;
                Ok(Stmt::Set { name, value })
            }

            TokenKind::Unset => {
                let name = self.expect_name("unset", "变量名")?;
                Ok(Stmt::Unset { name })
            }

            TokenKind::Puts => {
                let arg = self.parse_word("puts")?;
                Ok(Stmt::Puts { arg })
            }

            TokenKind::Expr => {
                let expr = self.parse_expression()?;
                Ok(Stmt::Expr { expr })
            }

            // 裸块：原文已由词法器逐字打包
            TokenKind::LeftBrace => {
                let source = self.parse_delimited_body(TokenKind::RightBrace, "'}'")?;
                Ok(Stmt::Block { source })
            }

            TokenKind::Name(name) => Err(ParseError::UnknownCommand {
                name,
                line: token.line,
                column: token.column,
            }
            .into()),

            other => Err(ParseError::UnexpectedToken {
                expected: "指令".to_string(),
                found: other.description().to_string(),
                line: token.line,
                column: token.column,
            }
            .into()),
        }
    }

    /// 期望一个 `Name` token，取出其文本
    fn expect_name(&mut self, command: &str, param: &str) -> TclResult<String> {
        let token = self.bump()?;
        match token.kind {
            TokenKind::Name(name) => Ok(name),
            _ => Err(ParseError::MissingParameter {
                command: command.to_string(),
                param: param.to_string(),
                line: token.line,
                column: token.column,
            }
            .into()),
        }
    }

    /// 解析一个指令参数（word）
    fn parse_word(&mut self, command: &str) -> TclResult<Word> {
        let token = self.bump()?;
        match token.kind {
            TokenKind::Number(text) => match text.parse::<f64>() {
                Ok(n) => Ok(Word::Number(n)),
                Err(_) => Err(ParseError::InvalidNumber {
                    text,
                    line: token.line,
                    column: token.column,
                }
                .into()),
            },

            TokenKind::Name(word) => Ok(Word::Bare(word)),

            TokenKind::Dollar => {
                let name = self.expect_name(command, "变量名")?;
                Ok(Word::VarRef(name))
            }

            TokenKind::LeftQuote => {
                let text = self.parse_delimited_body(TokenKind::RightQuote, "'\"'")?;
                Ok(Word::Quoted(text))
            }

            TokenKind::LeftBrace => {
                let source = self.parse_delimited_body(TokenKind::RightBrace, "'}'")?;
                Ok(Word::Braced(source))
            }

            TokenKind::LeftBracket => {
                let stmts = self.parse_subst()?;
                Ok(Word::Subst(stmts))
            }

            TokenKind::Semicolon | TokenKind::Eol | TokenKind::Eof => {
                Err(ParseError::MissingParameter {
                    command: command.to_string(),
                    param: "参数".to_string(),
                    line: token.line,
                    column: token.column,
                }
                .into())
            }

            other => Err(ParseError::UnexpectedToken {
                expected: "参数".to_string(),
                found: other.description().to_string(),
                line: token.line,
                column: token.column,
            }
            .into()),
        }
    }

    /// 定界文本体（引号 / 花括号通用）：内容 token（可省略）+ 闭合 token
    ///
    /// 开定界符已被调用方消费；词法器保证内容是单个 `Name` token。
    fn parse_delimited_body(&mut self, closing: TokenKind, expected: &str) -> TclResult<String> {
        let token = self.bump()?;
        match token.kind {
            kind if kind == closing => Ok(String::new()),
            TokenKind::Name(text) => {
                let close = self.bump()?;
                if close.kind == closing {
                    Ok(text)
                } else {
                    Err(ParseError::UnexpectedToken {
                        expected: expected.to_string(),
                        found: close.kind.description().to_string(),
                        line: close.line,
                        column: close.column,
                    }
                    .into())
                }
            }
            other => Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: other.description().to_string(),
                line: token.line,
                column: token.column,
            }
            .into()),
        }
    }

    /// 指令替换 `[...]`：递归解析括号内的语句序列
    fn parse_subst(&mut self) -> TclResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Semicolon | TokenKind::Eol => {
                    self.bump()?;
                }
                TokenKind::RightBracket => {
                    self.bump()?;
                    return Ok(stmts);
                }
                TokenKind::Eof => {
                    return Err(ParseError::UnexpectedEof {
                        expected: "']'".to_string(),
                    }
                    .into());
                }
                _ => stmts.push(self.parse_command()?),
            }
        }
    }

    /// expression := term (('+' | '-') term)*
    fn parse_expression(&mut self) -> TclResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Plus => {
                    self.bump()?;
                    let right = self.parse_term()?;
                    left = Expr::add(left, right);
                }
                TokenKind::Minus => {
                    self.bump()?;
                    let right = self.parse_term()?;
                    left = Expr::sub(left, right);
                }
                _ => break,
            }
        }
        Ok(left)
    }

    /// term := primary (('*' | '/') primary)*
    fn parse_term(&mut self) -> TclResult<Expr> {
        let mut left = self.parse_primary()?;
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Mul => {
                    self.bump()?;
                    let right = self.parse_primary()?;
                    left = Expr::mul(left, right);
                }
                TokenKind::Div => {
                    self.bump()?;
                    let right = self.parse_primary()?;
                    left = Expr::div(left, right);
                }
                _ => break,
            }
        }
        Ok(left)
    }

    /// primary := NUMBER | NAME | '$' NAME | '[' stmts ']' | '(' expression ')'
    fn parse_primary(&mut self) -> TclResult<Expr> {
        let token = self.bump()?;
        match token.kind {
            TokenKind::Number(text) => match text.parse::<f64>() {
                Ok(n) => Ok(Expr::number(n)),
                Err(_) => Err(ParseError::InvalidNumber {
                    text,
                    line: token.line,
                    column: token.column,
                }
                .into()),
            },

            TokenKind::Name(name) => Ok(Expr::var(name)),

            TokenKind::Dollar => {
                let name = self.expect_name("expr", "变量名")?;
                Ok(Expr::var(name))
            }

            // 指令替换可作为运算数嵌套出现
            TokenKind::LeftBracket => {
                let stmts = self.parse_subst()?;
                Ok(Expr::subst(stmts))
            }

            TokenKind::LeftParen => {
                let expr = self.parse_expression()?;
                let close = self.bump()?;
                match close.kind {
                    TokenKind::RightParen => Ok(expr),
                    other => Err(ParseError::UnexpectedToken {
                        expected: "')'".to_string(),
                        found: other.description().to_string(),
                        line: close.line,
                        column: close.column,
                    }
                    .into()),
                }
            }

            TokenKind::Eof => Err(ParseError::UnexpectedEof {
                expected: "表达式".to_string(),
            }
            .into()),

            other => Err(ParseError::UnexpectedToken {
                expected: "表达式".to_string(),
                found: other.description().to_string(),
                line: token.line,
                column: token.column,
            }
            .into()),
        }
    }
}
