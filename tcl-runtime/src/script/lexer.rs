//! # Lexer 模块
//!
//! 手写的拉取式词法器（无 regex 依赖）。
//!
//! ## 规则
//!
//! - 行内空白跳过；引号和花括号之外的换行产生 [`TokenKind::Eol`]
//! - `#` 到行尾是注释
//! - 单字符运算符 / 标点直接成为固定类别 token
//! - 引号内的内容作为整体字面 token，不再按运算符切分
//! - 花括号块逐字捕获，内部的嵌套花括号按深度配对
//! - 裸词先查关键字（set / unset / puts / expr），否则是 `Name`
//!
//! 词法器同步驱动到完成或首个错误，不支持中途恢复。

use std::collections::VecDeque;

use crate::error::LexError;
use crate::script::token::{Token, TokenKind};

/// 词法器
///
/// 借用完整脚本文本，按需产出 token；序列以恰好一个 `Eof` 结束。
pub struct Lexer<'a> {
    source: &'a str,
    /// 当前字节偏移
    pos: usize,
    line: usize,
    column: usize,
    /// 花括号块展开出的待发 token
    pending: VecDeque<Token>,
    /// 当前是否位于引号内部
    in_quote: bool,
    /// 开引号位置（未闭合时报错用）
    quote_line: usize,
    quote_column: usize,
}

impl<'a> Lexer<'a> {
    /// 创建词法器
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            pending: VecDeque::new(),
            in_quote: false,
            quote_line: 0,
            quote_column: 0,
        }
    }

    /// 产出下一个 token
    ///
    /// 输入耗尽后返回 `Eof`；首个词法错误终止整条流水线。
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(token);
        }

        if self.in_quote {
            return self.lex_quoted();
        }

        // 跳过行内空白与注释
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.bump();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        let line = self.line;
        let column = self.column;

        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, line, column));
        };

        match c {
            '\n' => self.single(TokenKind::Eol, line, column),
            '+' => self.single(TokenKind::Plus, line, column),
            '-' => self.single(TokenKind::Minus, line, column),
            '*' => self.single(TokenKind::Mul, line, column),
            '/' => self.single(TokenKind::Div, line, column),
            '(' => self.single(TokenKind::LeftParen, line, column),
            ')' => self.single(TokenKind::RightParen, line, column),
            '[' => self.single(TokenKind::LeftBracket, line, column),
            ']' => self.single(TokenKind::RightBracket, line, column),
            ';' => self.single(TokenKind::Semicolon, line, column),
            '$' => self.single(TokenKind::Dollar, line, column),
            '"' => {
                self.bump();
                self.in_quote = true;
                self.quote_line = line;
                self.quote_column = column;
                Ok(Token::new(TokenKind::LeftQuote, line, column))
            }
            '{' => {
                self.bump();
                self.lex_brace_block(line, column)
            }
            c if c.is_ascii_digit() => Ok(self.lex_number(line, column)),
            c if c.is_alphabetic() || c == '_' => Ok(self.lex_word(line, column)),
            other => {
                self.bump();
                Err(LexError::UnexpectedChar {
                    ch: other,
                    line,
                    column,
                })
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn single(&mut self, kind: TokenKind, line: usize, column: usize) -> Result<Token, LexError> {
        self.bump();
        Ok(Token::new(kind, line, column))
    }

    /// 引号内部：整段内容是一个字面 token，直到闭引号
    fn lex_quoted(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let column = self.column;

        if self.peek() == Some('"') {
            self.bump();
            self.in_quote = false;
            return Ok(Token::new(TokenKind::RightQuote, line, column));
        }

        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(LexError::UnterminatedQuote {
                        line: self.quote_line,
                        column: self.quote_column,
                    });
                }
                Some('"') => break,
                Some(_) => {
                    self.bump();
                }
            }
        }

        let text = self.source[start..self.pos].to_string();
        Ok(Token::new(TokenKind::Name(text), line, column))
    }

    /// 花括号块：逐字捕获到配对的 `}`，嵌套深度计数
    ///
    /// 立即返回 `LeftBrace`，内容和 `RightBrace` 进入待发队列。
    fn lex_brace_block(&mut self, open_line: usize, open_column: usize) -> Result<Token, LexError> {
        let start = self.pos;
        let content_line = self.line;
        let content_column = self.column;
        let mut depth = 1usize;

        loop {
            let brace_line = self.line;
            let brace_column = self.column;
            match self.bump() {
                None => {
                    return Err(LexError::UnterminatedBrace {
                        line: open_line,
                        column: open_column,
                    });
                }
                Some('{') => depth += 1,
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        // '}' 是单字节，内容结束于它之前
                        let content = &self.source[start..self.pos - 1];
                        if !content.is_empty() {
                            self.pending.push_back(Token::new(
                                TokenKind::Name(content.to_string()),
                                content_line,
                                content_column,
                            ));
                        }
                        self.pending.push_back(Token::new(
                            TokenKind::RightBrace,
                            brace_line,
                            brace_column,
                        ));
                        return Ok(Token::new(TokenKind::LeftBrace, open_line, open_column));
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// 十进制数字字面量，文本逐字保留
    fn lex_number(&mut self, line: usize, column: usize) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        if self.peek() == Some('.') {
            self.bump();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = self.source[start..self.pos].to_string();
        Token::new(TokenKind::Number(text), line, column)
    }

    /// 裸词：关键字或标识符
    fn lex_word(&mut self, line: usize, column: usize) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        let word = &self.source[start..self.pos];
        let kind = match word {
            "set" => TokenKind::Set,
            "unset" => TokenKind::Unset,
            "puts" => TokenKind::Puts,
            "expr" => TokenKind::Expr,
            _ => TokenKind::Name(word.to_string()),
        };
        Token::new(kind, line, column)
    }
}

/// 一次性扫描整段文本的全部 token（含结尾的 `Eof`）
///
/// 供工具和测试使用；解释器本身按需拉取。
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let at_end = token.kind == TokenKind::Eof;
        tokens.push(token);
        if at_end {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_set_statement() {
        assert_eq!(
            kinds("set a 5"),
            vec![
                TokenKind::Set,
                TokenKind::Name("a".to_string()),
                TokenKind::Number("5".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_operators_and_parens() {
        assert_eq!(
            kinds("(1 + 2) * 3 / 4 - 5"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Number("1".to_string()),
                TokenKind::Plus,
                TokenKind::Number("2".to_string()),
                TokenKind::RightParen,
                TokenKind::Mul,
                TokenKind::Number("3".to_string()),
                TokenKind::Div,
                TokenKind::Number("4".to_string()),
                TokenKind::Minus,
                TokenKind::Number("5".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_keywords_and_names() {
        assert_eq!(
            kinds("puts expr unset set settings"),
            vec![
                TokenKind::Puts,
                TokenKind::Expr,
                TokenKind::Unset,
                TokenKind::Set,
                TokenKind::Name("settings".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_separators() {
        assert_eq!(
            kinds("set a 1; set b 2\nset c 3"),
            vec![
                TokenKind::Set,
                TokenKind::Name("a".to_string()),
                TokenKind::Number("1".to_string()),
                TokenKind::Semicolon,
                TokenKind::Set,
                TokenKind::Name("b".to_string()),
                TokenKind::Number("2".to_string()),
                TokenKind::Eol,
                TokenKind::Set,
                TokenKind::Name("c".to_string()),
                TokenKind::Number("3".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_variable_reference() {
        assert_eq!(
            kinds("puts $name"),
            vec![
                TokenKind::Puts,
                TokenKind::Dollar,
                TokenKind::Name("name".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_content_not_relexed() {
        // 引号内的运算符和空格保持字面形式
        assert_eq!(
            kinds(r#"puts "a + b; c""#),
            vec![
                TokenKind::Puts,
                TokenKind::LeftQuote,
                TokenKind::Name("a + b; c".to_string()),
                TokenKind::RightQuote,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_empty_quotes() {
        assert_eq!(
            kinds(r#"set a """#),
            vec![
                TokenKind::Set,
                TokenKind::Name("a".to_string()),
                TokenKind::LeftQuote,
                TokenKind::RightQuote,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_fails() {
        let err = tokenize(r#"puts "hello"#).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedQuote { line: 1, .. }));
    }

    #[test]
    fn test_brace_block_captures_raw_text() {
        assert_eq!(
            kinds("{puts $x}"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::Name("puts $x".to_string()),
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_brace_block_tracks_nesting_depth() {
        // 内层花括号对不会提前终结外层块
        assert_eq!(
            kinds("{a {b c} d}"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::Name("a {b c} d".to_string()),
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_empty_brace_block() {
        assert_eq!(
            kinds("{}"),
            vec![TokenKind::LeftBrace, TokenKind::RightBrace, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_brace_fails() {
        let err = tokenize("{a {b}").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedBrace { line: 1, column: 1 }));
    }

    #[test]
    fn test_unexpected_char_fails() {
        let err = tokenize("set a @").unwrap_err();
        assert!(matches!(
            err,
            LexError::UnexpectedChar { ch: '@', line: 1, column: 7 }
        ));
    }

    #[test]
    fn test_comment_skipped() {
        assert_eq!(
            kinds("# 注释\nset a 1 # 行尾注释\n"),
            vec![
                TokenKind::Eol,
                TokenKind::Set,
                TokenKind::Name("a".to_string()),
                TokenKind::Number("1".to_string()),
                TokenKind::Eol,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_decimal_number() {
        assert_eq!(
            kinds("expr 3.14 + 2"),
            vec![
                TokenKind::Expr,
                TokenKind::Number("3.14".to_string()),
                TokenKind::Plus,
                TokenKind::Number("2".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_position_tracking() {
        let tokens = tokenize("set a 1\n  puts $a").unwrap();
        // "puts" 位于第 2 行第 3 列
        let puts = tokens.iter().find(|t| t.kind == TokenKind::Puts).unwrap();
        assert_eq!((puts.line, puts.column), (2, 3));
    }
}
