//! # Script 模块
//!
//! 脚本的语言前端：词法、语法和表达式求值。
//!
//! ## 模块结构
//!
//! - [`token`]：词法单元类别定义
//! - [`lexer`]：手写拉取式词法器
//! - [`ast`]：脚本抽象语法树定义
//! - [`expr`]：算术表达式 AST 与求值器
//! - [`parser`]：拉取式递归下降解析器

pub mod ast;
pub mod expr;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Script, Stmt, Word};
pub use expr::{EvalContext, Expr, evaluate};
pub use lexer::{Lexer, tokenize};
pub use parser::Parser;
pub use token::{Token, TokenKind};
