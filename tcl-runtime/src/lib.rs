//! # Tcl Runtime
//!
//! Tcl 风格脚本语言的核心运行时库。
//!
//! ## 架构概述
//!
//! `tcl-runtime` 是纯逻辑核心，不依赖任何 IO。宿主层（Host）
//! 提供脚本文本，取回输出缓冲和脚本返回值：
//!
//! ```text
//! 脚本文本 → Lexer → token 流 → Parser → 语句树 → Interpreter
//!                                              │（读写 Context）
//!                                              ▼
//!                                     输出缓冲 + 返回值
//! ```
//!
//! 解析与执行是流水线式的：解释器逐条拉取语句并立即执行，
//! 因此语句 N 的解析错误不会抹掉语句 1..N-1 的副作用与输出。
//!
//! ## 核心类型
//!
//! - [`TclInterpreter`]：标准解释器（实现 [`Interpreter`]）
//! - [`Parser`]：拉取式递归下降解析器
//! - [`Context`]：变量作用域链
//! - [`TclError`]：统一错误类型（词法 / 解析 / 运行时）
//!
//! ## 使用示例
//!
//! ```ignore
//! use tcl_runtime::{Interpreter, TclInterpreter};
//!
//! let mut interpreter = TclInterpreter::from_source("set x 2; expr $x * 21");
//! let value = interpreter.run()?;
//!
//! assert_eq!(value.to_string(), "42");
//! print!("{}", interpreter.output());
//! ```
//!
//! ## 模块结构
//!
//! - [`script`]：语言前端（token / 词法器 / AST / 表达式 / 解析器）
//! - [`runtime`]：执行引擎
//! - [`context`]：变量值与作用域链
//! - [`error`]：错误类型定义

pub mod context;
pub mod error;
pub mod runtime;
pub mod script;

// 重导出核心类型
pub use context::{Context, Value};
pub use error::{LexError, ParseError, RuntimeError, TclError, TclResult};
pub use runtime::{Executor, Interpreter, OUTPUT_BANNER, RunState, TclInterpreter};
pub use script::{
    EvalContext, Expr, Lexer, Parser, Script, Stmt, Token, TokenKind, Word, evaluate, tokenize,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let _token = Token::new(TokenKind::Set, 1, 1);

        let script = Script::parse("set a 1").unwrap();
        assert_eq!(script.len(), 1);

        let mut interpreter = TclInterpreter::from_source("expr 1 + 1");
        assert_eq!(interpreter.run().unwrap(), Value::Number(2.0));
        assert!(interpreter.output().starts_with(OUTPUT_BANNER));
    }
}
