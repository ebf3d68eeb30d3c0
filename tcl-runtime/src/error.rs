//! # Error 模块
//!
//! 定义 tcl-runtime 中使用的错误类型。
//!
//! 错误按流水线阶段划分：词法 / 解析 / 运行时。
//! 三类错误统一汇入 [`TclError`]，调用方可据此区分失败阶段。

use thiserror::Error;

/// 词法错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// 字符串未闭合
    #[error("第 {line} 行第 {column} 列：字符串未闭合，缺少 '\"'")]
    UnterminatedQuote { line: usize, column: usize },

    /// 花括号块未闭合
    #[error("第 {line} 行第 {column} 列：花括号块未闭合，缺少 '}}'")]
    UnterminatedBrace { line: usize, column: usize },

    /// 无法识别的字符
    #[error("第 {line} 行第 {column} 列：无法识别的字符 '{ch}'")]
    UnexpectedChar { ch: char, line: usize, column: usize },
}

/// 解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 语法位置上出现了错误类别的 token
    #[error("第 {line} 行第 {column} 列：期望 {expected}，实际为 {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    /// 脚本在语法结构中途结束
    #[error("脚本意外结束：期望 {expected}")]
    UnexpectedEof { expected: String },

    /// 缺少必需参数
    #[error("第 {line} 行第 {column} 列：指令 '{command}' 缺少参数 '{param}'")]
    MissingParameter {
        command: String,
        param: String,
        line: usize,
        column: usize,
    },

    /// 数字字面量无法解析
    #[error("第 {line} 行第 {column} 列：无法解析数字 '{text}'")]
    InvalidNumber {
        text: String,
        line: usize,
        column: usize,
    },

    /// 语句以未知指令开头
    #[error("第 {line} 行第 {column} 列：未知指令 '{name}'")]
    UnknownCommand {
        name: String,
        line: usize,
        column: usize,
    },
}

/// 运行时（求值）错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// 变量在整条作用域链上都未定义
    #[error("变量 '{name}' 未定义")]
    UndefinedVariable { name: String },

    /// 除数为零（求值期错误，而非解析期）
    #[error("除数为零")]
    DivisionByZero,

    /// 字符串值无法强制转换为数字
    #[error("'{value}' 不是数字")]
    NotANumber { value: String },

    /// 无效的状态操作
    #[error("无效的状态操作: {message}")]
    InvalidState { message: String },
}

/// tcl-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TclError {
    /// 词法错误
    #[error("词法错误: {0}")]
    Lex(#[from] LexError),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),

    /// 运行时错误
    #[error("运行时错误: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Result 类型别名
pub type TclResult<T> = Result<T, TclError>;
