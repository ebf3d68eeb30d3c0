//! # Engine 模块
//!
//! 解释器主循环。
//!
//! ## 执行模型
//!
//! ```text
//! run() -> TclResult<Value>
//! ```
//!
//! 1. 向解析器逐条拉取语句（边解析边执行：后面的语句可能
//!    依赖前面语句的副作用）
//! 2. 执行语句，把输出行追加到输出缓冲
//! 3. 首个错误终止运行；此前语句的副作用与输出原样保留
//!
//! 运行是一次性的：`Ready -> Running -> Done | Failed`，
//! 结束后再次 `run` 返回 [`RuntimeError::InvalidState`]。

use crate::context::{Context, Value};
use crate::error::{RuntimeError, TclResult};
use crate::runtime::executor::Executor;
use crate::script::parser::Parser;

/// 输出缓冲的固定前缀横幅
pub const OUTPUT_BANNER: &str = "Tcl> ";

/// 解释器运行状态（一次性）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// 已构造，尚未运行
    Ready,
    /// 按源码顺序执行语句中
    Running,
    /// 全部语句执行完毕，输出定稿
    Done,
    /// 解析或求值错误已传播
    Failed,
}

/// 解释器抽象
///
/// 共享契约：驱动一次脚本运行并暴露累计输出。
/// 具体实现通过组合（而非继承）持有解析器、作用域链和输出缓冲。
pub trait Interpreter {
    /// 运行脚本，返回最后一条语句的值
    fn run(&mut self) -> TclResult<Value>;

    /// 迄今累计的输出（含前缀横幅；失败后保留已产生的部分）
    fn output(&self) -> &str;
}

/// 标准解释器
///
/// 一个实例独占一条作用域链和一个输出缓冲，
/// `run` 结束（或失败）后即可安全丢弃。
pub struct TclInterpreter<'a> {
    /// 当前解析器
    parser: Parser<'a>,
    /// 作用域链（顶层即全局作用域）
    context: Context,
    /// 语句执行器
    executor: Executor,
    /// 输出缓冲（追加式）
    output: String,
    /// 一次性运行状态
    state: RunState,
}

impl<'a> TclInterpreter<'a> {
    /// 创建解释器，使用全新的全局作用域
    pub fn new(parser: Parser<'a>) -> Self {
        Self::with_context(parser, Context::new())
    }

    /// 在既有作用域链上创建解释器（嵌套执行帧）
    pub fn with_context(parser: Parser<'a>, context: Context) -> Self {
        Self {
            parser,
            context,
            executor: Executor::new(),
            output: String::from(OUTPUT_BANNER),
            state: RunState::Ready,
        }
    }

    /// 从脚本文本直接构造
    pub fn from_source(source: &'a str) -> Self {
        Self::new(Parser::new(source))
    }

    /// 当前运行状态
    pub fn state(&self) -> RunState {
        self.state
    }

    /// 只读检视作用域链（运行结束后安全）
    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl Interpreter for TclInterpreter<'_> {
    fn run(&mut self) -> TclResult<Value> {
        if self.state != RunState::Ready {
            return Err(RuntimeError::InvalidState {
                message: format!("解释器已运行过 ({:?})，请重新构造", self.state),
            }
            .into());
        }
        self.state = RunState::Running;

        let mut last = Value::empty();
        let mut lines = Vec::new();
        loop {
            // 语句 N 解析失败时，1..N-1 的副作用与输出已经生效
            let stmt = match self.parser.next_statement() {
                Ok(Some(stmt)) => stmt,
                Ok(None) => break,
                Err(e) => {
                    self.state = RunState::Failed;
                    return Err(e);
                }
            };

            let result = self.executor.execute(&stmt, &mut self.context, &mut lines);
            // 失败语句在失败点之前产生的输出同样进入缓冲
            for line in lines.drain(..) {
                self.output.push_str(&line);
                self.output.push('\n');
            }
            match result {
                Ok(value) => last = value,
                Err(e) => {
                    self.state = RunState::Failed;
                    return Err(e);
                }
            }
        }

        self.state = RunState::Done;
        Ok(last)
    }

    fn output(&self) -> &str {
        &self.output
    }
}
