//! # Runtime 模块
//!
//! 脚本执行引擎：解释器主循环与语句执行器。
//!
//! ## 模块结构
//!
//! - [`engine`]：解释器主循环（拉取-执行，一次性运行状态）
//! - [`executor`]：单条语句的求值与替换

pub mod engine;
pub mod executor;

pub use engine::{Interpreter, OUTPUT_BANNER, RunState, TclInterpreter};
pub use executor::{Executor, substitute};
