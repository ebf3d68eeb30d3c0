//! # Context 模块
//!
//! 定义脚本变量值和作用域链。
//!
//! ## 设计原则
//!
//! - 作用域链实现为**帧栈**：最内层帧在栈顶，父作用域即栈中前一帧，
//!   不需要任何指向父作用域的所有权指针
//! - 查找从最内层向外回退；赋值和删除只作用于最内层帧
//! - 全局帧永不弹出，解释器随时可以安全读取
//! - 所有状态可序列化，便于运行结束后检视变量

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 脚本变量值
///
/// 语言是弱类型的：数字和字符串按需互相转换。
/// 数字统一用 `f64` 承载，整数值在显示时不带小数部分。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// 数字
    Number(f64),
    /// 字符串
    Str(String),
}

impl Value {
    /// 空字符串值（`unset`/`puts` 等语句的返回值）
    pub fn empty() -> Self {
        Self::Str(String::new())
    }

    /// 创建数字值
    pub fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// 创建字符串值
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                // 整数值不带小数部分
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// 作用域帧
///
/// 只持有局部变量映射；父帧由 [`Context`] 中的栈顺序隐式给出。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Frame {
    vars: HashMap<String, Value>,
}

/// 作用域链
///
/// 变量名到值的映射栈。一次解释器运行独占一条作用域链，
/// 运行结束后的只读检视是安全的。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    frames: Vec<Frame>,
}

impl Context {
    /// 创建只含全局帧的作用域链
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// 在最内层作用域定义（或覆盖）变量
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.vars.insert(name.into(), value);
        }
    }

    /// 查找变量：先查最内层帧，再沿父链向外回退
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.vars.get(name))
    }

    /// 删除最内层帧中的绑定
    ///
    /// 只影响局部绑定（遮蔽语义）；绑定不存在时是无操作，幂等。
    pub fn remove(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.vars.remove(name);
        }
    }

    /// 进入子作用域（块 / 嵌套执行帧）
    pub fn push_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    /// 离开子作用域，丢弃其全部局部绑定
    ///
    /// 全局帧永不弹出。
    pub fn pop_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// 作用域深度（含全局帧）
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
