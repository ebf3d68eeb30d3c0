//! # 表达式模块
//!
//! 定义算术表达式的 AST 和求值器。
//!
//! ## 设计原则
//!
//! - 优先级由解析器固化到树形里，求值只做左右递归
//! - 变量在**求值期**解析：同一棵树换一条作用域链重跑，结果随之变化
//! - 指令替换节点通过 [`EvalContext::run_subst`] 交还给执行器运行，
//!   表达式求值本身不持有执行状态
//! - 除以零是求值期错误，不是解析期错误
//!
//! ## 支持的运算
//!
//! - 四则运算: `+`, `-`, `*`, `/`
//! - 变量引用: `$name`（或表达式内的裸 `name`）
//! - 指令替换: `[...]`，结果强制转换为数字
//! - 括号分组

use serde::{Deserialize, Serialize};

use crate::context::Value;
use crate::error::{RuntimeError, TclResult};
use crate::script::ast::Stmt;

/// 表达式 AST 节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// 数字字面量
    Number(f64),

    /// 变量引用
    ///
    /// 变量名不包含 `$` 前缀
    Variable(String),

    /// 指令替换 `[...]`
    ///
    /// 括号内的语句在求值期执行，最后一条语句的值强制转换为数字
    Subst(Vec<Stmt>),

    /// 加法
    Add(Box<Expr>, Box<Expr>),

    /// 减法
    Sub(Box<Expr>, Box<Expr>),

    /// 乘法
    Mul(Box<Expr>, Box<Expr>),

    /// 除法
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// 创建数字字面量
    pub fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// 创建变量引用
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// 创建指令替换
    pub fn subst(stmts: Vec<Stmt>) -> Self {
        Self::Subst(stmts)
    }

    /// 创建加法
    pub fn add(left: Expr, right: Expr) -> Self {
        Self::Add(Box::new(left), Box::new(right))
    }

    /// 创建减法
    pub fn sub(left: Expr, right: Expr) -> Self {
        Self::Sub(Box::new(left), Box::new(right))
    }

    /// 创建乘法
    pub fn mul(left: Expr, right: Expr) -> Self {
        Self::Mul(Box::new(left), Box::new(right))
    }

    /// 创建除法
    pub fn div(left: Expr, right: Expr) -> Self {
        Self::Div(Box::new(left), Box::new(right))
    }
}

/// 表达式求值上下文
///
/// 提供变量查找和指令替换的执行能力。指令替换需要运行语句，
/// 因此由执行器侧实现本 trait。
pub trait EvalContext {
    /// 获取变量值
    fn get_var(&self, name: &str) -> Option<&Value>;

    /// 执行指令替换 `[...]` 中的语句序列，返回最后一条语句的值
    fn run_subst(&mut self, stmts: &[Stmt]) -> TclResult<Value>;
}

/// 对表达式求值
///
/// # 参数
///
/// - `expr`: 要求值的表达式
/// - `ctx`: 求值上下文（提供变量查找与指令替换执行）
///
/// # 返回
///
/// 数字结果（`Value::Number`）或错误
pub fn evaluate(expr: &Expr, ctx: &mut impl EvalContext) -> TclResult<Value> {
    Ok(Value::Number(eval_number(expr, ctx)?))
}

fn eval_number(expr: &Expr, ctx: &mut impl EvalContext) -> TclResult<f64> {
    match expr {
        Expr::Number(n) => Ok(*n),

        Expr::Variable(name) => {
            let value = ctx
                .get_var(name)
                .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() })?;
            Ok(to_number(value)?)
        }

        Expr::Subst(stmts) => {
            let value = ctx.run_subst(stmts)?;
            Ok(to_number(&value)?)
        }

        Expr::Add(left, right) => Ok(eval_number(left, ctx)? + eval_number(right, ctx)?),

        Expr::Sub(left, right) => Ok(eval_number(left, ctx)? - eval_number(right, ctx)?),

        Expr::Mul(left, right) => Ok(eval_number(left, ctx)? * eval_number(right, ctx)?),

        Expr::Div(left, right) => {
            let left_val = eval_number(left, ctx)?;
            let right_val = eval_number(right, ctx)?;
            if right_val == 0.0 {
                return Err(RuntimeError::DivisionByZero.into());
            }
            Ok(left_val / right_val)
        }
    }
}

/// 将值强制转换为数字
///
/// 字符串按十进制解析；语言是弱类型的，`set x 2` 之后
/// `expr $x + 1` 必须能用。
pub fn to_number(value: &Value) -> Result<f64, RuntimeError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Str(s) => s.trim().parse::<f64>().map_err(|_| RuntimeError::NotANumber {
            value: s.clone(),
        }),
    }
}
