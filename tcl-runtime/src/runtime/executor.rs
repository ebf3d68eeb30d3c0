//! # Executor 模块
//!
//! 对单条语句求值。
//!
//! ## 职责
//!
//! - 读取 Stmt，对参数做求值期替换（`$name` / `[...]`）
//! - 产生语句值；输出行随产生即追加到调用方缓冲
//! - 推迟的块在这里解析并在子作用域中运行

use crate::context::{Context, Value};
use crate::error::{RuntimeError, TclResult};
use crate::script::ast::{Stmt, Word};
use crate::script::expr::{self, EvalContext, Expr};
use crate::script::parser::Parser;

/// 语句执行器
///
/// 无自有状态；作用域链和输出缓冲由调用方传入并独占。
pub struct Executor;

impl Executor {
    /// 创建新的执行器
    pub fn new() -> Self {
        Self
    }

    /// 执行单条语句
    ///
    /// 输出行随产生即追加到 `output`。语句中途失败时，
    /// 失败点之前的副作用和已产生的输出都原样保留。
    pub fn execute(
        &mut self,
        stmt: &Stmt,
        ctx: &mut Context,
        output: &mut Vec<String>,
    ) -> TclResult<Value> {
        self.exec_stmt(stmt, ctx, output)
    }

    fn exec_stmt(
        &mut self,
        stmt: &Stmt,
        ctx: &mut Context,
        output: &mut Vec<String>,
    ) -> TclResult<Value> {
        match stmt {
            Stmt::Set { name, value } => {
                let value = self.eval_word(value, ctx, output)?;
                ctx.define(name.clone(), value.clone());
                Ok(value)
            }

            // 删除是幂等的：绑定不存在不是错误
            Stmt::Unset { name } => {
                ctx.remove(name);
                Ok(Value::empty())
            }

            Stmt::Puts { arg } => {
                let value = self.eval_word(arg, ctx, output)?;
                output.push(value.to_string());
                Ok(Value::empty())
            }

            Stmt::Expr { expr } => self.eval_expr(expr, ctx, output),

            Stmt::Block { source } => self.run_block(source, ctx, output),
        }
    }

    /// 对算术表达式求值
    ///
    /// 表达式里的指令替换经由 [`ExprScope`] 回到执行器运行。
    fn eval_expr(
        &mut self,
        expr: &Expr,
        ctx: &mut Context,
        output: &mut Vec<String>,
    ) -> TclResult<Value> {
        let mut scope = ExprScope {
            executor: self,
            ctx,
            output,
        };
        expr::evaluate(expr, &mut scope)
    }

    /// 在子作用域中解析并运行推迟的块
    fn run_block(
        &mut self,
        source: &str,
        ctx: &mut Context,
        output: &mut Vec<String>,
    ) -> TclResult<Value> {
        ctx.push_scope();
        let result = self.run_source(source, ctx, output);
        // 成功与否都要离开子作用域
        ctx.pop_scope();
        result
    }

    /// 顺序解析并执行一段脚本文本
    fn run_source(
        &mut self,
        source: &str,
        ctx: &mut Context,
        output: &mut Vec<String>,
    ) -> TclResult<Value> {
        let mut parser = Parser::new(source);
        let mut last = Value::empty();
        while let Some(stmt) = parser.next_statement()? {
            last = self.exec_stmt(&stmt, ctx, output)?;
        }
        Ok(last)
    }

    /// 对指令参数求值
    ///
    /// 变量替换和指令替换都发生在这里（求值期），而非解析期。
    fn eval_word(
        &mut self,
        word: &Word,
        ctx: &mut Context,
        output: &mut Vec<String>,
    ) -> TclResult<Value> {
        match word {
            Word::Number(n) => Ok(Value::Number(*n)),

            Word::Bare(text) | Word::Braced(text) => Ok(Value::Str(text.clone())),

            Word::Quoted(text) => Ok(Value::Str(substitute(text, ctx)?)),

            Word::VarRef(name) => match ctx.lookup(name) {
                Some(value) => Ok(value.clone()),
                None => Err(RuntimeError::UndefinedVariable { name: name.clone() }.into()),
            },

            // 指令替换：在当前作用域执行，结果是最后一条语句的值
            Word::Subst(stmts) => {
                let mut last = Value::empty();
                for stmt in stmts {
                    last = self.exec_stmt(stmt, ctx, output)?;
                }
                Ok(last)
            }
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

/// 表达式求值期的执行器视图
///
/// 把变量查找和指令替换的执行统一交给表达式求值器。
struct ExprScope<'a> {
    executor: &'a mut Executor,
    ctx: &'a mut Context,
    output: &'a mut Vec<String>,
}

impl EvalContext for ExprScope<'_> {
    fn get_var(&self, name: &str) -> Option<&Value> {
        self.ctx.lookup(name)
    }

    fn run_subst(&mut self, stmts: &[Stmt]) -> TclResult<Value> {
        let mut last = Value::empty();
        for stmt in stmts {
            last = self.executor.exec_stmt(stmt, self.ctx, self.output)?;
        }
        Ok(last)
    }
}

/// 对引号字符串做 `$name` 替换
///
/// 变量名由字母、数字、下划线组成；孤立的 `$` 保持字面形式。
pub fn substitute(text: &str, ctx: &Context) -> TclResult<String> {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if name.is_empty() {
            result.push('$');
            continue;
        }

        match ctx.lookup(&name) {
            Some(value) => result.push_str(&value.to_string()),
            None => return Err(RuntimeError::UndefinedVariable { name }.into()),
        }
    }

    Ok(result)
}
