//! # AST 模块
//!
//! 定义脚本的抽象语法树（Abstract Syntax Tree）。
//!
//! ## 设计说明
//!
//! AST 是解析器的输出：每条语句一个 [`Stmt`]，一次解析创建后不再修改。
//! 变量替换（`$name`）和指令替换（`[...]`）的**解析**发生在这里，
//! 但它们的**求值**推迟到执行期，由执行器在当时的作用域上完成。

use serde::{Deserialize, Serialize};

use crate::error::TclResult;
use crate::script::expr::Expr;
use crate::script::parser::Parser;

/// 指令参数（word）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Word {
    /// 数字字面量
    Number(f64),

    /// 裸词，按字面字符串处理
    Bare(String),

    /// 引号字符串
    ///
    /// `$name` 替换推迟到求值期进行
    Quoted(String),

    /// 花括号字符串：逐字保留，不做任何替换
    Braced(String),

    /// 变量引用 `$name`
    VarRef(String),

    /// 指令替换 `[...]`
    ///
    /// 括号内的语句在求值期执行，最后一条语句的值作为替换结果
    Subst(Vec<Stmt>),
}

/// 脚本语句
///
/// 一条指令，以 `;` 或换行结束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// `set name value` 赋值
    Set { name: String, value: Word },

    /// `unset name` 删除局部绑定
    Unset { name: String },

    /// `puts value` 输出一行
    Puts { arg: Word },

    /// `expr ...` 算术求值
    Expr { expr: Expr },

    /// 裸 `{...}` 块
    ///
    /// 推迟求值的子脚本，原文逐字保存，执行期再解析运行
    Block { source: String },
}

/// 解析后的完整脚本
///
/// 供工具与测试一次性取得全部语句；解释器本身通过
/// [`Parser::next_statement`] 流式拉取，以便边解析边执行。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// 语句列表（按源码顺序）
    pub stmts: Vec<Stmt>,
}

impl Script {
    /// 一次性解析整段脚本文本
    pub fn parse(text: &str) -> TclResult<Self> {
        let mut parser = Parser::new(text);
        let mut stmts = Vec::new();
        while let Some(stmt) = parser.next_statement()? {
            stmts.push(stmt);
        }
        Ok(Self { stmts })
    }

    /// 语句数量
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}
