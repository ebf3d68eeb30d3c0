//! # Token 模块
//!
//! 定义词法单元的封闭类别集合。
//!
//! ## 设计说明
//!
//! 类别建模为封闭的和类型：只有 `Number` 和 `Name` 携带词素文本，
//! 其余类别的词素是固定的规范字符串。这样"该类别能否持有文本"
//! 不需要任何运行期检查。

/// 词法单元类别
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// 数字字面量（原始文本逐字保留）
    Number(String),
    /// 标识符 / 字面内容
    Name(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`（指令替换开始）
    LeftBracket,
    /// `]`（指令替换结束）
    RightBracket,
    /// 开引号
    LeftQuote,
    /// 闭引号
    RightQuote,
    /// `{`（推迟求值的块开始）
    LeftBrace,
    /// `}`（块结束）
    RightBrace,
    /// 关键字 `puts`
    Puts,
    /// 关键字 `expr`
    Expr,
    /// 关键字 `unset`
    Unset,
    /// 关键字 `set`
    Set,
    /// `;`（语句分隔符）
    Semicolon,
    /// 换行（语句分隔符，与 `;` 等效但可区分）
    Eol,
    /// `$`（变量引用前缀）
    Dollar,
    /// 输入结束
    Eof,
}

impl TokenKind {
    /// 词素文本
    ///
    /// `Number`/`Name` 返回携带的文本，其余类别返回固定的规范字符串。
    pub fn lexeme(&self) -> &str {
        match self {
            Self::Number(text) | Self::Name(text) => text,
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftQuote | Self::RightQuote => "\"",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Puts => "puts",
            Self::Expr => "expr",
            Self::Unset => "unset",
            Self::Set => "set",
            Self::Semicolon => ";",
            Self::Eol => "\n",
            Self::Dollar => "$",
            Self::Eof => "eof",
        }
    }

    /// 用于错误信息的类别描述
    pub fn description(&self) -> &'static str {
        match self {
            Self::Number(_) => "数字",
            Self::Name(_) => "标识符",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Mul => "'*'",
            Self::Div => "'/'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::LeftQuote | Self::RightQuote => "'\"'",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::Puts => "'puts'",
            Self::Expr => "'expr'",
            Self::Unset => "'unset'",
            Self::Set => "'set'",
            Self::Semicolon => "';'",
            Self::Eol => "换行",
            Self::Dollar => "'$'",
            Self::Eof => "输入结束",
        }
    }
}

/// 带位置信息的词法单元
///
/// 由词法器创建，解析器只读消费，解析完成后即丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// 类别（含可变长度类别的词素文本）
    pub kind: TokenKind,
    /// 行号（从 1 开始）
    pub line: usize,
    /// 列号（从 1 开始）
    pub column: usize,
}

impl Token {
    /// 创建词法单元
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    /// 替换词素文本
    ///
    /// 只对 `Number`/`Name` 生效；对固定词素的类别是无操作（而非错误），
    /// 保持固定词素不可变。
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        match &mut self.kind {
            TokenKind::Number(t) | TokenKind::Name(t) => *t = text.into(),
            _ => {}
        }
        self
    }

    /// 是否为语句分隔符（`;` 或换行）
    pub fn is_separator(&self) -> bool {
        matches!(self.kind, TokenKind::Semicolon | TokenKind::Eol)
    }
}
