use std::fmt;

use serde::Serialize;

/// A single token with its kind, the text it covers and its source span.
///
/// The text is copied out of the input so tokens can cross threads and
/// outlive the buffer they were scanned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Whether no token can follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, TokenKind::Eof | TokenKind::Error)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::Error => f.write_str(&self.text),
            _ if self.text.chars().count() > 10 => {
                let head: String = self.text.chars().take(10).collect();
                write!(f, "{head:?}...")
            }
            _ => write!(f, "{:?}", self.text),
        }
    }
}

/// Byte offset span in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Fatal scan error; the text is the formatted message.
    Error,
    Nil,
    Eof,
    Number,
    Variable,
    Operator,
    Function,
    Comma,
    Colon,
    Semicolon,

    // Delimiters, resolved by context
    LeftFuncMeta,
    RightFuncMeta,
    LeftMatMeta,
    RightMatMeta,
    LeftIdxMeta,
    RightIdxMeta,
    LeftGroup,
    RightGroup,

    Identifier,
    /// Plain text the scanner did not recognize.
    Text,

    // Reserved, never emitted
    End,
    VarIndex,
    String,
    Anon,
    If,
    Else,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Error => "Error",
            TokenKind::Nil => "Nil",
            TokenKind::Eof => "EOF",
            TokenKind::Number => "Number",
            TokenKind::Variable => "Variable",
            TokenKind::Operator => "Operator",
            TokenKind::Function => "Function",
            TokenKind::Comma => "Comma",
            TokenKind::Colon => "Colon",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::LeftFuncMeta => "LeftFuncMeta",
            TokenKind::RightFuncMeta => "RightFuncMeta",
            TokenKind::LeftMatMeta => "LeftMatMeta",
            TokenKind::RightMatMeta => "RightMatMeta",
            TokenKind::LeftIdxMeta => "LeftIdxMeta",
            TokenKind::RightIdxMeta => "RightIdxMeta",
            TokenKind::LeftGroup => "LeftGroup",
            TokenKind::RightGroup => "RightGroup",
            TokenKind::Identifier => "Identifier",
            TokenKind::Text => "Text",
            TokenKind::End => "End",
            TokenKind::VarIndex => "VarIndex",
            TokenKind::String => "String",
            TokenKind::Anon => "Anon",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
