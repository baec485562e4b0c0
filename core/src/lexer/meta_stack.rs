use std::fmt;

use serde::Serialize;

use super::token::TokenKind;
use crate::errors::ScanErrorKind;

/// The kinds of bracket a scan can have open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Delimiter {
    Function,
    Index,
    Group,
    Matrix,
}

impl Delimiter {
    /// Token kind emitted when this delimiter is opened.
    pub fn open_kind(self) -> TokenKind {
        match self {
            Delimiter::Function => TokenKind::LeftFuncMeta,
            Delimiter::Index => TokenKind::LeftIdxMeta,
            Delimiter::Group => TokenKind::LeftGroup,
            Delimiter::Matrix => TokenKind::LeftMatMeta,
        }
    }

    pub fn close_kind(self) -> TokenKind {
        match self {
            Delimiter::Function => TokenKind::RightFuncMeta,
            Delimiter::Index => TokenKind::RightIdxMeta,
            Delimiter::Group => TokenKind::RightGroup,
            Delimiter::Matrix => TokenKind::RightMatMeta,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Function => f.write_str("function"),
            Delimiter::Index => f.write_str("index"),
            Delimiter::Group => f.write_str("group"),
            Delimiter::Matrix => f.write_str("matrix"),
        }
    }
}

/// LIFO of currently open delimiters.
#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    open: Vec<Delimiter>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, delimiter: Delimiter) {
        self.open.push(delimiter);
    }

    /// Pops the innermost delimiter, which must be `closing`. On mismatch or
    /// underflow the stack is left untouched.
    pub fn pop_expecting(&mut self, closing: Delimiter) -> Result<(), ScanErrorKind> {
        match self.peek() {
            Some(open) if open == closing => {
                self.open.pop();
                Ok(())
            }
            open => Err(ScanErrorKind::MismatchedDelimiter { closing, open }),
        }
    }

    pub fn peek(&self) -> Option<Delimiter> {
        self.open.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
