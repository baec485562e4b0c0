use std::fmt;

use serde::Serialize;

/// Tokens of the fixed-keyword scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tok {
    Undefined,
    Illegal,

    // Single characters
    Newline,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Plus,
    Minus,
    Asterisk,
    Slash,

    Ident,
    Eof,

    // Keywords
    If,
    Else,
    For,
}

/// Every keyword, in declaration order.
pub const KEYWORDS: [Tok; 3] = [Tok::If, Tok::Else, Tok::For];

impl Tok {
    /// Source text of a keyword token.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            Tok::If => Some("if"),
            Tok::Else => Some("else"),
            Tok::For => Some("for"),
            _ => None,
        }
    }

    pub fn is_keyword(self) -> bool {
        self.keyword_text().is_some()
    }

    pub fn describe(self) -> &'static str {
        match self {
            Tok::Undefined => "undefined",
            Tok::Illegal => "illegal",
            Tok::Newline => "\\n",
            Tok::LParen => "(",
            Tok::RParen => ")",
            Tok::LBrace => "{",
            Tok::RBrace => "}",
            Tok::LBracket => "[",
            Tok::RBracket => "]",
            Tok::Plus => "+",
            Tok::Minus => "-",
            Tok::Asterisk => "*",
            Tok::Slash => "/",
            Tok::Ident => "<identifier>",
            Tok::Eof => "EOF",
            Tok::If => "if",
            Tok::Else => "else",
            Tok::For => "for",
        }
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Token for a character that stands on its own, if `ch` is one.
pub fn lookup_single_char(ch: char) -> Option<Tok> {
    let tok = match ch {
        '\0' => Tok::Illegal,
        '\n' => Tok::Newline,
        '(' => Tok::LParen,
        ')' => Tok::RParen,
        '{' => Tok::LBrace,
        '}' => Tok::RBrace,
        '[' => Tok::LBracket,
        ']' => Tok::RBracket,
        '+' => Tok::Plus,
        '-' => Tok::Minus,
        '*' => Tok::Asterisk,
        '/' => Tok::Slash,
        _ => return None,
    };
    Some(tok)
}
