use miette::Diagnostic;
use thiserror::Error;

use crate::lexer::meta_stack::Delimiter;

/// Number of characters before the failure point quoted in an error message.
const EXCERPT_BEFORE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    #[error("undefined identifier '{name}'")]
    UndefinedIdentifier { name: String },

    #[error("expected '(' right after function '{name}'")]
    ExpectedFunctionOpen { name: String },

    #[error("bad number syntax: {text:?}")]
    MalformedNumber { text: String },

    #[error("exponent marker in {text:?} is not followed by digits")]
    MalformedExponent { text: String },

    #[error("unknown operator '{ch}'")]
    UnknownOperator { ch: char },

    #[error("unknown separator '{ch}'")]
    UnknownSeparator { ch: char },

    #[error("mismatched {closing} delimiter: {}", describe_open(.open))]
    MismatchedDelimiter {
        closing: Delimiter,
        open: Option<Delimiter>,
    },

    #[error("unexpected character '{ch}'")]
    UnknownCharacter { ch: char },
}

fn describe_open(open: &Option<Delimiter>) -> String {
    match open {
        Some(open) => format!("innermost open delimiter is {open}"),
        None => "nothing is open".to_string(),
    }
}

/// A fatal scan error. Its `Display` is the text carried by the Error token.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("Error at char {offset}: '{excerpt}'\n{kind}")]
#[diagnostic(help("check the expression around this location"))]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub offset: usize,
    pub excerpt: String,

    #[label("here")]
    pub span: miette::SourceSpan,
}

impl ScanError {
    /// Builds an error at byte `offset` of `input`, quoting the characters
    /// leading up to it and the character at it.
    pub fn new(kind: ScanErrorKind, input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let start = input[..offset]
            .char_indices()
            .rev()
            .nth(EXCERPT_BEFORE - 1)
            .map_or(0, |(idx, _)| idx);
        let end = input[offset..]
            .chars()
            .next()
            .map_or(offset, |ch| offset + ch.len_utf8());
        Self {
            kind,
            offset,
            excerpt: input[start..end].to_string(),
            span: (offset, end - offset).into(),
        }
    }
}
