use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum HashError {
    /// Every coefficient reached its maximum without a collision-free
    /// assignment. Retry with a larger table.
    #[error("no coefficients found")]
    #[diagnostic(help("retry with a larger table size"))]
    NoCoefficientsFound,

    #[error("table size of {bits} bits is outside 1..=32")]
    InvalidTableBits { bits: u32 },

    #[error("at least one coefficient is required to find a perfect hash")]
    NoCoefficients,

    #[error("no keywords to hash")]
    NoInputs,

    #[error("coefficient {index} has no maximum and no default maximum is set")]
    MissingMaxCoef { index: usize },

    #[error("keyword '{keyword}' appears more than once")]
    DuplicateKeyword { keyword: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum KeywordError {
    #[error("imperfect hash: '{keyword}' and '{other}' both land in slot {slot}")]
    #[diagnostic(help("search new coefficients with hashgen and update the baked table"))]
    ImperfectHash {
        keyword: String,
        other: String,
        slot: usize,
    },

    #[error("no source name given to the keyword lexer")]
    EmptySourceName,
}
