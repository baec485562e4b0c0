//! Fixed-keyword scanning backed by a perfect hash.
//!
//! [`perfect_hash`] is the offline search that finds collision-free
//! coefficients for a keyword set; [`table`] bakes the result into an O(1)
//! lookup used by [`scanner::KeywordLexer`].

pub mod perfect_hash;
pub mod scanner;
pub mod table;
pub mod token;

pub use perfect_hash::{
    Coef, CombineOp, HashSolution, KeywordTableArtifact, PerfectHashFinder, SearchConfig,
    find_smallest,
};
pub use scanner::{KeywordLexer, KeywordToken};
pub use table::{KeywordTable, keyword_table};
pub use token::Tok;

use crate::errors::KeywordError;

/// Classify an identifier: its keyword token, or `Ident`.
pub fn lookup(text: &str) -> Result<Tok, KeywordError> {
    Ok(keyword_table()?.lookup(text))
}

pub fn is_keyword(text: &str) -> Result<bool, KeywordError> {
    Ok(keyword_table()?.is_keyword(text))
}
