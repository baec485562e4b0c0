use std::sync::OnceLock;

use super::perfect_hash::{Coef, HashSolution};
use super::token::{KEYWORDS, Tok};
use crate::errors::KeywordError;

/// Coefficients found by `hashgen` for `if`, `else` and `for`:
/// `len + s[0] + s[1]` over a 16-slot table.
pub fn baked_solution() -> HashSolution {
    HashSolution {
        table_bits: 4,
        coefs: vec![Coef::at(0), Coef::at(1), Coef::at(2)],
    }
}

/// Keyword classification in one hash, one index and one string compare.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    solution: HashSolution,
    slots: Vec<Option<Tok>>,
}

impl KeywordTable {
    /// Places every keyword under `solution`, failing on the first
    /// collision.
    pub fn build(solution: HashSolution) -> Result<Self, KeywordError> {
        let mut slots: Vec<Option<Tok>> = vec![None; solution.table_size()];
        for tok in KEYWORDS {
            let text = tok.keyword_text().unwrap_or_default();
            let slot = solution.slot(text);
            if let Some(other) = slots[slot] {
                return Err(KeywordError::ImperfectHash {
                    keyword: text.to_string(),
                    other: other.describe().to_string(),
                    slot,
                });
            }
            slots[slot] = Some(tok);
        }
        Ok(Self { solution, slots })
    }

    pub fn solution(&self) -> &HashSolution {
        &self.solution
    }

    /// The keyword token for `text`, or `Ident`.
    pub fn lookup(&self, text: &str) -> Tok {
        match self.slots[self.solution.slot(text)] {
            Some(tok) if tok.keyword_text() == Some(text) => tok,
            _ => Tok::Ident,
        }
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.lookup(text) != Tok::Ident
    }
}

static TABLE: OnceLock<Result<KeywordTable, KeywordError>> = OnceLock::new();

/// The process-wide keyword table, built on first use.
pub fn keyword_table() -> Result<&'static KeywordTable, KeywordError> {
    TABLE
        .get_or_init(|| KeywordTable::build(baked_solution()))
        .as_ref()
        .map_err(Clone::clone)
}
