use std::ops::RangeInclusive;

use matlex::errors::HashError;
use matlex::keywords::{Coef, CombineOp, HashSolution, PerfectHashFinder, SearchConfig};
use rayon::prelude::*;
use serde::Serialize;

/// Outcome of the search at one table size.
#[derive(Debug, Clone, Serialize)]
pub struct SizeOutcome {
    pub table_bits: u32,
    pub attempts: usize,
    #[serde(skip)]
    pub solution: Option<HashSolution>,
}

impl SizeOutcome {
    pub fn found(&self) -> bool {
        self.solution.is_some()
    }
}

pub struct SearchSummary {
    pub outcomes: Vec<SizeOutcome>,
}

impl SearchSummary {
    /// The solution with the smallest table.
    pub fn best(&self) -> Option<&HashSolution> {
        self.outcomes.iter().find_map(|o| o.solution.as_ref())
    }

    pub fn total_attempts(&self) -> usize {
        self.outcomes.iter().map(|o| o.attempts).sum()
    }
}

/// One coefficient per byte position, plus the trailing length coefficient.
pub fn template(indices: &[isize], op: CombineOp, pow2: bool) -> Vec<Coef> {
    indices
        .iter()
        .map(|&index| Coef::at(index).with_op(op))
        .chain(std::iter::once(Coef::at(0)))
        .map(|coef| if pow2 { coef.pow2() } else { coef })
        .collect()
}

/// Searches every table size in `bits` in parallel.
///
/// Sizes are independent, so larger tables are searched even when a smaller
/// one succeeds; the summary keeps them in ascending order.
pub fn search_sizes(
    keywords: &[&str],
    bits: RangeInclusive<u32>,
    template: &[Coef],
    default_max_coef: u32,
) -> Result<SearchSummary, HashError> {
    if bits.is_empty() {
        return Err(HashError::InvalidTableBits { bits: *bits.start() });
    }

    let outcomes = bits
        .into_par_iter()
        .map(|table_bits| search_size(keywords, table_bits, template, default_max_coef))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchSummary { outcomes })
}

fn search_size(
    keywords: &[&str],
    table_bits: u32,
    template: &[Coef],
    default_max_coef: u32,
) -> Result<SizeOutcome, HashError> {
    let mut finder = PerfectHashFinder::new(SearchConfig {
        table_bits,
        default_max_coef,
    });
    let mut coefs = template.to_vec();
    match finder.search(&mut coefs, keywords) {
        Ok(attempts) => Ok(SizeOutcome {
            table_bits,
            attempts,
            solution: Some(finder.solution(&coefs)),
        }),
        Err(HashError::NoCoefficientsFound) => Ok(SizeOutcome {
            table_bits,
            attempts: finder.attempts(),
            solution: None,
        }),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_appends_length_coefficient() {
        let coefs = template(&[0, -1], CombineOp::Xor, true);
        assert_eq!(coefs.len(), 3);
        assert_eq!(coefs[0].index_applied, 0);
        assert_eq!(coefs[1].index_applied, -1);
        assert_eq!(coefs[1].op, CombineOp::Xor);
        assert_eq!(coefs[2].op, CombineOp::Add);
        assert!(coefs.iter().all(|c| c.only_pow2));
    }

    #[test]
    fn smallest_table_wins() {
        let coefs = template(&[0, 1], CombineOp::Add, true);
        let summary = search_sizes(&["if", "else", "for"], 1..=6, &coefs, 32).unwrap();

        let bits: Vec<u32> = summary.outcomes.iter().map(|o| o.table_bits).collect();
        assert_eq!(bits, vec![1, 2, 3, 4, 5, 6]);
        // Two slots cannot hold three keywords.
        assert!(!summary.outcomes[0].found());

        let best = summary.best().unwrap();
        let first_found = summary.outcomes.iter().find(|o| o.found()).unwrap();
        assert_eq!(best.table_bits, first_found.table_bits);
        assert!(summary.total_attempts() >= summary.outcomes.len());
    }

    #[test]
    fn nothing_found_in_a_tiny_range() {
        let coefs = template(&[0], CombineOp::Add, true);
        let summary = search_sizes(&["a", "b", "c", "d", "e"], 1..=2, &coefs, 4).unwrap();
        assert!(summary.best().is_none());
    }

    #[test]
    fn argument_errors_are_propagated() {
        let coefs = template(&[0], CombineOp::Add, false);
        let err = search_sizes(&["if", "if"], 4..=5, &coefs, 8).err();
        assert!(matches!(err, Some(HashError::DuplicateKeyword { .. })));

        let err = search_sizes(&["if"], 6..=4, &coefs, 8).err();
        assert!(matches!(err, Some(HashError::InvalidTableBits { bits: 6 })));
    }
}
