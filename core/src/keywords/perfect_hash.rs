//! Offline search for a collision-free keyword hash.
//!
//! The hash of a keyword `s` is
//!
//! ```text
//! H(s) = len(s) * c_last  (op_0)  s[i_0] * c_0  (op_1)  s[i_1] * c_1 ...
//! ```
//!
//! masked to the table size, where each `op` is add, xor or multiply. The
//! search walks the coefficients like an odometer: bump coefficient 0, and
//! when it saturates reset it and carry into coefficient 1, and so on. The
//! first assignment that puts every keyword in its own slot wins.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::errors::{HashError, KeywordError};

/// How a coefficient's term folds into the running hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineOp {
    #[default]
    Add,
    Xor,
    Mul,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coef {
    /// Byte index the coefficient multiplies. Negative values index from the
    /// end. Ignored on the last coefficient, which multiplies the length.
    pub index_applied: isize,
    pub value: u32,
    /// Zero means "use the finder's default maximum".
    pub max_value: u32,
    /// Zero means 1.
    pub start_value: u32,
    /// Step through powers of two only. Much faster, but limiting with many
    /// keywords.
    pub only_pow2: bool,
    pub op: CombineOp,
}

impl Coef {
    pub fn at(index_applied: isize) -> Self {
        Self {
            index_applied,
            value: 1,
            max_value: 0,
            start_value: 0,
            only_pow2: false,
            op: CombineOp::Add,
        }
    }

    pub fn with_op(mut self, op: CombineOp) -> Self {
        self.op = op;
        self
    }

    pub fn with_max(mut self, max_value: u32) -> Self {
        self.max_value = max_value;
        self
    }

    pub fn starting_at(mut self, start_value: u32) -> Self {
        self.start_value = start_value;
        self
    }

    pub fn pow2(mut self) -> Self {
        self.only_pow2 = true;
        self
    }

    fn init(&mut self) {
        self.value = if self.start_value == 0 {
            1
        } else {
            self.start_value
        };
    }

    /// Steps to the next candidate. Returns false when the step overflows
    /// `u32`, which counts as past any maximum.
    fn increment(&mut self) -> bool {
        let next = if self.only_pow2 {
            self.value.checked_mul(2)
        } else {
            self.value.checked_add(1)
        };
        match next {
            Some(value) => {
                self.value = value;
                true
            }
            None => false,
        }
    }

    fn saturated(&self) -> bool {
        self.value >= self.max_value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub table_bits: u32,
    pub default_max_coef: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            table_bits: 4,
            default_max_coef: 32,
        }
    }
}

/// Reusable search driver. Holds a scratch table so repeated searches do not
/// reallocate.
#[derive(Debug, Clone, Default)]
pub struct PerfectHashFinder {
    config: SearchConfig,
    scratch: Vec<bool>,
    attempts: usize,
}

impl PerfectHashFinder {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            scratch: Vec::new(),
            attempts: 0,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_table_bits(&mut self, table_bits: u32) {
        self.config.table_bits = table_bits;
    }

    /// Assignments tried by the most recent search, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Searches coefficient values giving every keyword a distinct slot.
    ///
    /// On success `coefs` holds the winning values and the number of
    /// attempts is returned. [`HashError::NoCoefficientsFound`] means the
    /// space is exhausted for this table size.
    pub fn search(&mut self, coefs: &mut [Coef], keywords: &[&str]) -> Result<usize, HashError> {
        let bits = self.config.table_bits;
        if bits == 0 || bits > 32 {
            return Err(HashError::InvalidTableBits { bits });
        } else if coefs.is_empty() {
            return Err(HashError::NoCoefficients);
        } else if keywords.is_empty() {
            return Err(HashError::NoInputs);
        }
        let mut seen = HashSet::with_capacity(keywords.len());
        for keyword in keywords {
            if !seen.insert(*keyword) {
                return Err(HashError::DuplicateKeyword {
                    keyword: keyword.to_string(),
                });
            }
        }
        self.configure_coefs_with_defaults(coefs)?;

        let size = 1usize << bits;
        let mask = mask_for(bits);
        self.scratch.clear();
        self.scratch.resize(size, false);

        let last = coefs.len() - 1;
        self.attempts = 0;
        loop {
            self.attempts += 1;
            self.scratch.fill(false);
            let collision_free = keywords.iter().all(|kw| {
                let slot = hash(coefs, mask, kw.as_bytes());
                !std::mem::replace(&mut self.scratch[slot], true)
            });
            if collision_free {
                tracing::debug!(bits, attempts = self.attempts, "perfect hash found");
                return Ok(self.attempts);
            }

            let mut overflowed = !coefs[0].increment();
            let mut i = 0;
            while i < last && (overflowed || coefs[i].saturated()) {
                coefs[i].init();
                overflowed = !coefs[i + 1].increment();
                i += 1;
            }
            if overflowed || coefs[last].value > coefs[last].max_value {
                break;
            }
        }
        tracing::debug!(bits, attempts = self.attempts, "coefficient space exhausted");
        Err(HashError::NoCoefficientsFound)
    }

    /// Resets every coefficient to its start value and fills in missing
    /// maximums from the default.
    pub fn configure_coefs_with_defaults(&self, coefs: &mut [Coef]) -> Result<(), HashError> {
        for (index, coef) in coefs.iter_mut().enumerate() {
            coef.init();
            if coef.max_value == 0 {
                if self.config.default_max_coef == 0 {
                    return Err(HashError::MissingMaxCoef { index });
                }
                coef.max_value = self.config.default_max_coef;
            }
        }
        Ok(())
    }

    pub fn apply(&self, coefs: &[Coef], keyword: &str) -> usize {
        hash(coefs, mask_for(self.config.table_bits), keyword.as_bytes())
    }

    /// Snapshot of `coefs` at this finder's table size.
    pub fn solution(&self, coefs: &[Coef]) -> HashSolution {
        HashSolution {
            table_bits: self.config.table_bits,
            coefs: coefs.to_vec(),
        }
    }
}

/// A hash function found by the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashSolution {
    pub table_bits: u32,
    pub coefs: Vec<Coef>,
}

impl HashSolution {
    pub fn table_size(&self) -> usize {
        1 << self.table_bits
    }

    pub fn slot(&self, keyword: &str) -> usize {
        hash(&self.coefs, mask_for(self.table_bits), keyword.as_bytes())
    }

    /// Places every keyword in its slot.
    pub fn layout<'k>(&self, keywords: &[&'k str]) -> Result<Vec<Option<&'k str>>, KeywordError> {
        let mut slots = vec![None; self.table_size()];
        for keyword in keywords {
            let slot = self.slot(keyword);
            if let Some(other) = slots[slot] {
                return Err(KeywordError::ImperfectHash {
                    keyword: keyword.to_string(),
                    other: String::from(other),
                    slot,
                });
            }
            slots[slot] = Some(*keyword);
        }
        Ok(slots)
    }

    pub fn artifact(&self, keywords: &[&str]) -> Result<KeywordTableArtifact, KeywordError> {
        let slots = self
            .layout(keywords)?
            .into_iter()
            .map(|slot| slot.map(str::to_string))
            .collect();
        Ok(KeywordTableArtifact {
            table_bits: self.table_bits,
            coefs: self.coefs.clone(),
            slots,
        })
    }
}

/// The build-time output of a search: coefficients plus slot layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordTableArtifact {
    pub table_bits: u32,
    pub coefs: Vec<Coef>,
    pub slots: Vec<Option<String>>,
}

/// Escalates the table size through `bits` until a search succeeds.
/// Returns the solution and the total number of attempts.
pub fn find_smallest(
    keywords: &[&str],
    bits: RangeInclusive<u32>,
    template: &[Coef],
    default_max_coef: u32,
) -> Result<(HashSolution, usize), HashError> {
    let mut finder = PerfectHashFinder::new(SearchConfig {
        table_bits: *bits.start(),
        default_max_coef,
    });
    let mut total = 0;
    for table_bits in bits {
        finder.set_table_bits(table_bits);
        let mut coefs = template.to_vec();
        match finder.search(&mut coefs, keywords) {
            Ok(attempts) => return Ok((finder.solution(&coefs), total + attempts)),
            Err(HashError::NoCoefficientsFound) => total += finder.attempts(),
            Err(err) => return Err(err),
        }
    }
    Err(HashError::NoCoefficientsFound)
}

fn mask_for(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

fn byte_at(keyword: &[u8], index: isize) -> u8 {
    let len = keyword.len();
    if index < 0 {
        let back = index.unsigned_abs();
        if back <= len {
            return keyword[len - back];
        }
        return 0;
    }
    keyword.get(index as usize).copied().unwrap_or(0)
}

/// Evaluates the hash of `keyword` under `coefs`, masked by `mask`.
pub fn hash(coefs: &[Coef], mask: u64, keyword: &[u8]) -> usize {
    let Some((len_coef, terms)) = coefs.split_last() else {
        return 0;
    };
    let mut h = (keyword.len() as u64).wrapping_mul(u64::from(len_coef.value));
    for coef in terms {
        let term = u64::from(byte_at(keyword, coef.index_applied)) * u64::from(coef.value);
        h = match coef.op {
            CombineOp::Add => h.wrapping_add(term),
            CombineOp::Xor => h ^ term,
            CombineOp::Mul => h.wrapping_mul(term),
        };
    }
    (h & mask) as usize
}
