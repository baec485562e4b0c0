use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use matlex::keywords::CombineOp;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "hashgen",
    version,
    about = "Search for a collision-free keyword hash table"
)]
pub struct Cli {
    /// Keywords to place in the table (defaults to `if else for`)
    pub keywords: Vec<String>,

    /// Read whitespace-separated keywords from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Smallest table size to try, as a power of two
    #[arg(long, default_value_t = 4)]
    pub min_bits: u32,

    /// Largest table size to try, as a power of two
    #[arg(long, default_value_t = 10)]
    pub max_bits: u32,

    /// Upper bound for every coefficient
    #[arg(long, default_value_t = 32)]
    pub max_coef: u32,

    /// Byte positions folded into the hash; negative counts from the end
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [0isize, 1],
        allow_negative_numbers = true
    )]
    pub indices: Vec<isize>,

    #[arg(long, value_enum, default_value_t = Op::Add)]
    pub op: Op,

    /// Let coefficients take any value instead of powers of two
    #[arg(long, default_value_t = false)]
    pub no_pow2: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Tracing filter, e.g. `matlex=debug`
    #[arg(long)]
    pub log: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Xor,
    Mul,
}

impl From<Op> for CombineOp {
    fn from(op: Op) -> Self {
        match op {
            Op::Add => CombineOp::Add,
            Op::Xor => CombineOp::Xor,
            Op::Mul => CombineOp::Mul,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Yaml,
}
