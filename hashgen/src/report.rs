use colored::Colorize;
use matlex::errors::KeywordError;
use matlex::keywords::{CombineOp, HashSolution, KeywordTableArtifact};
use serde::Serialize;

use crate::search::{SearchSummary, SizeOutcome};

/// Everything hashgen prints, in the shape emitted as YAML.
#[derive(Debug, Serialize)]
pub struct Report {
    pub keywords: Vec<String>,
    pub sizes: Vec<SizeOutcome>,
    pub total_attempts: usize,
    pub table: Option<KeywordTableArtifact>,
}

impl Report {
    pub fn build(keywords: &[&str], summary: &SearchSummary) -> Result<Self, KeywordError> {
        let table = summary
            .best()
            .map(|solution| solution.artifact(keywords))
            .transpose()?;
        Ok(Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            sizes: summary.outcomes.clone(),
            total_attempts: summary.total_attempts(),
            table,
        })
    }
}

pub fn to_yaml(report: &Report) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(report)
}

pub fn print_text(report: &Report, best: Option<&HashSolution>) {
    println!(
        "{} {} keywords: {}\n",
        "Hashing".bold().cyan(),
        report.keywords.len(),
        report.keywords.join(" ")
    );

    for size in &report.sizes {
        let status = if size.found() {
            "found".green().bold()
        } else {
            "exhausted".red()
        };
        println!(
            "  2^{:<3}{:>6} slots  {:>10} attempts  {}",
            size.table_bits,
            1usize << size.table_bits,
            size.attempts,
            status
        );
    }

    println!("\n{}", "=".repeat(60));
    println!(
        "Total attempts: {}",
        report.total_attempts.to_string().yellow().bold()
    );
    println!("{}", "=".repeat(60));

    let (Some(solution), Some(table)) = (best, report.table.as_ref()) else {
        return;
    };

    println!(
        "\n{} 2^{} = {} slots",
        "Smallest table:".green().bold(),
        solution.table_bits,
        solution.table_size()
    );
    println!("\n{}", "Coefficients".bold());
    let last = solution.coefs.len().saturating_sub(1);
    for (i, coef) in solution.coefs.iter().enumerate() {
        let term = if i == last {
            "len".to_string()
        } else {
            format!("byte[{}]", coef.index_applied)
        };
        println!(
            "  {:<10} x {:<6} {}",
            term,
            coef.value,
            if i == last { "" } else { op_symbol(coef.op) }
        );
    }

    println!("\n{}", "Slots".bold());
    for (slot, keyword) in table.slots.iter().enumerate() {
        if let Some(keyword) = keyword {
            println!("  {:>4}  {}", slot, keyword.cyan());
        }
    }
}

fn op_symbol(op: CombineOp) -> &'static str {
    match op {
        CombineOp::Add => "+",
        CombineOp::Xor => "^",
        CombineOp::Mul => "*",
    }
}
