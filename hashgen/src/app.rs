use std::fs;
use std::process;
use std::sync::Once;
use std::time::Instant;

use clap::Parser;
use colored::Colorize;
use matlex::keywords::token::KEYWORDS;

use crate::cli::{Cli, Format};
use crate::report::{self, Report};
use crate::search::{search_sizes, template};

static TRACING_INIT: Once = Once::new();

/// Installs the fmt subscriber when `--log` is given or `RUST_LOG` is set.
fn init_tracing(filter: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = match filter {
            Some(directives) => EnvFilter::new(directives),
            None if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            None => return,
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}

pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());
    let start = Instant::now();

    let owned = load_keywords(&cli).unwrap_or_else(|err| fail(&err));
    let keywords: Vec<&str> = owned.iter().map(String::as_str).collect();
    tracing::debug!(count = keywords.len(), "keyword set loaded");

    let coefs = template(&cli.indices, cli.op.into(), !cli.no_pow2);
    let summary = search_sizes(&keywords, cli.min_bits..=cli.max_bits, &coefs, cli.max_coef)
        .unwrap_or_else(|err| fail(&err.to_string()));
    let report = Report::build(&keywords, &summary).unwrap_or_else(|err| fail(&err.to_string()));

    match cli.format {
        Format::Text => {
            report::print_text(&report, summary.best());
            println!("Completed in {:.2}s", start.elapsed().as_secs_f64());
        }
        Format::Yaml => match report::to_yaml(&report) {
            Ok(yaml) => print!("{yaml}"),
            Err(err) => fail(&err.to_string()),
        },
    }

    if report.table.is_none() {
        eprintln!(
            "{} no collision-free table between 2^{} and 2^{}",
            "error:".red().bold(),
            cli.min_bits,
            cli.max_bits
        );
        process::exit(1);
    }
}

fn load_keywords(cli: &Cli) -> Result<Vec<String>, String> {
    let mut keywords = cli.keywords.clone();
    if let Some(path) = &cli.file {
        let content = fs::read_to_string(path)
            .map_err(|err| format!("could not read '{}': {err}", path.display()))?;
        keywords.extend(content.split_whitespace().map(str::to_string));
    }
    if keywords.is_empty() {
        keywords = KEYWORDS
            .iter()
            .filter_map(|tok| tok.keyword_text())
            .map(str::to_string)
            .collect();
    }
    Ok(keywords)
}

fn fail(message: &str) -> ! {
    eprintln!("{} {message}", "error:".red().bold());
    process::exit(1);
}
