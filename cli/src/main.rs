use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Once;

use clap::Parser;
use matlex::diagnostics::{LineCol, SourceMap};
use matlex::keywords::KeywordLexer;
use matlex::lexer::options::{LexerOptions, UnknownCharPolicy};
use matlex::{Engine, MatlexError, Token};
use owo_colors::OwoColorize;

mod dump;
mod repl;

use dump::{Format, dump_keyword_tokens, dump_tokens};

#[derive(Parser)]
#[command(name = "matlex", about = "Tokenize MATLAB-style expressions")]
struct Cli {
    /// Path to a file holding the expression
    file: Option<PathBuf>,
    /// Tokenize an inline expression
    #[arg(long)]
    eval: Option<String>,
    /// Register a variable name (repeatable)
    #[arg(long = "var", value_name = "NAME")]
    vars: Vec<String>,
    /// Register a function name (repeatable)
    #[arg(long = "func", value_name = "NAME")]
    funcs: Vec<String>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Write tokens here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// Scan on a producer thread and drain the token channel
    #[arg(long)]
    stream: bool,
    /// Use the fixed-keyword scanner
    #[arg(long)]
    keywords: bool,
    /// Fail on characters the scanner does not recognize
    #[arg(long)]
    reject_unknown: bool,
    /// Tracing filter, e.g. `matlex=trace`
    #[arg(long)]
    log: Option<String>,
    /// Print version and exit
    #[arg(long)]
    version: bool,
}

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
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(filter)
            .init();
    });
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!(
            "{} {}",
            "matlex".bright_cyan().bold(),
            env!("CARGO_PKG_VERSION").bright_black()
        );
        return;
    }

    init_tracing(cli.log.as_deref());
    let engine = build_engine(&cli).unwrap_or_else(|err| fail(&err.to_string()));

    let (source, source_name) = match (&cli.eval, &cli.file) {
        (Some(code), _) => (code.clone(), "<eval>".to_string()),
        (None, Some(file)) => match fs::read_to_string(file) {
            Ok(s) => (s, file.display().to_string()),
            Err(e) => fail(&format!(
                "could not read '{}': {e}",
                file.display().yellow()
            )),
        },
        (None, None) => {
            if let Err(err) = repl::run(engine) {
                fail(&err.to_string());
            }
            return;
        }
    };

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => fail(&format!("could not create '{}': {e}", path.display())),
        },
        None => Box::new(io::stdout().lock()),
    };

    let ok = if cli.keywords {
        run_keywords(&source, &source_name, &mut out, cli.format)
    } else {
        run_tokens(&engine, &cli, &source, &source_name, &mut out)
    };
    match ok {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => fail(&format!("could not write tokens: {err}")),
    }
}

fn build_engine(cli: &Cli) -> Result<Engine, MatlexError> {
    let policy = if cli.reject_unknown {
        UnknownCharPolicy::Reject
    } else {
        UnknownCharPolicy::Accumulate
    };
    let mut engine =
        Engine::new().with_options(LexerOptions::new().with_unknown_chars(policy));
    for name in &cli.vars {
        engine = engine.with_variable(name.as_str())?;
    }
    for name in &cli.funcs {
        engine = engine.with_function(name.as_str())?;
    }
    Ok(engine)
}

/// Dumps the token stream. Returns `Ok(false)` when the scan failed.
fn run_tokens(
    engine: &Engine,
    cli: &Cli,
    source: &str,
    source_name: &str,
    out: &mut dyn Write,
) -> io::Result<bool> {
    let lexer = engine.lexer(source_name, source);
    let summary = if cli.stream {
        let mut stream = lexer.spawn();
        let summary = dump_tokens(stream.by_ref(), out, cli.format)?;
        let outcome = stream.join();
        tracing::debug!(?outcome, "producer joined");
        summary
    } else {
        dump_tokens(lexer.scanner(), out, cli.format)?
    };

    match summary.error {
        Some(error) => {
            eprintln!("{}", format_scan_error(source, source_name, &error));
            Ok(false)
        }
        None => Ok(true),
    }
}

fn run_keywords(
    source: &str,
    source_name: &str,
    out: &mut dyn Write,
    format: Format,
) -> io::Result<bool> {
    let lexer = match KeywordLexer::new(source_name, source) {
        Ok(lexer) => lexer,
        Err(err) => fail(&err.to_string()),
    };
    let illegal = dump_keyword_tokens(lexer, out, format)?;
    for token in &illegal {
        let at = LineCol {
            source: source_name.to_string(),
            line: token.line,
            col: token.col,
        };
        eprintln!(
            "{} {}: illegal character {:?}",
            "error".red().bold(),
            at.to_string().cyan(),
            token.text
        );
    }
    Ok(illegal.is_empty())
}

fn format_scan_error(source: &str, source_name: &str, error: &Token) -> String {
    let map = SourceMap::from_source(source);
    let at = map.locate(source_name, error.span.start);
    let mut message = format!(
        "{} at {}: {}",
        "scan error".red().bold(),
        at.to_string().cyan(),
        error.text.bright_white()
    );
    if let Some(line) = map.line_span(at.line) {
        let caret = " ".repeat(at.col.saturating_sub(1));
        message.push_str(&format!("\n  {}\n  {caret}{}", &source[line], "^".red().bold()));
    }
    message
}

fn fail(message: &str) -> ! {
    eprintln!("{} {message}", "error:".red().bold());
    process::exit(1);
}
