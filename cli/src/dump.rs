use std::io::{self, Write};

use clap::ValueEnum;
use matlex::keywords::{KeywordToken, Tok};
use matlex::{Token, TokenKind};
use serde::Serialize;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `text<TAB>Kind`, one token per line
    Text,
    /// One JSON object per line
    Json,
}

/// What a dump saw, for the exit status and the closing summary.
#[derive(Debug, Default)]
pub struct DumpSummary {
    pub tokens: usize,
    pub skipped_text: usize,
    pub error: Option<Token>,
}

/// Writes tokens until the terminal one. Text tokens are counted but not
/// listed in text output; the error token is handed back for rendering.
pub fn dump_tokens<I, W>(tokens: I, out: &mut W, format: Format) -> io::Result<DumpSummary>
where
    I: IntoIterator<Item = Token>,
    W: Write + ?Sized,
{
    let mut summary = DumpSummary::default();
    for token in tokens {
        if format == Format::Json && token.kind != TokenKind::Error {
            serde_json::to_writer(&mut *out, &token)?;
            writeln!(out)?;
        }
        match token.kind {
            TokenKind::Error => {
                summary.error = Some(token);
                break;
            }
            TokenKind::Text => summary.skipped_text += 1,
            TokenKind::Eof => {
                if format == Format::Text {
                    writeln!(
                        out,
                        "EOF\t{} tokens, {} text skipped",
                        summary.tokens, summary.skipped_text
                    )?;
                }
                break;
            }
            _ => {
                summary.tokens += 1;
                if format == Format::Text {
                    writeln!(out, "{}\t{}", token.text, token.kind.name())?;
                }
            }
        }
    }
    out.flush()?;
    Ok(summary)
}

#[derive(Serialize)]
struct KeywordRecord<'a> {
    kind: Tok,
    text: &'a str,
    line: usize,
    col: usize,
}

/// Writes fixed-keyword tokens and returns the illegal ones.
pub fn dump_keyword_tokens<'src, I, W>(
    tokens: I,
    out: &mut W,
    format: Format,
) -> io::Result<Vec<KeywordToken<'src>>>
where
    I: IntoIterator<Item = KeywordToken<'src>>,
    W: Write + ?Sized,
{
    let mut illegal = Vec::new();
    for token in tokens {
        match format {
            Format::Text => writeln!(
                out,
                "{}:{}\t{:?}\t{}",
                token.line,
                token.col,
                token.kind,
                token.text.escape_debug()
            )?,
            Format::Json => {
                let record = KeywordRecord {
                    kind: token.kind,
                    text: token.text,
                    line: token.line,
                    col: token.col,
                };
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }
        if token.kind == Tok::Illegal {
            illegal.push(token);
        }
    }
    out.flush()?;
    Ok(illegal)
}
