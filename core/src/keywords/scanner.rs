use super::table::{KeywordTable, keyword_table};
use super::token::{Tok, lookup_single_char};
use crate::diagnostics::LineCol;
use crate::errors::KeywordError;
use crate::lexer::cursor::Cursor;

/// A token of the fixed-keyword scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordToken<'src> {
    pub kind: Tok,
    /// Byte offset of the first character.
    pub start: usize,
    pub text: &'src str,
    pub line: usize,
    pub col: usize,
}

/// Scanner for a language with a small fixed keyword set.
///
/// Identifiers are classified through the perfect-hash [`KeywordTable`];
/// everything else is a single character. Spaces, tabs and carriage returns
/// are skipped; newlines are tokens.
pub struct KeywordLexer<'src> {
    cursor: Cursor<'src>,
    table: &'static KeywordTable,
    source: String,
    line: usize,
    col: usize,
    done: bool,
}

impl<'src> KeywordLexer<'src> {
    pub fn new(source: impl Into<String>, input: &'src str) -> Result<Self, KeywordError> {
        let source = source.into();
        if source.is_empty() {
            return Err(KeywordError::EmptySourceName);
        }
        Ok(Self {
            cursor: Cursor::new(input),
            table: keyword_table()?,
            source,
            line: 1,
            col: 1,
            done: false,
        })
    }

    /// Current position in the source.
    pub fn line_col(&self) -> LineCol {
        LineCol {
            source: self.source.clone(),
            line: self.line,
            col: self.col,
        }
    }

    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// Scans the next token. Once `Eof` is returned it is returned forever.
    pub fn next_token(&mut self) -> KeywordToken<'src> {
        self.skip_whitespace();
        let start = self.cursor.pos();
        let (line, col) = (self.line, self.col);

        let kind = match self.advance() {
            None => Tok::Eof,
            Some(ch) => match lookup_single_char(ch) {
                Some(tok) => tok,
                None if is_identifier_char(ch) => {
                    while self.cursor.peek().is_some_and(is_identifier_char) {
                        self.advance();
                    }
                    self.table.lookup(self.cursor.slice_from(start))
                }
                None => Tok::Illegal,
            },
        };

        KeywordToken {
            kind,
            start,
            text: self.cursor.slice_from(start),
            line,
            col,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.cursor.advance()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.cursor.peek().is_some_and(is_whitespace) {
            self.advance();
        }
    }
}

impl<'src> Iterator for KeywordLexer<'src> {
    type Item = KeywordToken<'src>;

    /// Yields tokens through `Eof`, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        self.done = token.kind == Tok::Eof;
        Some(token)
    }
}

/// Digits may start a run too, so `12` is one `Ident`.
fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r')
}
