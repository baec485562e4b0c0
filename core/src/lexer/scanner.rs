use std::collections::VecDeque;

use super::cursor::Cursor;
use super::identifiers::IdentifierRegistry;
use super::meta_stack::{ContextStack, Delimiter};
use super::options::{LexerOptions, UnknownCharPolicy};
use super::token::{Span, Token, TokenKind};
use crate::errors::{ScanError, ScanErrorKind};

pub(super) const LEFT_MAT: &str = "[";
pub(super) const RIGHT_MAT: &str = "]";
pub(super) const LEFT_FUNC: &str = "(";
pub(super) const LEFT_IDX: &str = "(";
pub(super) const LEFT_GROUP: &str = "(";
pub(super) const CLOSING: &str = ")";

/// Lexing states. Each one consumes input and names its successor; `None`
/// as a successor halts the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum State {
    Start,
    Alpha,
    FunctionOpen,
    Number,
    Operator,
    Separator,
    GroupOpen,
    MatrixOpen,
    MatrixClose,
    ClosingMeta,
    Eof,
}

pub(super) type StateResult = Result<Option<State>, ScanErrorKind>;

/// The state machine that turns an expression into tokens.
///
/// Tokens are produced on demand through [`Iterator`]: each call runs states
/// until at least one token is queued. The sequence always ends with exactly
/// one `Eof` or `Error` token.
pub struct Scanner<'src> {
    pub(super) cursor: Cursor<'src>,
    /// Start of the token being built.
    pub(super) start: usize,
    pub(super) registry: IdentifierRegistry,
    pub(super) stack: ContextStack,
    pub(super) last_function: String,
    options: LexerOptions,
    state: Option<State>,
    pending: VecDeque<Token>,
    error: Option<ScanError>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str, registry: IdentifierRegistry, options: LexerOptions) -> Self {
        Self {
            cursor: Cursor::new(source),
            start: 0,
            registry,
            stack: ContextStack::new(),
            last_function: String::new(),
            options,
            state: Some(State::Start),
            pending: VecDeque::with_capacity(2),
            error: None,
        }
    }

    /// The error that halted the scan, if any.
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<ScanError> {
        self.error.take()
    }

    /// Number of delimiters currently open.
    pub fn open_depth(&self) -> usize {
        self.stack.depth()
    }

    fn step(&mut self, state: State) -> StateResult {
        tracing::trace!(?state, pos = self.cursor.pos(), "enter state");
        match state {
            State::Start => self.lex_start(),
            State::Alpha => self.lex_alpha(),
            State::FunctionOpen => self.lex_function_open(),
            State::Number => self.lex_number(),
            State::Operator => self.lex_operator(),
            State::Separator => self.lex_separator(),
            State::GroupOpen => self.lex_group_open(),
            State::MatrixOpen => self.lex_matrix_open(),
            State::MatrixClose => self.lex_matrix_close(),
            State::ClosingMeta => self.lex_closing_meta(),
            State::Eof => self.lex_eof(),
        }
    }

    /// Queues a token covering the input from `start` to the cursor.
    pub(super) fn emit(&mut self, kind: TokenKind) {
        let pos = self.cursor.pos();
        let text = self.cursor.slice_from(self.start);
        tracing::trace!(%kind, text, "emit");
        self.pending
            .push_back(Token::new(kind, text, Span::new(self.start, pos)));
        self.start = pos;
    }

    /// Records `delimiter` as open and emits its opening token.
    pub(super) fn open(&mut self, delimiter: Delimiter) {
        self.stack.push(delimiter);
        self.emit(delimiter.open_kind());
    }

    /// Skips over the input consumed since the last token.
    fn ignore(&mut self) {
        self.start = self.cursor.pos();
    }

    /// Emits whatever unrecognized text came before this point.
    fn flush_text(&mut self) -> bool {
        if self.cursor.pos() > self.start {
            self.emit(TokenKind::Text);
            return true;
        }
        false
    }

    fn enter(&mut self, state: State) -> StateResult {
        self.flush_text();
        Ok(Some(state))
    }

    fn fail(&mut self, kind: ScanErrorKind) {
        let pos = self.cursor.pos();
        let err = ScanError::new(kind, self.cursor.source(), pos);
        tracing::debug!(offset = pos, reason = %err.kind, "scan failed");
        self.pending
            .push_back(Token::new(TokenKind::Error, err.to_string(), Span::new(pos, pos)));
        self.error = Some(err);
        self.state = None;
    }

    /// Base state. Matrix brackets and the generic closer are recognized
    /// before single characters are classified.
    fn lex_start(&mut self) -> StateResult {
        loop {
            let rest = self.cursor.rest();
            if rest.starts_with(LEFT_MAT) {
                return self.enter(State::MatrixOpen);
            } else if rest.starts_with(RIGHT_MAT) {
                return self.enter(State::MatrixClose);
            } else if rest.starts_with(CLOSING) {
                return self.enter(State::ClosingMeta);
            }
            match self.cursor.peek() {
                None => return Ok(Some(State::Eof)),
                Some(ch) if is_numeric(ch) => return self.enter(State::Number),
                Some(ch) if ch.is_ascii_alphabetic() => return self.enter(State::Alpha),
                Some(ch) if is_operator(ch) => return self.enter(State::Operator),
                Some(ch) if is_separator(ch) => return self.enter(State::Separator),
                Some('(') => return self.enter(State::GroupOpen),
                Some(ch) if self.options.skip_whitespace() && is_space(ch) => {
                    self.flush_text();
                    self.cursor.advance();
                    self.ignore();
                }
                Some(ch) if is_space(ch) => {
                    self.cursor.advance();
                }
                Some(ch) => match self.options.unknown_chars() {
                    UnknownCharPolicy::Accumulate => {
                        self.cursor.advance();
                    }
                    UnknownCharPolicy::Reject => {
                        self.flush_text();
                        return Err(ScanErrorKind::UnknownCharacter { ch });
                    }
                },
            }
        }
    }

    fn lex_function_open(&mut self) -> StateResult {
        if self.cursor.eat_prefix(LEFT_FUNC) {
            self.open(Delimiter::Function);
            return Ok(Some(State::Start));
        }
        Err(ScanErrorKind::ExpectedFunctionOpen {
            name: std::mem::take(&mut self.last_function),
        })
    }

    fn lex_operator(&mut self) -> StateResult {
        if self.cursor.accept("+-*/^") {
            self.emit(TokenKind::Operator);
        } else if self.cursor.accept(":") {
            self.emit(TokenKind::Colon);
        } else {
            return Err(ScanErrorKind::UnknownOperator {
                ch: self.cursor.peek().unwrap_or('\0'),
            });
        }
        Ok(Some(State::Start))
    }

    fn lex_separator(&mut self) -> StateResult {
        if self.cursor.accept(",") {
            self.emit(TokenKind::Comma);
        } else if self.cursor.accept(";") {
            self.emit(TokenKind::Semicolon);
        } else {
            return Err(ScanErrorKind::UnknownSeparator {
                ch: self.cursor.peek().unwrap_or('\0'),
            });
        }
        Ok(Some(State::Start))
    }

    fn lex_group_open(&mut self) -> StateResult {
        if !self.cursor.eat_prefix(LEFT_GROUP) {
            return Err(ScanErrorKind::UnknownCharacter {
                ch: self.cursor.peek().unwrap_or('\0'),
            });
        }
        self.open(Delimiter::Group);
        Ok(Some(State::Start))
    }

    fn lex_matrix_open(&mut self) -> StateResult {
        self.cursor.eat_prefix(LEFT_MAT);
        self.open(Delimiter::Matrix);
        Ok(Some(State::Start))
    }

    fn lex_matrix_close(&mut self) -> StateResult {
        self.cursor.eat_prefix(RIGHT_MAT);
        self.stack.pop_expecting(Delimiter::Matrix)?;
        self.emit(TokenKind::RightMatMeta);
        Ok(Some(State::Start))
    }

    /// A bare `)` closes whatever call, index or group is innermost.
    fn lex_closing_meta(&mut self) -> StateResult {
        self.cursor.eat_prefix(CLOSING);
        let closing = match self.stack.peek() {
            Some(open @ (Delimiter::Function | Delimiter::Index | Delimiter::Group)) => open,
            open => {
                return Err(ScanErrorKind::MismatchedDelimiter {
                    closing: Delimiter::Group,
                    open,
                });
            }
        };
        self.stack.pop_expecting(closing)?;
        self.emit(closing.close_kind());
        Ok(Some(State::Start))
    }

    fn lex_eof(&mut self) -> StateResult {
        self.flush_text();
        self.emit(TokenKind::Eof);
        Ok(None)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            let state = self.state?;
            match self.step(state) {
                Ok(next) => self.state = next,
                Err(kind) => self.fail(kind),
            }
        }
    }
}

pub(super) fn is_numeric(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_operator(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '^' | ':')
}

fn is_separator(ch: char) -> bool {
    matches!(ch, ',' | ';')
}

fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}
