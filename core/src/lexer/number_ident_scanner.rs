use super::identifiers::Role;
use super::meta_stack::Delimiter;
use super::scanner::{LEFT_IDX, Scanner, State, StateResult, is_numeric};
use super::token::TokenKind;
use crate::errors::ScanErrorKind;

impl<'src> Scanner<'src> {
    /// Scans a registered name. Functions must be followed by their call
    /// delimiter; variables may open an index right away.
    pub(super) fn lex_alpha(&mut self) -> StateResult {
        self.cursor.eat_while(is_ident_continue);
        let name = self.cursor.slice_from(self.start);

        match self.registry.classify(name) {
            None => Err(ScanErrorKind::UndefinedIdentifier {
                name: name.to_string(),
            }),
            Some(Role::Function) => {
                self.last_function = name.to_string();
                self.emit(TokenKind::Function);
                Ok(Some(State::FunctionOpen))
            }
            Some(Role::Variable) => {
                self.emit(TokenKind::Variable);
                if self.cursor.eat_prefix(LEFT_IDX) {
                    self.open(Delimiter::Index);
                }
                Ok(Some(State::Start))
            }
        }
    }

    /// Decimal, fractional, exponent and imaginary literals: `3`, `+2.5`,
    /// `1e-3`, `4.2E+7i`.
    pub(super) fn lex_number(&mut self) -> StateResult {
        self.cursor.accept("+-");
        self.cursor.eat_while(is_numeric);
        if self.cursor.accept(".") {
            self.cursor.eat_while(is_numeric);
        }
        if self.cursor.accept("eE") {
            self.cursor.accept("+-");
            if !self.cursor.eat_while(is_numeric) {
                return Err(ScanErrorKind::MalformedExponent {
                    text: self.cursor.slice_from(self.start).to_string(),
                });
            }
        }
        self.cursor.accept("i");

        if self.cursor.peek().is_some_and(|ch| ch.is_ascii_alphanumeric()) {
            self.cursor.advance();
            return Err(ScanErrorKind::MalformedNumber {
                text: self.cursor.slice_from(self.start).to_string(),
            });
        }
        self.emit(TokenKind::Number);
        Ok(Some(State::Start))
    }
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
