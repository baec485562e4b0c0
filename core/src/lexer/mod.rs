pub mod cursor;
pub mod identifiers;
pub mod meta_stack;
mod number_ident_scanner;
pub mod options;
pub mod scanner;
pub mod stream;
pub mod token;

use crate::errors::{MatlexError, RegistryError};
use identifiers::{IdentifierRegistry, Role};
use options::LexerOptions;
use scanner::Scanner;
use stream::TokenStream;
use token::{Token, TokenKind};

/// A named expression plus the names it may reference.
///
/// Names are registered first; scanning then happens either on demand
/// through [`Lexer::scanner`] or on a producer thread through
/// [`Lexer::spawn`].
#[derive(Debug, Clone)]
pub struct Lexer {
    name: String,
    input: String,
    registry: IdentifierRegistry,
    options: LexerOptions,
}

impl Lexer {
    /// Creates a lexer for `input`. `name` only shows up in diagnostics.
    pub fn new(name: impl Into<String>, input: impl Into<String>) -> Self {
        Self::with_registry(name, input, IdentifierRegistry::new())
    }

    pub(crate) fn with_registry(
        name: impl Into<String>,
        input: impl Into<String>,
        registry: IdentifierRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            registry,
            options: LexerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LexerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn register_variable(&mut self, name: impl Into<String>) -> Result<(), RegistryError> {
        self.registry.register(name, Role::Variable)
    }

    pub fn register_function(&mut self, name: impl Into<String>) -> Result<(), RegistryError> {
        self.registry.register(name, Role::Function)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// Starts a pull-based scan over the input.
    pub fn scanner(&self) -> Scanner<'_> {
        tracing::debug!(source = %self.name, len = self.input.len(), "scan started");
        Scanner::new(&self.input, self.registry.clone(), self.options.clone())
    }

    /// Runs the scan on its own thread, delivering tokens through a bounded
    /// channel.
    pub fn spawn(self) -> TokenStream {
        stream::spawn(self)
    }
}

/// Tokenize `source` with the given variable and function names.
///
/// Returns every token up to and including `Eof`, or the error that
/// stopped the scan.
pub fn lex(source: &str, variables: &[&str], functions: &[&str]) -> Result<Vec<Token>, MatlexError> {
    let mut lexer = Lexer::new("input", source);
    for name in variables {
        lexer.register_variable(*name)?;
    }
    for name in functions {
        lexer.register_function(*name)?;
    }

    let mut scanner = lexer.scanner();
    let tokens: Vec<Token> = scanner.by_ref().collect();
    if let Some(err) = scanner.take_error() {
        return Err(err.into());
    }
    debug_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    Ok(tokens)
}
