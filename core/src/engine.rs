use crate::errors::RegistryError;
use crate::lexer::Lexer;
use crate::lexer::identifiers::{IdentifierRegistry, Role};
use crate::lexer::options::LexerOptions;

/// Reusable lexer configuration: options plus names every lexer it creates
/// starts out knowing.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: LexerOptions,
    registry: IdentifierRegistry,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: LexerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>) -> Result<Self, RegistryError> {
        self.registry.register(name, Role::Variable)?;
        Ok(self)
    }

    pub fn with_function(mut self, name: impl Into<String>) -> Result<Self, RegistryError> {
        self.registry.register(name, Role::Function)?;
        Ok(self)
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    /// A fresh lexer over `input` seeded with this engine's names and
    /// options. More names can still be registered on it.
    pub fn lexer(&self, name: impl Into<String>, input: impl Into<String>) -> Lexer {
        Lexer::with_registry(name, input, self.registry.clone()).with_options(self.options.clone())
    }
}
