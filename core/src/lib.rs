pub mod diagnostics;
pub mod engine;
pub mod errors;
pub mod keywords;
pub mod lexer;

pub use engine::Engine;
pub use errors::MatlexError;
pub use lexer::Lexer;
pub use lexer::token::{Token, TokenKind};

