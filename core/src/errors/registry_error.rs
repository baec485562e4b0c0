use miette::Diagnostic;
use thiserror::Error;

use crate::lexer::identifiers::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RegistryError {
    #[error("'{name}' is already registered as a {existing}, cannot register it as a {requested}")]
    #[diagnostic(help("each name maps to exactly one role for the whole scan"))]
    DuplicateConflict {
        name: String,
        existing: Role,
        requested: Role,
    },
}
