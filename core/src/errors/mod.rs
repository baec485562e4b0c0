mod hash_error;
mod registry_error;
mod scan_error;

pub use hash_error::{HashError, KeywordError};
pub use registry_error::RegistryError;
pub use scan_error::{ScanError, ScanErrorKind};

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type wrapping all matlex errors.
#[derive(Debug, Error, Diagnostic)]
pub enum MatlexError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Keyword(#[from] KeywordError),
}
