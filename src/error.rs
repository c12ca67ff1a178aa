// error.rs

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was absent, zero-length, or produced no tokens.
    #[error("command provided is empty")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, ParseError>;
