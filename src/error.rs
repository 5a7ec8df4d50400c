//! Error types for sqlit.

use thiserror::Error;

use crate::parser::Command;

/// Why a single line failed to parse.
///
/// Produced instead of a [`Query`](crate::ast::Query), never alongside one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line was empty or whitespace only.
    #[error("no input")]
    EmptyInput,

    /// The leading token is not a known command.
    #[error("unrecognized command `{0}`")]
    UnrecognizedCommand(String),

    /// A structural keyword was absent or out of place.
    #[error("expected `{0}` clause")]
    MissingClause(&'static str),

    /// A clause keyword was present but no table followed it.
    #[error("expected table name after `{0}`")]
    MissingTable(&'static str),

    /// An insert chunk was not of the form `column=value`.
    #[error("expected `column=value`, found `{0}`")]
    InvalidAssignment(String),

    /// Tokens left over after a complete command.
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),

    /// The command is known but has no grammar yet.
    #[error("`{0}` is not implemented yet")]
    NotImplemented(Command),
}

/// Fieldless classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    EmptyInput,
    UnrecognizedCommand,
    MissingClause,
    MissingTable,
    InvalidAssignment,
    UnexpectedToken,
    NotImplemented,
}

impl ParseError {
    /// The kind of this error, without its payload.
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::EmptyInput => ParseErrorKind::EmptyInput,
            Self::UnrecognizedCommand(_) => ParseErrorKind::UnrecognizedCommand,
            Self::MissingClause(_) => ParseErrorKind::MissingClause,
            Self::MissingTable(_) => ParseErrorKind::MissingTable,
            Self::InvalidAssignment(_) => ParseErrorKind::InvalidAssignment,
            Self::UnexpectedToken(_) => ParseErrorKind::UnexpectedToken,
            Self::NotImplemented(_) => ParseErrorKind::NotImplemented,
        }
    }
}

/// The crate-level error type.
#[derive(Debug, Error)]
pub enum SqlitError {
    /// Failed to parse a command line.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output could not be rendered.
    #[error("Render error: {0}")]
    Render(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sqlit operations.
pub type SqlitResult<T> = Result<T, SqlitError>;
