//! Error handling for the Slate frontend

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Lexical error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unterminated block comment")]
    UnterminatedComment { span: Span },

    #[error("Invalid integer literal: {text}")]
    InvalidNumber { text: String, span: Span },

    #[error("Unexpected character: '{found}'")]
    UnexpectedChar { found: char, span: Span },
}

/// Syntax error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token: expected {expected}, got {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: String, span: Span },
}

/// Any error the frontend can surface to its caller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl LexError {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::UnterminatedComment { span } => *span,
            Self::InvalidNumber { span, .. } => *span,
            Self::UnexpectedChar { span, .. } => *span,
        }
    }
}

impl ParseError {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. } => *span,
            Self::UnexpectedEndOfInput { span, .. } => *span,
        }
    }
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span(),
            Self::Parse(e) => e.span(),
        }
    }
}
