pub mod reporting;
use crate::compiler::source::Location;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort the compilation of a unit.
///
/// Only `SyntaxError` is recoverable: the parser uses it to decide that an
/// optional production is absent. The other variants always abort.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("lexical error at line {}: {}", .0.location.line, .0.content)]
    LexError(Detail),
    #[error("syntax error at line {}: {}", .0.location.line, .0.content)]
    SyntaxError(Detail),
    #[error("semantic error at line {}: {}", .0.location.line, .0.content)]
    SemanticError(Detail),
}

impl Error {
    pub fn lex_error<M: Into<String>>(message: M, location: Location) -> Self {
        Error::LexError(Detail::new(message, location))
    }

    pub fn syntax_error<M: Into<String>>(message: M, location: Location) -> Self {
        Error::SyntaxError(Detail::new(message, location))
    }

    pub fn semantic_error<M: Into<String>>(message: M, location: Location) -> Self {
        Error::SemanticError(Detail::new(message, location))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub content: String,
    pub location: Location,
}

impl Detail {
    pub fn new<Content: Into<String>>(content: Content, location: Location) -> Self {
        Self {
            content: content.into(),
            location,
        }
    }
}
