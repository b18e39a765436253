//! Error type for the core term, graph, canonicalization and serialization operations.

use std::fmt;

/// Errors raised by the core operations of this crate.
#[derive(Debug)]
pub enum Error {
    /// The sink (or source) failed while reading or writing.
    Io(std::io::Error),
    /// A term could not cross the boundary to or from an external RDF model.
    InvalidTerm(String),
    /// Blank node splitting did not reach a fixpoint within its iteration bound.
    Diverged { rounds: usize },
    /// A producer field failed validation.
    InvalidField { field: &'static str, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "{}", e),
            Error::InvalidTerm(m) => write!(f, "invalid term: {}", m),
            Error::Diverged { rounds } => write!(
                f,
                "blank node splitting did not converge after {} rounds",
                rounds
            ),
            Error::InvalidField { field, value } => {
                write!(f, "invalid value for field '{}': {:?}", field, value)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
