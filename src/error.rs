use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error raised during query construction.
///
/// Generation itself is infallible; errors only arise from inputs that
/// cannot produce well-formed SQL, such as a values relation with no
/// columns or an out-of-range date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    pub kind: ErrorKind,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A builder was given inputs that cannot form a valid query.
    InvalidQuery,
    /// A literal value cannot be represented in SQL.
    InvalidLiteral,
}

impl Error {
    pub fn new(kind: ErrorKind, reason: impl Into<String>) -> Self {
        Error {
            kind,
            reason: reason.into(),
        }
    }

    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidQuery, reason)
    }

    pub fn invalid_literal(reason: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidLiteral, reason)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for Error {}
