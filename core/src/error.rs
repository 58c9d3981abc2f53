use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    /// Malformed query input, e.g. a zero limit or a negative offset
    #[error("Validation error: {0}")]
    Validation(String),

    /// No rows returned when exactly one was expected
    #[error("No rows found")]
    NotFound,

    /// More than one row returned for a single-result query
    #[error("Expected a single row, found {0}")]
    TooManyResults(usize),

    /// A result column could not be mapped onto the requested shape
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Numeric value out of range for the target type
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Backing store failure
    #[cfg(feature = "rusqlite")]
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Coarse classification of a [`RosterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    TooManyResults,
    Mapping,
    Store,
}

impl RosterError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            RosterError::Validation(_) => ErrorKind::Validation,
            RosterError::NotFound => ErrorKind::NotFound,
            RosterError::TooManyResults(_) => ErrorKind::TooManyResults,
            RosterError::Mapping(_) | RosterError::Conversion(_) => ErrorKind::Mapping,
            #[cfg(feature = "rusqlite")]
            RosterError::Store(_) => ErrorKind::Store,
        }
    }
}

impl From<core::num::TryFromIntError> for RosterError {
    fn from(value: core::num::TryFromIntError) -> Self {
        RosterError::Conversion(value.to_string())
    }
}

/// Result type for query operations
pub type Result<T> = std::result::Result<T, RosterError>;
