use std::fmt;

/// Result type for spacetv-session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the session layer
#[derive(Debug)]
pub enum Error {
    /// Storage layer error (user table or preference file)
    Store(spacetv_store::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
        }
    }
}

impl From<spacetv_store::Error> for Error {
    fn from(err: spacetv_store::Error) -> Self {
        Error::Store(err)
    }
}
