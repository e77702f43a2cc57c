use std::fmt;

/// Result type for spacetv-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the wire-adapter layer
#[derive(Debug)]
pub enum Error {
    /// JSON parsing failed
    Json(serde_json::Error),

    /// Duration field was not a "MM:SS" string
    MalformedDuration(String),

    /// Numeric id field was not parseable
    MalformedId(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::MalformedDuration(raw) => {
                write!(f, "Malformed duration (expected \"MM:SS\"): '{}'", raw)
            }
            Error::MalformedId(raw) => write!(f, "Malformed video id: '{}'", raw),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::MalformedDuration(_) | Error::MalformedId(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
