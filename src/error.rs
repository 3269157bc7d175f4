use std::{error::Error, fmt::Display};

use crate::host::HostError;

#[derive(Debug)]
pub enum BlobError {
    /// missing or malformed input, raised before any host call
    InvalidArgument(String),
    /// declared MIME type does not belong to the category an operation needs
    UnsupportedType { expected: &'static str, found: String },
    /// a host facility (e.g. a drawing surface) is unavailable
    MissingCapability(String),
    /// a fetch completed with a non-success status
    NetworkError { status: u16 },
    /// decoded text is not well-formed JSON
    ParseError(serde_json::Error),
    /// the host reported a failure while reading, fetching or decoding
    HostRead(HostError),
}

pub type Result<T> = std::result::Result<T, BlobError>;

impl Error for BlobError {
    // Display already prints the wrapped error, so the chain continues below it
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BlobError::ParseError(err) => err.source(),
            BlobError::HostRead(err) => err.source(),
            _ => None,
        }
    }
}

impl Display for BlobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            BlobError::UnsupportedType { expected, found } => {
                write!(f, "unsupported type '{}': expected {}*", found, expected)
            }
            BlobError::MissingCapability(what) => write!(f, "missing capability: {}", what),
            BlobError::NetworkError { status } => {
                write!(f, "network request failed with status {}", status)
            }
            BlobError::ParseError(err) => write!(f, "json parse error: {}", err),
            BlobError::HostRead(err) => write!(f, "host error: {}", err),
        }
    }
}

impl From<HostError> for BlobError {
    fn from(value: HostError) -> Self {
        BlobError::HostRead(value)
    }
}

/// fails with `UnsupportedType` unless `mime` starts with `prefix`
pub(crate) fn require_type(mime: &str, prefix: &'static str) -> Result<()> {
    if mime.starts_with(prefix) {
        return Ok(());
    }
    Err(BlobError::UnsupportedType {
        expected: prefix,
        found: mime.to_string(),
    })
}
