use getset::Getters;
use thiserror::Error as ThisError;

/// Failure of a single cached request.
///
/// Cloneable so the outcome of one underlying fetch can be handed to every
/// caller waiting on the same key.
#[derive(Clone, Debug, Getters, ThisError)]
#[get = "pub"]
#[error("request for `{key}` failed: {kind}")]
pub struct Error {
    key: String,
    kind: ErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ErrorKind {
    #[error("empty request key")]
    EmptyKey,
    #[error("http status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("could not decode response body: {0}")]
    Decode(String),
    #[error("interrupted by cache reset")]
    Interrupted,
}

impl Error {
    pub fn new(key: &str, kind: ErrorKind) -> Self {
        Self {
            key: key.to_string(),
            kind,
        }
    }

    pub fn empty_key() -> Self {
        Self::new("", ErrorKind::EmptyKey)
    }

    pub fn status(key: &str, status: u16) -> Self {
        Self::new(key, ErrorKind::Status(status))
    }

    pub fn network(key: &str, cause: impl ToString) -> Self {
        Self::new(key, ErrorKind::Network(cause.to_string()))
    }

    pub fn decode(key: &str, cause: impl ToString) -> Self {
        Self::new(key, ErrorKind::Decode(cause.to_string()))
    }

    pub fn interrupted(key: &str) -> Self {
        Self::new(key, ErrorKind::Interrupted)
    }
}
