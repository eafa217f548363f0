use thiserror::Error;

/// Failure taxonomy for a shorten operation.
///
/// Values compare by field so tests and the session can match on them
/// directly. The `Display` text is what the session shows in
/// `OperationState::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenError {
    #[error("Invalid URL. Please enter a valid web address.")]
    InvalidInput,
    #[error("Network error: {0}")]
    NetworkFailure(String),
    #[error("Server error ({status}): {body}")]
    ServerFailure { status: u16, body: String },
    #[error("Could not process the server response.")]
    DecodingFailure,
    #[error("Unknown error. Please try again.")]
    Unknown,
}

/// Error raised by a [`NetworkClient`](crate::network::NetworkClient) when no
/// HTTP response was obtained at all (DNS, timeout, connection reset).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session has shut down")]
    Closed,
    #[error("record index {index} out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type ShortenResult<T> = Result<T, ShortenError>;
