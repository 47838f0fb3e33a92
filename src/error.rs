use std::time::Duration;

/// Failure to obtain a word from the remote dictionary.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("dictionary returned {code}: {reason}")]
    Status { code: u16, reason: String },
    #[error("malformed dictionary payload: {0}")]
    MalformedPayload(String),
    #[error("dictionary did not answer within {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("remote dictionary disabled")]
    Offline,
}

impl NetworkError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, NetworkError::Timeout(_))
    }
}

/// Failure reading or writing the durable key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not a JSON object of strings: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}
