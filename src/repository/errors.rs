use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Message suitable for showing next to the tool list.
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            RepositoryError::Http { status } if *status >= 500 => {
                format!("The server failed to load tools (error {status}).")
            }
            RepositoryError::Http { status } => {
                format!("The request was rejected (error {status}).")
            }
            RepositoryError::Parse(_) => "The server sent an unexpected response.".to_string(),
            RepositoryError::Validation(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RepositoryError::Http {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            RepositoryError::Parse(err.to_string())
        } else {
            RepositoryError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Parse(err.to_string())
    }
}
