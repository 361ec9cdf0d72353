use thiserror::Error;

/// Message shown when a failure carries no server-provided message
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// HTTP status that terminates the session
pub const UNAUTHORIZED: u16 = 401;

/// Error types for requests issued through the executor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, aborted, ...)
    #[error("Request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// A 2xx body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The request body could not be serialized
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

impl ApiError {
    /// Build a server error from a status code and the raw response body.
    ///
    /// The message is the `message` string field of a JSON body when present,
    /// otherwise [`FALLBACK_MESSAGE`].
    pub fn from_response(status: u16, raw_body: &str) -> Self {
        let body = serde_json::from_str::<serde_json::Value>(raw_body).ok();
        let message = body
            .as_ref()
            .and_then(|value| value.get("message"))
            .and_then(|message| message.as_str())
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        ApiError::Server { status, message, body }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(UNAUTHORIZED)
    }

    /// Human-readable message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Serialize(error.to_string())
    }
}

/// Type alias for Result with ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
