//! MBTA client error types.

/// Errors from fetching data from the MBTA API.
///
/// Every variant aborts the operation in progress; the core never retries.
#[derive(Debug, thiserror::Error)]
pub enum MbtaError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid or missing API key
    #[error("unauthorized: check MBTA_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by MBTA API")]
    RateLimited,

    /// Requested resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Response body could not be parsed or was missing required data
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Client could not be configured
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

impl MbtaError {
    /// The HTTP status code behind this error, if there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MbtaError::Http(e) => e.status().map(|s| s.as_u16()),
            MbtaError::Api { status, .. } => Some(*status),
            MbtaError::Unauthorized => Some(401),
            MbtaError::RateLimited => Some(429),
            MbtaError::NotFound(_) => Some(404),
            MbtaError::Json { .. } | MbtaError::InvalidConfig(_) => None,
        }
    }
}
