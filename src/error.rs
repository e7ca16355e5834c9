use thiserror::Error;

/// Maximum characters to include in error message body for debugging.
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 200;

/// Errors that can occur when fingerprinting an identity or retrieving
/// credentials for it.
#[derive(Debug, Error)]
pub enum Error {
    /// The identity configuration could not be serialized for fingerprinting.
    ///
    /// Indicates a programming defect rather than a transient condition;
    /// never retried.
    #[error("fingerprint encoding failed: {0}")]
    Encoding(#[source] serde_json::Error),

    /// HTTP/network layer error from reqwest.
    #[error("HTTP request failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Unexpected HTTP response (non-JSON error body).
    #[error("HTTP error: {0}")]
    Http(String),

    /// AWS STS returned a business error.
    #[error("STS error (RequestId: {request_id}): [{code}] {message}")]
    Api {
        request_id: String,
        code: String,
        message: String,
    },

    /// Signature computation error.
    #[error("signature error: {0}")]
    Signature(String),

    /// Source credential not found or invalid.
    #[error("credential error: {0}")]
    Credential(String),

    /// Response deserialization error.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Credentials profile file parse error.
    #[error("config error: {0}")]
    Config(String),

    /// Validation error for request parameters.
    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Returns `true` if the error is potentially recoverable by retrying.
    ///
    /// This crate never retries on its own; the caller decides. Retryable
    /// errors include network/HTTP failures and STS throttling or server
    /// errors. Credential, validation, and encoding errors are never
    /// retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::HttpClient(e) => e.is_timeout() || e.is_connect(),
            Error::Http(_) => true,

            Error::Api { code, .. } => {
                // Rate limiting is retryable
                if code == "Throttling" || code == "ThrottlingException" {
                    return true;
                }
                // Server-side failures are retryable
                code == "ServiceUnavailable"
                    || code == "RequestTimeout"
                    || code.starts_with("Internal")
            }

            Error::Encoding(_)
            | Error::Signature(_)
            | Error::Credential(_)
            | Error::Deserialize(_)
            | Error::Config(_)
            | Error::Validation(_) => false,
        }
    }

    /// Returns the request ID if this is an STS API error.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Error::Api { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    /// Returns the error code if this is an STS API error.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Error::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// A specialized Result type for identity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Truncates a string to at most `max_chars` characters on a valid UTF-8 boundary.
pub(crate) fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
