//! Remote API error types.

/// Errors from the IMLGS HTTP client.
///
/// Any of these means the remote service was unavailable or unusable
/// for the request; none of them implies anything about the local
/// cache.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the service.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
