//! Crate-level error types.
//!
//! [`BfxError`] unifies every error source (configuration, request
//! construction, transport, decoding) behind a single enum so callers can
//! match on the variant they care about while still using the `?` operator.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BfxError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum BfxError {
    /// Configuration could not be loaded from the environment or keychain.
    #[error("configuration error: {0}")]
    Config(String),

    /// A request could not be signed (missing or malformed credentials).
    #[error("credentials error: {0}")]
    Credentials(String),

    /// Input rejected locally before any request was built.
    #[error("validation error: {0}")]
    Validation(String),

    /// The HTTP round-trip failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status and no error payload.
    #[error("http status {status}: {body}")]
    Http { status: u16, body: String },

    /// The exchange answered with an `["error", code, message]` payload.
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },

    /// The response arrived but did not have the expected layout.
    #[error("decode error: {0}")]
    Decode(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A custom CA bundle could not be read or parsed.
    #[error("tls error: {0}")]
    Tls(String),
}
