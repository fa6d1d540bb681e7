// ── Core error types ──
//
// User-facing errors from stowly-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<stowly_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the platform at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Validation errors ────────────────────────────────────────────
    /// A draft field failed validation. Blocks the wizard transition;
    /// no network call is issued.
    #[error("Invalid {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    // ── Workflow errors ──────────────────────────────────────────────
    /// The backend refused the request for a business reason. The
    /// message is the server's verbatim text.
    #[error("{message}")]
    Rejected { message: String },

    /// No payment session identifier on the return URL.
    #[error("No payment session identifier was provided")]
    MissingPaymentSession,

    /// The signature for this session has already been submitted; the
    /// server call is not idempotent.
    #[error("Signature already submitted for this session")]
    AlreadySubmitted,

    /// Contract document assembly failed for a non-recoverable reason
    /// (optional images degrade instead of raising this).
    #[error("Contract composition failed: {reason}")]
    Composition { reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<stowly_api::Error> for CoreError {
    fn from(err: stowly_api::Error) -> Self {
        match err {
            stowly_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            stowly_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            stowly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            stowly_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            stowly_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            stowly_api::Error::Api { message, status } => CoreError::Api {
                message,
                status: Some(status),
            },
            stowly_api::Error::Rejected { message } => CoreError::Rejected { message },
            stowly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
