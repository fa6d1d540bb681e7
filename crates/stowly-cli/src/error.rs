//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use stowly_core::CoreError;

/// Exit codes per the CLI conventions.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 5;
    pub const CONNECTION: i32 = 6;
    pub const TIMEOUT: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the platform at {url}")]
    #[diagnostic(
        code(stowly::connection_failed),
        help(
            "Check your network connection and the platform URL.\n\
             URL: {url}\n\
             Try: stowly units list --platform https://api.stowly.fr"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(stowly::auth_failed),
        help(
            "Your auth token is missing or expired.\n\
             Run: stowly config set-token --profile {profile}\n\
             Or set the STOWLY_TOKEN environment variable."
        )
    )]
    AuthFailed { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(stowly::not_found),
        help("Run: stowly {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Booking workflow ─────────────────────────────────────────────

    /// A business rejection from the backend; the message is shown
    /// verbatim.
    #[error("The platform refused the request: {message}")]
    #[diagnostic(
        code(stowly::rejected),
        help("Nothing was submitted. Adjust the reservation and retry.")
    )]
    Rejected { message: String },

    #[error("No payment session identifier was provided")]
    #[diagnostic(
        code(stowly::missing_session),
        help(
            "Pass the session id from the gateway return URL:\n\
             stowly payment status --session <SESSION_ID>"
        )
    )]
    MissingPaymentSession,

    #[error("The signature for this session was already submitted")]
    #[diagnostic(
        code(stowly::already_submitted),
        help("Submitting twice would create a second consent record server-side.")
    )]
    AlreadySubmitted,

    #[error("Contract composition failed: {reason}")]
    #[diagnostic(code(stowly::composition))]
    Composition { reason: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(stowly::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(stowly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(stowly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: stowly config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(stowly::no_config),
        help(
            "Create one with: stowly config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(stowly::config))]
    Config(String),

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(help("Increase timeout with --timeout or check your connection."))]
    Timeout { seconds: u64 },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Interactive prompt failed: {0}")]
    #[diagnostic(code(stowly::prompt))]
    Prompt(String),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(stowly::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } | Self::AlreadySubmitted => exit_code::REJECTED,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::MissingPaymentSession => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message: _ } => CliError::AuthFailed {
                profile: "current".into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::ValidationFailed { field, reason } => {
                CliError::Validation { field, reason }
            }

            CoreError::Rejected { message } => CliError::Rejected { message },

            CoreError::MissingPaymentSession => CliError::MissingPaymentSession,

            CoreError::AlreadySubmitted => CliError::AlreadySubmitted,

            CoreError::Composition { reason } => CliError::Composition { reason },

            CoreError::Api { message, status } => {
                if status == Some(404) {
                    CliError::NotFound {
                        resource_type: "resource".into(),
                        identifier: String::new(),
                        list_command: "units list".into(),
                    }
                } else {
                    CliError::ApiError { message, status }
                }
            }

            CoreError::Config { message } => CliError::Config(message),

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<stowly_config::ConfigError> for CliError {
    fn from(err: stowly_config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Prompt(err.to_string())
    }
}
