//! Typed error model for the address-book core.
//!
//! - `LookupError`: anything that went wrong talking to the backend.
//! - `FormError`: the single user-visible message a form operation can leave
//!   behind. `Display` is the exact text shown to the user.
//! - `ConfigError`: bad configuration values.
//!
//! `thiserror` for all derivations, no manual `Display` impls.

use serde::Serialize;

/// Generic message for transport or parse failures.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch addresses. Please try again.";

/// Message used when the backend reports `status: "error"` without a message.
pub const SERVER_FALLBACK_MESSAGE: &str = "Failed to fetch addresses";

/// Failure of a single lookup call.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("address lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not the expected JSON shape.
    #[error("address lookup response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL plus query does not form a valid URL.
    #[error("invalid lookup base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// The one active error message of a form.
///
/// Each variant belongs to one failure class:
///
/// ```text
/// Fetch             -> network or parse failure (generic fallback)
/// Server            -> backend reported `status: "error"`
/// MissingNames      -> validation: first/last name empty
/// NoSelection       -> validation: nothing selected or no candidates
/// SelectionNotFound -> selection no longer in the candidate list
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FormError {
    #[error("Failed to fetch addresses. Please try again.")]
    Fetch,

    #[error("{0}")]
    Server(String),

    #[error("First name and last name fields mandatory!")]
    MissingNames,

    #[error("No address selected, try to select an address or find one if you haven't")]
    NoSelection,

    #[error("Selected address not found")]
    SelectionNotFound,
}

impl FormError {
    /// Build a server-reported error, falling back to the generic server text
    /// when the payload carries no (or an empty) message.
    pub fn server(message: Option<&str>) -> Self {
        match message {
            Some(m) if !m.is_empty() => Self::Server(m.to_string()),
            _ => Self::Server(SERVER_FALLBACK_MESSAGE.to_string()),
        }
    }

    /// True for the validation failures of the person-association pipeline.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingNames | Self::NoSelection | Self::SelectionNotFound
        )
    }
}

/// Invalid configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base url {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base url {0:?} must use http or https")]
    UnsupportedScheme(String),

    #[error("invalid timeout {value:?}: expected whole seconds")]
    InvalidTimeout { value: String },
}
