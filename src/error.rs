/// Errors surfaced by this crate.
///
/// Extraction itself never fails: anything the markup does not provide leaves the corresponding
/// field at its default. Errors only come from the boundary around it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The upstream site answered with a non-success status.
    #[error("Failed to fetch source data: {status} {status_text}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Reason phrase accompanying the status.
        status_text: String,
    },

    /// The upstream site could not be reached at all.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A configured URL could not be parsed.
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Consuming the token stream failed unexpectedly.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// The HTTP status a response carrying this error should have.
    #[must_use]
    pub fn status(&self) -> u16 {
        match *self {
            Error::Upstream { status, .. } if !(200..300).contains(&status) => status,
            _ => 500,
        }
    }
}
