use thiserror::Error;

/// Errors from talking to the tax service.
///
/// Transport failures (DNS, refused connection, timeout, TLS) are not told
/// apart; they all surface as [`ClientError::Connectivity`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid service address '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Could not connect to server: {0}")]
    Connectivity(#[source] reqwest::Error),

    #[error("Failed to load profile ({status})")]
    FetchFailed { status: u16 },

    #[error("Failed to save profile ({status})")]
    SaveFailed { status: u16 },

    #[error("Failed to retrieve calculation ({status})")]
    CalculationFailed { status: u16 },

    #[error("Failed to parse {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// True when the service could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }

    /// Status code of a rejected request, if the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { status }
            | Self::SaveFailed { status }
            | Self::CalculationFailed { status } => Some(*status),
            _ => None,
        }
    }
}
