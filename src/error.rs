use thiserror::Error;

/// Request-level failures. Per-snapshot page fetch failures never show up here;
/// they degrade to empty page content inside the analyzer.
#[derive(Debug, Error)]
pub enum WaybackError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("archive index responded with HTTP {status}")]
    UpstreamUnavailable { status: u16 },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl WaybackError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        WaybackError::InvalidInput(reason.into())
    }

    /// HTTP-style status the presentation layer should surface.
    pub fn status_code(&self) -> u16 {
        match self {
            WaybackError::InvalidInput(_) => 400,
            WaybackError::UpstreamUnavailable { .. } => 502,
            WaybackError::Unexpected(_) => 500,
        }
    }
}
