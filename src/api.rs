//! Request/response operations handed to the presentation layer.
//!
//! Both operations log internal failure detail and return only a generic,
//! caller-safe message alongside an HTTP-style status.

use serde::Serialize;
use serde_json::error::Category;
use thiserror::Error;
use tracing::error;

use crate::analyzer;
use crate::cdx::Archive;
use crate::config::Config;
use crate::error::WaybackError;
use crate::locator;
use crate::model::{EvolutionRequest, MessagingEvolution, WaybackResponse};

const SEARCH_FAILED: &str = "Failed to search the Internet Archive";
const ANALYSIS_FAILED: &str = "Failed to analyze messaging evolution";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message} (status {status})")]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    pub message: String,
}

impl ApiError {
    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self.status {
            400 => 2,
            502 => 3,
            _ => 1,
        }
    }

    fn from_search(err: &WaybackError) -> Self {
        let message = match err {
            WaybackError::InvalidInput(_) => "Invalid URL provided",
            WaybackError::UpstreamUnavailable { .. } => "Failed to fetch from Wayback Machine",
            WaybackError::Unexpected(e) => {
                error!(action = "search", component = "api", error = ?e, "Wayback search error");
                SEARCH_FAILED
            }
        };
        ApiError {
            status: err.status_code(),
            message: message.to_string(),
        }
    }

    fn from_analysis(err: &WaybackError) -> Self {
        let message = match err {
            WaybackError::InvalidInput(_) => "Invalid request data",
            WaybackError::UpstreamUnavailable { .. } | WaybackError::Unexpected(_) => {
                error!(action = "analyze", component = "api", error = %err, "Evolution analysis error");
                ANALYSIS_FAILED
            }
        };
        let status = match err {
            WaybackError::InvalidInput(_) => 400,
            _ => 500,
        };
        ApiError {
            status,
            message: message.to_string(),
        }
    }
}

pub fn search(archive: &dyn Archive, url: &str, config: &Config) -> Result<WaybackResponse, ApiError> {
    locator::locate(archive, url, config).map_err(|e| ApiError::from_search(&e))
}

pub fn analyze_evolution(
    archive: &dyn Archive,
    request: &EvolutionRequest,
    config: &Config,
) -> Result<MessagingEvolution, ApiError> {
    validate_request(request)
        .and_then(|_| {
            analyzer::analyze(archive, &request.year_groups, &request.url, config.workers)
        })
        .map_err(|e| ApiError::from_analysis(&e))
}

/// Decode an evolution request body. Well-formed JSON of the wrong shape is
/// invalid input; anything that is not JSON at all is unexpected.
pub fn parse_evolution_request(body: &str) -> Result<EvolutionRequest, WaybackError> {
    serde_json::from_str(body).map_err(|e| match e.classify() {
        Category::Data => WaybackError::invalid(e.to_string()),
        _ => WaybackError::Unexpected(anyhow::Error::new(e).context("Malformed request body")),
    })
}

/// Decode and analyze a raw request body in one step.
pub fn analyze_evolution_json(
    archive: &dyn Archive,
    body: &str,
    config: &Config,
) -> Result<MessagingEvolution, ApiError> {
    let request = parse_evolution_request(body).map_err(|e| ApiError::from_analysis(&e))?;
    analyze_evolution(archive, &request, config)
}

fn validate_request(request: &EvolutionRequest) -> Result<(), WaybackError> {
    if request.url.trim().is_empty() {
        return Err(WaybackError::invalid("url is required"));
    }
    if let Some(group) = request.year_groups.iter().find(|g| g.snapshots.is_empty()) {
        return Err(WaybackError::invalid(format!(
            "year group {} has no snapshots",
            group.year
        )));
    }
    Ok(())
}
