use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use std::time::Instant;
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::error::WaybackError;
use crate::timestamp::LookbackWindow;

const INDEX_FIELDS: &str = "timestamp,original,statuscode,mimetype";

/// Parameters of one archive index lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    /// Scheme- and trailing-slash-stripped target.
    pub target: String,
    pub window: LookbackWindow,
    pub limit: u32,
}

impl IndexQuery {
    pub fn to_url(&self, endpoint: &str) -> Result<Url, WaybackError> {
        let mut url = Url::parse(endpoint)
            .with_context(|| format!("Invalid archive index endpoint: {}", endpoint))?;
        url.query_pairs_mut()
            .append_pair("url", &self.target)
            .append_pair("output", "json")
            .append_pair("fl", INDEX_FIELDS)
            .append_pair("filter", "statuscode:200")
            .append_pair("filter", "mimetype:text/html")
            .append_pair("collapse", "timestamp:6")
            .append_pair("from", &self.window.from)
            .append_pair("to", &self.window.to)
            .append_pair("limit", &self.limit.to_string());
        Ok(url)
    }
}

/// One data row of the index response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub timestamp: String,
    pub original: String,
    pub status_code: String,
    pub mime_type: String,
}

/// Decode a JSON index body. The first row is a header; short rows are skipped.
pub fn parse_index_body(body: &str) -> Result<Vec<IndexRow>, WaybackError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let table: Vec<Vec<String>> =
        serde_json::from_str(body).context("Failed to decode archive index response")?;

    let mut rows = Vec::with_capacity(table.len().saturating_sub(1));
    for (line, mut fields) in table.into_iter().enumerate().skip(1) {
        // extra trailing fields are ignored
        fields.truncate(4);
        match <[String; 4]>::try_from(fields) {
            Ok([timestamp, original, status_code, mime_type]) => rows.push(IndexRow {
                timestamp,
                original,
                status_code,
                mime_type,
            }),
            Err(fields) => {
                warn!(
                    action = "parse",
                    component = "archive_index",
                    row = line,
                    field_count = fields.len(),
                    "Skipping short index row"
                );
            }
        }
    }
    Ok(rows)
}

/// Everything the pipelines need from the web archive.
pub trait Archive: Sync {
    /// Run an index lookup. A non-success HTTP status must surface as
    /// [`WaybackError::UpstreamUnavailable`].
    fn query_index(&self, query: &IndexQuery) -> Result<Vec<IndexRow>, WaybackError>;

    /// Fetch an archived page body. Any failure yields an empty string.
    fn fetch_page(&self, archive_url: &str) -> String;
}

pub struct HttpArchive {
    index_client: Client,
    page_client: Client,
    cdx_endpoint: String,
    user_agent: String,
}

impl HttpArchive {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let index_client = Client::builder()
            .timeout(config.index_timeout)
            .build()
            .context("Failed to build archive index HTTP client")?;
        let page_client = Client::builder()
            .timeout(config.page_timeout)
            .build()
            .context("Failed to build archive page HTTP client")?;

        Ok(HttpArchive {
            index_client,
            page_client,
            cdx_endpoint: config.cdx_endpoint.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    fn try_fetch_page(&self, archive_url: &str) -> anyhow::Result<String> {
        let response = self
            .page_client
            .get(archive_url)
            .header(USER_AGENT, &self.user_agent)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("archived page responded with HTTP {}", status.as_u16());
        }
        Ok(response.text()?)
    }
}

impl Archive for HttpArchive {
    fn query_index(&self, query: &IndexQuery) -> Result<Vec<IndexRow>, WaybackError> {
        let start_time = Instant::now();
        let url = query.to_url(&self.cdx_endpoint)?;
        info!(action = "start", component = "archive_index", query_target = %query.target, from = %query.window.from, to = %query.window.to, "Querying archive index");

        let response = self
            .index_client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .context("Archive index request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!(action = "complete", component = "archive_index", status = status.as_u16(), "Archive index returned an error status");
            return Err(WaybackError::UpstreamUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .context("Failed to read archive index response")?;
        let rows = parse_index_body(&body)?;

        info!(
            action = "complete",
            component = "archive_index",
            row_count = rows.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Archive index query completed"
        );
        Ok(rows)
    }

    fn fetch_page(&self, archive_url: &str) -> String {
        let start_time = Instant::now();
        match self.try_fetch_page(archive_url) {
            Ok(body) => {
                info!(action = "fetch", component = "archived_page", url = archive_url, bytes = body.len(), duration_ms = start_time.elapsed().as_millis(), "Fetched archived page");
                body
            }
            Err(e) => {
                warn!(action = "fetch", component = "archived_page", url = archive_url, error = %e, duration_ms = start_time.elapsed().as_millis(), "Archived page unavailable, using empty content");
                String::new()
            }
        }
    }
}
