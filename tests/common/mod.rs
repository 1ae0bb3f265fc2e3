//! Shared fixtures: an in-memory archive and builders for index rows/pages.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use wayback_evolution::cdx::{Archive, IndexQuery, IndexRow};
use wayback_evolution::config::DEFAULT_ARCHIVE_BASE;
use wayback_evolution::WaybackError;

pub fn row(timestamp: &str, original: &str) -> IndexRow {
    IndexRow {
        timestamp: timestamp.to_string(),
        original: original.to_string(),
        status_code: "200".to_string(),
        mime_type: "text/html".to_string(),
    }
}

pub fn archive_url(timestamp: &str, original: &str) -> String {
    format!("{}/{}/{}", DEFAULT_ARCHIVE_BASE, timestamp, original)
}

pub fn page(title: &str, description: &str, headings: &[&str]) -> String {
    let mut html = format!(
        "<html><head><title>{}</title><meta name=\"description\" content=\"{}\"></head><body>",
        title, description
    );
    for heading in headings {
        html.push_str(&format!("<h2>{}</h2>", heading));
    }
    html.push_str("</body></html>");
    html
}

/// Archive double that serves canned index rows and pages without network.
pub struct FakeArchive {
    index: Result<Vec<IndexRow>, u16>,
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    pub queries: Mutex<Vec<IndexQuery>>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeArchive {
    pub fn new() -> Self {
        FakeArchive {
            index: Ok(Vec::new()),
            pages: HashMap::new(),
            delays: HashMap::new(),
            queries: Mutex::new(Vec::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rows(mut self, rows: Vec<IndexRow>) -> Self {
        self.index = Ok(rows);
        self
    }

    pub fn with_index_status(mut self, status: u16) -> Self {
        self.index = Err(status);
        self
    }

    pub fn with_page(mut self, archive_url: &str, html: &str) -> Self {
        self.pages.insert(archive_url.to_string(), html.to_string());
        self
    }

    pub fn with_delay(mut self, archive_url: &str, delay: Duration) -> Self {
        self.delays.insert(archive_url.to_string(), delay);
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        let mut urls = self.fetched.lock().unwrap().clone();
        urls.sort();
        urls
    }
}

impl Archive for FakeArchive {
    fn query_index(&self, query: &IndexQuery) -> Result<Vec<IndexRow>, WaybackError> {
        self.queries.lock().unwrap().push(query.clone());
        match &self.index {
            Ok(rows) => Ok(rows.clone()),
            Err(status) => Err(WaybackError::UpstreamUnavailable { status: *status }),
        }
    }

    fn fetch_page(&self, archive_url: &str) -> String {
        if let Some(delay) = self.delays.get(archive_url) {
            thread::sleep(*delay);
        }
        self.fetched.lock().unwrap().push(archive_url.to_string());
        self.pages.get(archive_url).cloned().unwrap_or_default()
    }
}
