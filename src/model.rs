//! Data shapes exchanged between the locator, the analyzer and callers.
//!
//! Field names serialize in camelCase so the JSON matches what the web front
//! end consumes (`archiveUrl`, `biggestShift`, ...).

use serde::{Deserialize, Serialize};

use crate::shift::ShiftSummary;

/// One archived capture of a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// 14-digit `YYYYMMDDHHMMSS` capture time.
    pub timestamp: String,
    pub url: String,
    pub status_code: String,
    pub mime_type: String,
    pub archive_url: String,
    /// e.g. `Jan 5, 2023`
    pub formatted_date: String,
    pub year: i32,
    pub month: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGroup {
    pub year: i32,
    pub snapshots: Vec<Snapshot>,
    pub count: usize,
}

impl YearGroup {
    pub fn new(year: i32, snapshots: Vec<Snapshot>) -> Self {
        let count = snapshots.len();
        YearGroup {
            year,
            snapshots,
            count,
        }
    }
}

/// Full output envelope of the snapshot locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaybackResponse {
    pub url: String,
    pub total_snapshots: usize,
    pub year_groups: Vec<YearGroup>,
    pub oldest_snapshot: Option<Snapshot>,
    pub newest_snapshot: Option<Snapshot>,
}

impl WaybackResponse {
    pub fn empty(url: &str) -> Self {
        WaybackResponse {
            url: url.to_string(),
            total_snapshots: 0,
            year_groups: Vec::new(),
            oldest_snapshot: None,
            newest_snapshot: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearMessaging {
    pub year: i32,
    pub snapshot: Snapshot,
    pub title: String,
    pub meta_description: String,
    pub headings: Vec<String>,
    pub key_phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftResult {
    pub from_year: i32,
    pub to_year: i32,
    pub score: f64,
    pub summary: ShiftSummary,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingEvolution {
    pub url: String,
    pub years: Vec<YearMessaging>,
    pub biggest_shift: Option<ShiftResult>,
}

/// Payload accepted by the evolution analysis operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionRequest {
    pub year_groups: Vec<YearGroup>,
    pub url: String,
}
