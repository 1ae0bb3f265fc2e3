use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, warn};

use crate::cdx::{Archive, IndexQuery, IndexRow};
use crate::config::Config;
use crate::domain;
use crate::error::WaybackError;
use crate::model::{Snapshot, WaybackResponse, YearGroup};
use crate::timestamp::{parse_capture_timestamp, LookbackWindow};

/// Find archived captures of `url` over the lookback window and group them by
/// year, most recent year first.
pub fn locate(
    archive: &dyn Archive,
    url: &str,
    config: &Config,
) -> Result<WaybackResponse, WaybackError> {
    locate_within(
        archive,
        url,
        LookbackWindow::current(config.lookback_years),
        config,
    )
}

pub fn locate_within(
    archive: &dyn Archive,
    url: &str,
    window: LookbackWindow,
    config: &Config,
) -> Result<WaybackResponse, WaybackError> {
    let start_time = Instant::now();
    let url = domain::validate_target(url)?;

    let query = IndexQuery {
        target: domain::index_query_target(url),
        window,
        limit: config.row_limit,
    };
    let rows = archive.query_index(&query)?;

    let mut snapshots: Vec<Snapshot> = rows
        .into_iter()
        .filter_map(|row| snapshot_from_row(row, &config.archive_base))
        .collect();

    if snapshots.is_empty() {
        info!(action = "complete", component = "locator", url = url, "No archived snapshots found");
        return Ok(WaybackResponse::empty(url));
    }

    snapshots.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let total_snapshots = snapshots.len();
    let oldest_snapshot = snapshots.first().cloned();
    let newest_snapshot = snapshots.last().cloned();
    let year_groups = group_by_year(snapshots);

    info!(
        action = "complete",
        component = "locator",
        url = url,
        total_snapshots,
        year_count = year_groups.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Snapshot lookup completed"
    );

    Ok(WaybackResponse {
        url: url.to_string(),
        total_snapshots,
        year_groups,
        oldest_snapshot,
        newest_snapshot,
    })
}

pub fn snapshot_from_row(row: IndexRow, archive_base: &str) -> Option<Snapshot> {
    let Some(date) = parse_capture_timestamp(&row.timestamp) else {
        warn!(action = "parse", component = "locator", timestamp = %row.timestamp, "Skipping capture with malformed timestamp");
        return None;
    };

    let url = domain::normalize_original(&row.original);
    let archive_url = domain::archive_url(archive_base, &row.timestamp, &url);

    Some(Snapshot {
        timestamp: row.timestamp,
        url,
        status_code: row.status_code,
        mime_type: row.mime_type,
        archive_url,
        formatted_date: date.formatted_date,
        year: date.year,
        month: date.month,
    })
}

/// Group chronologically sorted snapshots into years, newest year first.
pub fn group_by_year(snapshots: Vec<Snapshot>) -> Vec<YearGroup> {
    let mut by_year: BTreeMap<i32, Vec<Snapshot>> = BTreeMap::new();
    for snapshot in snapshots {
        by_year.entry(snapshot.year).or_default().push(snapshot);
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, snapshots)| YearGroup::new(year, snapshots))
        .collect()
}
