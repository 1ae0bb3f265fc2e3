use anyhow::Context;
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

use crate::cdx::Archive;
use crate::error::WaybackError;
use crate::extract::extract_signals;
use crate::model::{MessagingEvolution, Snapshot, YearGroup, YearMessaging};
use crate::shift::compute_biggest_shift;

/// The snapshot standing in for a whole year: the middle one, leaning later
/// when the count is even.
pub fn representative_snapshot(group: &YearGroup) -> Option<&Snapshot> {
    group.snapshots.get(group.snapshots.len() / 2)
}

/// Fetch one representative page per year and describe how the messaging
/// changed between consecutive years.
///
/// Page fetches run on a pool of `workers` threads. A failed fetch only
/// empties that year's signals; results always come back in ascending year
/// order.
pub fn analyze(
    archive: &dyn Archive,
    year_groups: &[YearGroup],
    url: &str,
    workers: usize,
) -> Result<MessagingEvolution, WaybackError> {
    let start_time = Instant::now();

    let mut sorted: Vec<&YearGroup> = year_groups.iter().collect();
    sorted.sort_by_key(|group| group.year);

    let picked: Vec<&Snapshot> = sorted
        .iter()
        .map(|group| {
            representative_snapshot(group).ok_or_else(|| {
                WaybackError::invalid(format!("year group {} has no snapshots", group.year))
            })
        })
        .collect::<Result<_, _>>()?;

    info!(
        action = "start",
        component = "analyzer",
        url = url,
        year_count = picked.len(),
        worker_count = workers,
        "Analyzing messaging evolution"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .context("Failed to build fetch worker pool")?;

    // indexed collect keeps input order regardless of completion order
    let years: Vec<YearMessaging> = pool.install(|| {
        picked
            .par_iter()
            .map(|snapshot| {
                let html = archive.fetch_page(&snapshot.archive_url);
                let signals = extract_signals(&html);
                YearMessaging {
                    year: snapshot.year,
                    snapshot: (*snapshot).clone(),
                    title: signals.title,
                    meta_description: signals.meta_description,
                    headings: signals.headings,
                    key_phrases: signals.key_phrases,
                }
            })
            .collect()
    });

    let biggest_shift = compute_biggest_shift(&years);

    info!(
        action = "complete",
        component = "analyzer",
        url = url,
        year_count = years.len(),
        has_shift = biggest_shift.is_some(),
        duration_ms = start_time.elapsed().as_millis(),
        "Messaging evolution analysis completed"
    );

    Ok(MessagingEvolution {
        url: url.to_string(),
        years,
        biggest_shift,
    })
}
