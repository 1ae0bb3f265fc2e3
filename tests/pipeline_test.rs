/// End-to-end tests of snapshot lookup followed by messaging analysis,
/// driven through an in-memory archive.
mod common;

use std::time::Duration;

use common::{archive_url, page, row, FakeArchive};
use wayback_evolution::api;
use wayback_evolution::locator::locate_within;
use wayback_evolution::shift::ShiftSummary;
use wayback_evolution::timestamp::LookbackWindow;
use wayback_evolution::{analyze, locate, Config, EvolutionRequest, WaybackError};

fn config() -> Config {
    Config {
        workers: 2,
        ..Config::default()
    }
}

#[test]
fn test_locate_zero_rows_is_empty_success() {
    let archive = FakeArchive::new();
    let result = locate(&archive, "https://example.com", &config()).unwrap();

    assert_eq!(result.url, "https://example.com");
    assert_eq!(result.total_snapshots, 0);
    assert!(result.year_groups.is_empty());
    assert!(result.oldest_snapshot.is_none());
    assert!(result.newest_snapshot.is_none());
}

#[test]
fn test_locate_groups_and_orders_snapshots() {
    let archive = FakeArchive::new().with_rows(vec![
        row("20230901000000", "https://example.com/"),
        row("20190310000000", "example.com/"),
        row("20230105000000", "https://example.com/"),
        row("20210722000000", "https://example.com/"),
        row("20190102000000", "example.com/"),
    ]);

    let result = locate(&archive, "https://example.com/", &config()).unwrap();

    assert_eq!(result.total_snapshots, 5);
    let years: Vec<i32> = result.year_groups.iter().map(|g| g.year).collect();
    assert_eq!(years, vec![2023, 2021, 2019]);

    for group in &result.year_groups {
        assert_eq!(group.count, group.snapshots.len());
        assert!(group
            .snapshots
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));
    }

    let oldest = result.oldest_snapshot.unwrap();
    let newest = result.newest_snapshot.unwrap();
    assert_eq!(oldest.timestamp, "20190102000000");
    assert_eq!(oldest.formatted_date, "Jan 2, 2019");
    assert_eq!(oldest.url, "https://example.com/");
    assert_eq!(
        oldest.archive_url,
        "https://web.archive.org/web/20190102000000/https://example.com/"
    );
    assert_eq!(newest.timestamp, "20230901000000");
}

#[test]
fn test_locate_skips_malformed_rows() {
    let archive = FakeArchive::new().with_rows(vec![
        row("garbage", "https://example.com/"),
        row("20220101000000", "https://example.com/"),
    ]);
    let result = locate(&archive, "https://example.com", &config()).unwrap();
    assert_eq!(result.total_snapshots, 1);
    assert_eq!(result.year_groups[0].year, 2022);
}

#[test]
fn test_locate_sends_normalized_query() {
    let archive = FakeArchive::new();
    let window = LookbackWindow::ending_in(2026, 10);
    locate_within(&archive, "https://example.com/pricing/", window, &config()).unwrap();

    let queries = archive.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].target, "example.com/pricing");
    assert_eq!(queries[0].window.from, "20160101");
    assert_eq!(queries[0].window.to, "20261231");
    assert_eq!(queries[0].limit, 500);
}

#[test]
fn test_locate_trims_whitespace_before_normalizing() {
    let archive = FakeArchive::new().with_rows(vec![row("20220101000000", "https://example.com/")]);
    let window = LookbackWindow::ending_in(2026, 10);
    let result = locate_within(&archive, " https://example.com/ ", window, &config()).unwrap();

    assert_eq!(archive.queries.lock().unwrap()[0].target, "example.com");
    assert_eq!(result.url, "https://example.com/");
    assert_eq!(result.total_snapshots, 1);
}

#[test]
fn test_locate_rejects_invalid_url_before_querying() {
    let archive = FakeArchive::new();
    let err = locate(&archive, "definitely not a url", &config()).unwrap_err();
    assert!(matches!(err, WaybackError::InvalidInput(_)));
    assert_eq!(archive.query_count(), 0);
}

#[test]
fn test_locate_upstream_failure() {
    let archive = FakeArchive::new().with_index_status(503);
    let err = locate(&archive, "https://example.com", &config()).unwrap_err();
    assert_eq!(err.status_code(), 502);
}

#[test]
fn test_rebrand_detected_end_to_end() {
    let original = "https://acme.test/";
    let rows = vec![
        row("20200110000000", original),
        row("20200610000000", original),
        row("20210110000000", original),
        row("20210510000000", original),
        row("20210910000000", original),
    ];

    let archive = FakeArchive::new()
        .with_rows(rows)
        .with_page(
            &archive_url("20200610000000", original),
            &page("Acme Inc — Home", "", &["Our Products"]),
        )
        .with_page(
            &archive_url("20210510000000", original),
            &page("Acme Labs — AI Platform", "", &["Meet the Model"]),
        );

    let found = locate(&archive, "https://acme.test", &config()).unwrap();
    let evolution = analyze(&archive, &found.year_groups, &found.url, 2).unwrap();

    let years: Vec<i32> = evolution.years.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2020, 2021]);
    assert_eq!(evolution.years[0].title, "Acme Inc — Home");
    assert_eq!(evolution.years[1].headings, vec!["Meet the Model"]);

    let shift = evolution.biggest_shift.unwrap();
    assert_eq!((shift.from_year, shift.to_year), (2020, 2021));
    assert!(shift.score > 5.0);
    assert_eq!(shift.summary, ShiftSummary::MajorRebrand);
    assert_eq!(
        shift.details[0],
        "Title changed from \"Acme Inc — Home\" to \"Acme Labs — AI Platform\""
    );
}

#[test]
fn test_representative_is_middle_snapshot() {
    let original = "https://example.com/";
    let archive = FakeArchive::new().with_rows(vec![
        row("20220101000000", original),
        row("20220201000000", original),
        row("20220301000000", original),
        row("20220401000000", original),
    ]);

    let found = locate(&archive, original, &config()).unwrap();
    analyze(&archive, &found.year_groups, original, 1).unwrap();

    assert_eq!(
        archive.fetched_urls(),
        vec![archive_url("20220301000000", original)]
    );
}

#[test]
fn test_failed_page_fetch_degrades_to_empty_signals() {
    let original = "https://example.com/";
    let archive = FakeArchive::new()
        .with_rows(vec![
            row("20200101000000", original),
            row("20210101000000", original),
            row("20220101000000", original),
        ])
        .with_page(
            &archive_url("20200101000000", original),
            &page("Example", "Widgets for all", &["Welcome"]),
        )
        .with_page(
            &archive_url("20220101000000", original),
            &page("Example", "Widgets for all", &["Welcome"]),
        );

    let found = locate(&archive, original, &config()).unwrap();
    let evolution = analyze(&archive, &found.year_groups, original, 3).unwrap();

    assert_eq!(evolution.years.len(), 3);
    let missing = &evolution.years[1];
    assert_eq!(missing.year, 2021);
    assert_eq!(missing.title, "");
    assert!(missing.headings.is_empty());
    assert!(missing.key_phrases.is_empty());
    assert!(evolution.biggest_shift.is_some());
}

#[test]
fn test_parallel_fetches_keep_year_order() {
    let original = "https://example.com/";
    let timestamps = ["20190101000000", "20200101000000", "20210101000000", "20220101000000"];

    let mut archive = FakeArchive::new()
        .with_rows(timestamps.iter().map(|ts| row(ts, original)).collect());
    for (i, ts) in timestamps.iter().enumerate() {
        let url = archive_url(ts, original);
        archive = archive
            .with_page(&url, &page(&format!("Edition {}", i), "", &[]))
            .with_delay(&url, Duration::from_millis(((timestamps.len() - i) * 30) as u64));
    }

    let found = locate(&archive, original, &config()).unwrap();
    let evolution = analyze(&archive, &found.year_groups, original, 4).unwrap();

    let years: Vec<i32> = evolution.years.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2019, 2020, 2021, 2022]);
    let titles: Vec<&str> = evolution.years.iter().map(|y| y.title.as_str()).collect();
    assert_eq!(titles, vec!["Edition 0", "Edition 1", "Edition 2", "Edition 3"]);
}

#[test]
fn test_single_year_has_no_shift() {
    let original = "https://example.com/";
    let archive = FakeArchive::new().with_rows(vec![row("20220101000000", original)]);
    let found = locate(&archive, original, &config()).unwrap();
    let evolution = analyze(&archive, &found.year_groups, original, 1).unwrap();
    assert_eq!(evolution.years.len(), 1);
    assert!(evolution.biggest_shift.is_none());
}

#[test]
fn test_api_search_reports_invalid_url() {
    let archive = FakeArchive::new();
    let err = api::search(&archive, "nope", &config()).unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.message, "Invalid URL provided");
}

#[test]
fn test_api_analyze_rejects_empty_year_group() {
    let archive = FakeArchive::new();
    let body = r#"{"url": "https://example.com", "yearGroups": [{"year": 2020, "snapshots": [], "count": 0}]}"#;
    let err = api::analyze_evolution_json(&archive, body, &config()).unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.message, "Invalid request data");
    assert!(archive.fetched_urls().is_empty());
}

#[test]
fn test_api_analyze_round_trips_search_output() {
    let original = "https://example.com/";
    let archive = FakeArchive::new().with_rows(vec![
        row("20210101000000", original),
        row("20220101000000", original),
    ]);

    let found = api::search(&archive, original, &config()).unwrap();
    let body = serde_json::to_string(&EvolutionRequest {
        year_groups: found.year_groups,
        url: found.url,
    })
    .unwrap();

    let evolution = api::analyze_evolution_json(&archive, &body, &config()).unwrap();
    let json = serde_json::to_value(&evolution).unwrap();
    assert_eq!(json["years"].as_array().unwrap().len(), 2);
    assert_eq!(json["years"][0]["year"], 2021);
    assert_eq!(json["biggestShift"]["fromYear"], 2021);
    assert_eq!(json["biggestShift"]["toYear"], 2022);
}
