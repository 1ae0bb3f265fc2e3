use std::fmt::Write;

use crate::model::{MessagingEvolution, WaybackResponse};
use crate::utils::format_number;

pub fn render_search(result: &WaybackResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n--- Archive timeline for {} ---", result.url);

    if result.total_snapshots == 0 {
        let _ = writeln!(out, "No archived snapshots found");
        return out;
    }

    let _ = writeln!(
        out,
        "Total snapshots: {}",
        format_number(result.total_snapshots)
    );
    if let (Some(oldest), Some(newest)) = (&result.oldest_snapshot, &result.newest_snapshot) {
        let _ = writeln!(
            out,
            "Date range: {} to {}",
            oldest.formatted_date, newest.formatted_date
        );
    }

    let _ = writeln!(out);
    for group in &result.year_groups {
        let first = group.snapshots.first().map(|s| s.formatted_date.as_str());
        let last = group.snapshots.last().map(|s| s.formatted_date.as_str());
        let _ = writeln!(
            out,
            "- {}: {} snapshots ({} to {})",
            group.year,
            format_number(group.count),
            first.unwrap_or("?"),
            last.unwrap_or("?")
        );
    }
    out
}

pub fn render_evolution(result: &MessagingEvolution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n--- Messaging evolution for {} ---", result.url);

    for year in &result.years {
        let _ = writeln!(out, "\n{} ({})", year.year, year.snapshot.formatted_date);
        let title = if year.title.is_empty() { "(none)" } else { year.title.as_str() };
        let _ = writeln!(out, "  Title: {}", title);
        if !year.meta_description.is_empty() {
            let _ = writeln!(out, "  Description: {}", year.meta_description);
        }
        if !year.headings.is_empty() {
            let _ = writeln!(out, "  Headings: {}", year.headings.join(" | "));
        }
        if !year.key_phrases.is_empty() {
            let _ = writeln!(out, "  Key phrases: {}", year.key_phrases.join(", "));
        }
    }

    match &result.biggest_shift {
        Some(shift) => {
            let _ = writeln!(
                out,
                "\nBiggest shift: {} -> {} ({}, score {:.1})",
                shift.from_year, shift.to_year, shift.summary, shift.score
            );
            for detail in &shift.details {
                let _ = writeln!(out, "- {}", detail);
            }
        }
        None => {
            let _ = writeln!(out, "\nNot enough years to compare");
        }
    }
    out
}
