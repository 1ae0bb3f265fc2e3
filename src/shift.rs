use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::model::{ShiftResult, YearMessaging};
use crate::utils::ellipsize;

const TITLE_WEIGHT: f64 = 3.0;
const DESCRIPTION_WEIGHT: f64 = 2.0;
const HEADING_WEIGHT: f64 = 3.0;
const PHRASE_WEIGHT: f64 = 2.0;

const DESCRIPTION_PREVIEW_CHARS: usize = 80;
const MAX_LISTED_HEADINGS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftSummary {
    #[serde(rename = "Major rebrand or redesign detected")]
    MajorRebrand,
    #[serde(rename = "Significant messaging shift")]
    Significant,
    #[serde(rename = "Moderate messaging update")]
    Moderate,
    #[serde(rename = "Minor wording adjustments")]
    Minor,
}

impl ShiftSummary {
    pub fn from_score(score: f64) -> Self {
        if score > 5.0 {
            ShiftSummary::MajorRebrand
        } else if score > 3.0 {
            ShiftSummary::Significant
        } else if score > 1.0 {
            ShiftSummary::Moderate
        } else {
            ShiftSummary::Minor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftSummary::MajorRebrand => "Major rebrand or redesign detected",
            ShiftSummary::Significant => "Significant messaging shift",
            ShiftSummary::Moderate => "Moderate messaging update",
            ShiftSummary::Minor => "Minor wording adjustments",
        }
    }
}

impl fmt::Display for ShiftSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dissimilarity of two consecutive years, from 0 (identical) to 10.
pub fn score_transition(a: &YearMessaging, b: &YearMessaging) -> f64 {
    let mut score = 0.0;

    if a.title != b.title {
        score += TITLE_WEIGHT;
    }
    if a.meta_description != b.meta_description {
        score += DESCRIPTION_WEIGHT;
    }

    let a_headings: HashSet<String> = a.headings.iter().map(|h| h.to_lowercase()).collect();
    let heading_overlap = b
        .headings
        .iter()
        .filter(|h| a_headings.contains(&h.to_lowercase()))
        .count();
    let heading_total = a_headings.len().max(b.headings.len()).max(1);
    score += (1.0 - heading_overlap as f64 / heading_total as f64) * HEADING_WEIGHT;

    // key phrases are already lowercase tokens, compared as-is
    let a_phrases: HashSet<&str> = a.key_phrases.iter().map(String::as_str).collect();
    let phrase_overlap = b
        .key_phrases
        .iter()
        .filter(|p| a_phrases.contains(p.as_str()))
        .count();
    let phrase_total = a_phrases.len().max(b.key_phrases.len()).max(1);
    score += (1.0 - phrase_overlap as f64 / phrase_total as f64) * PHRASE_WEIGHT;

    score
}

/// A later pair only replaces the running best when it scores strictly
/// higher, so ties resolve to the earliest pair.
pub fn supersedes(candidate: f64, incumbent: f64) -> bool {
    candidate > incumbent
}

/// Find the consecutive-year pair with the largest messaging change.
///
/// `years` must be in ascending year order. Returns `None` for fewer than two
/// years; otherwise always returns a pair, even if every pair scores 0.
pub fn compute_biggest_shift(years: &[YearMessaging]) -> Option<ShiftResult> {
    let (pair, score) = years
        .windows(2)
        .map(|pair| (pair, score_transition(&pair[0], &pair[1])))
        .fold(None::<(&[YearMessaging], f64)>, |best, candidate| match best {
            Some(incumbent) if !supersedes(candidate.1, incumbent.1) => Some(incumbent),
            _ => Some(candidate),
        })?;

    let (from, to) = (&pair[0], &pair[1]);
    Some(ShiftResult {
        from_year: from.year,
        to_year: to.year,
        score,
        summary: ShiftSummary::from_score(score),
        details: describe_shift(from, to),
    })
}

fn or_none(text: &str) -> &str {
    if text.is_empty() {
        "(none)"
    } else {
        text
    }
}

fn description_preview(text: &str) -> String {
    if text.is_empty() {
        "(none)".to_string()
    } else {
        ellipsize(text, DESCRIPTION_PREVIEW_CHARS)
    }
}

/// Headings of `of` with no case-insensitive match in `against`.
fn headings_missing_from<'a>(of: &'a [String], against: &[String]) -> Vec<&'a str> {
    let against: Vec<String> = against.iter().map(|h| h.to_lowercase()).collect();
    of.iter()
        .filter(|h| !against.contains(&h.to_lowercase()))
        .map(String::as_str)
        .collect()
}

fn quoted_list(headings: &[&str]) -> String {
    headings
        .iter()
        .take(MAX_LISTED_HEADINGS)
        .map(|h| format!("\"{}\"", h))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_shift(from: &YearMessaging, to: &YearMessaging) -> Vec<String> {
    let mut details = Vec::new();

    if from.title != to.title {
        details.push(format!(
            "Title changed from \"{}\" to \"{}\"",
            or_none(&from.title),
            or_none(&to.title)
        ));
    }

    if from.meta_description != to.meta_description {
        details.push(format!(
            "Description changed from \"{}\" to \"{}\"",
            description_preview(&from.meta_description),
            description_preview(&to.meta_description)
        ));
    }

    let added = headings_missing_from(&to.headings, &from.headings);
    if !added.is_empty() {
        details.push(format!("New headings appeared: {}", quoted_list(&added)));
    }

    let removed = headings_missing_from(&from.headings, &to.headings);
    if !removed.is_empty() {
        details.push(format!("Headings removed: {}", quoted_list(&removed)));
    }

    details
}
