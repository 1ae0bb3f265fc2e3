use chrono::{Datelike, Local, NaiveDate};

/// Calendar fields derived from a 14-digit archive capture timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDate {
    pub year: i32,
    pub month: String,
    pub formatted_date: String,
}

/// Parse a `YYYYMMDDHHMMSS` capture timestamp.
///
/// Returns `None` for anything that is not 14 ASCII digits naming a real
/// calendar day. The time-of-day part is not validated.
pub fn parse_capture_timestamp(ts: &str) -> Option<CaptureDate> {
    if ts.len() != 14 || !ts.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = ts[0..4].parse().ok()?;
    let month: u32 = ts[4..6].parse().ok()?;
    let day: u32 = ts[6..8].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    Some(CaptureDate {
        year,
        month: date.format("%b").to_string(),
        formatted_date: date.format("%b %-d, %Y").to_string(),
    })
}

/// Inclusive `YYYYMMDD` date range handed to the archive index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookbackWindow {
    pub from: String,
    pub to: String,
}

impl LookbackWindow {
    /// Jan 1 of `end_year - years` through Dec 31 of `end_year`.
    pub fn ending_in(end_year: i32, years: u32) -> Self {
        let start_year = end_year - years as i32;
        LookbackWindow {
            from: format!("{:04}0101", start_year),
            to: format!("{:04}1231", end_year),
        }
    }

    pub fn current(years: u32) -> Self {
        Self::ending_in(Local::now().year(), years)
    }
}
