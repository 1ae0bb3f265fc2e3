use url::Url;

use crate::error::WaybackError;

/// Accept only syntactically valid absolute URLs. Returns the input with
/// surrounding whitespace removed; callers work on that value from then on.
pub fn validate_target(raw: &str) -> Result<&str, WaybackError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WaybackError::invalid("URL is empty"));
    }

    Url::parse(trimmed).map_err(|e| WaybackError::invalid(format!("{}: {}", trimmed, e)))?;
    Ok(trimmed)
}

/// Shape a target URL the way the archive index expects it: one trailing
/// slash and the `http://` / `https://` prefix removed.
pub fn index_query_target(url: &str) -> String {
    let without_slash = url.strip_suffix('/').unwrap_or(url);
    without_slash
        .strip_prefix("https://")
        .or_else(|| without_slash.strip_prefix("http://"))
        .unwrap_or(without_slash)
        .to_string()
}

/// Originals reported by the index sometimes lack a scheme.
pub fn normalize_original(original: &str) -> String {
    if original.starts_with("http") {
        original.to_string()
    } else {
        format!("https://{}", original)
    }
}

pub fn archive_url(archive_base: &str, timestamp: &str, original: &str) -> String {
    format!(
        "{}/{}/{}",
        archive_base.trim_end_matches('/'),
        timestamp,
        original
    )
}
