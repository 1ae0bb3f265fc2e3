//! Heuristic extraction of messaging signals from raw archived markup.
//!
//! This is deliberately not an HTML parser. A handful of regexes pull out the
//! title, meta description and top-level headings; anything malformed simply
//! yields empty fields.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

pub const MAX_HEADINGS: usize = 5;
pub const MAX_KEY_PHRASES: usize = 8;

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"(?is)<title[^>]*>(.*?)</title>"));
static META_NAME_FIRST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']*)["'][^>]*>"#)
});
static META_CONTENT_FIRST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(r#"(?i)<meta[^>]*content=["']([^"']*)["'][^>]*name=["']description["'][^>]*>"#)
});
static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(?is)<h[1-3][^>]*>(.*?)</h[1-3]>"));
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"<[^>]*>"));

/// Messaging signals of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    pub headings: Vec<String>,
    pub key_phrases: Vec<String>,
}

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        // patterns are constants, covered by `test_patterns_compile`
        Err(err) => panic!("invalid extraction pattern `{pattern}`: {err}"),
    }
}

/// Pull the title, meta description, headings and key phrases out of `html`.
/// Never fails; missing or malformed markup yields empty fields.
pub fn extract_signals(html: &str) -> PageSignals {
    let title = title(html);
    let meta_description = meta_description(html);
    let headings = headings(html);
    let key_phrases = key_phrases(&title, &meta_description, &headings);

    PageSignals {
        title,
        meta_description,
        headings,
        key_phrases,
    }
}

fn strip_tags(fragment: &str) -> String {
    TAG_REGEX.replace_all(fragment, "").trim().to_string()
}

fn title(html: &str) -> String {
    TITLE_REGEX
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| strip_tags(m.as_str()))
        .unwrap_or_default()
}

fn meta_description(html: &str) -> String {
    META_NAME_FIRST_REGEX
        .captures(html)
        .or_else(|| META_CONTENT_FIRST_REGEX.captures(html))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn headings(html: &str) -> Vec<String> {
    let mut headings = Vec::new();
    for captures in HEADING_REGEX.captures_iter(html) {
        if headings.len() >= MAX_HEADINGS {
            break;
        }
        let Some(inner) = captures.get(1) else {
            continue;
        };
        let text = strip_tags(inner.as_str());
        let len = text.chars().count();
        if len > 2 && len < 200 {
            headings.push(text);
        }
    }
    headings
}

/// Most frequent tokens (longer than 3 characters once reduced to `a-z0-9`)
/// across the title, description and headings. Ties keep first-seen order.
pub fn key_phrases(title: &str, description: &str, headings: &[String]) -> Vec<String> {
    let mut all_text = format!("{} {}", title, description);
    for heading in headings {
        all_text.push(' ');
        all_text.push_str(heading);
    }
    let all_text = all_text.to_lowercase();

    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for word in all_text.split_whitespace() {
        if word.chars().count() <= 3 {
            continue;
        }
        let clean: String = word
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect();
        if clean.len() <= 3 {
            continue;
        }
        match index.get(&clean) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(clean.clone(), order.len());
                order.push((clean, 1));
            }
        }
    }

    // stable: equal counts stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(MAX_KEY_PHRASES)
        .map(|(word, _)| word)
        .collect()
}
