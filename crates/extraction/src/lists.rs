//! List extraction
//!
//! A list block starts right after a literal heading and runs to the next
//! block delimiter (`===`) or the end of the section. Two layouts are
//! supported:
//!
//! - **Numbered**: the block is split on `N.` prefixes at line start and every
//!   non-empty chunk is an item, so one item may span several lines.
//! - **Line-filtered**: only lines starting with `N.` or `-` are items; the
//!   token is stripped and every other line is dropped. Lists flagged
//!   `inline_value` keep the text after the heading as the single item when
//!   no marked line follows.
//!
//! A missing heading yields the caller's fallback. A heading that is present
//! but has no items yields an empty list.

use once_cell::sync::Lazy;
use regex::Regex;

use salesflow_config::constants::markers;
use salesflow_config::{ListSpec, ListStrategy};

// Numbered item prefix at line start, used as a split point
static NUMBERED_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+\.\s*").unwrap());

// Item token at the start of a trimmed line
static ITEM_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\d+\.|-)\s*").unwrap());

// `Some Label:` line that opens the next sub-block
static LABEL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}[^:\n]{0,60}:(?:\s|$)").unwrap());

/// Items under `heading`, or `fallback` when the heading is absent
pub fn list(
    section: &str,
    heading: &str,
    strategy: ListStrategy,
    fallback: &[String],
) -> Vec<String> {
    match block(section, heading, markers::BLOCK_DELIMITER) {
        Some(block) => items(block, strategy, false, false),
        None => fallback.to_vec(),
    }
}

/// Text between `heading` and the next `delimiter`, `None` without heading
fn block<'a>(section: &'a str, heading: &str, delimiter: &str) -> Option<&'a str> {
    if heading.is_empty() {
        return None;
    }
    let start = section.find(heading)? + heading.len();
    let rest = &section[start..];
    let end = if delimiter.is_empty() {
        rest.len()
    } else {
        rest.find(delimiter).unwrap_or(rest.len())
    };
    Some(&rest[..end])
}

fn items(
    block: &str,
    strategy: ListStrategy,
    stop_at_label: bool,
    inline_value: bool,
) -> Vec<String> {
    match strategy {
        ListStrategy::Numbered => numbered_items(block),
        ListStrategy::LineFiltered => line_filtered_items(block, stop_at_label, inline_value),
    }
}

fn numbered_items(block: &str) -> Vec<String> {
    NUMBERED_SPLIT
        .split(block)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn line_filtered_items(block: &str, stop_at_label: bool, inline_value: bool) -> Vec<String> {
    let mut lines = block.lines();
    // Remainder of the heading line
    let inline = lines.next().map(strip_item_token).unwrap_or("");

    let mut items = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(token) = ITEM_TOKEN.find(line) {
            let item = line[token.end()..].trim();
            if !item.is_empty() {
                items.push(item.to_string());
            }
        } else if stop_at_label && LABEL_LINE.is_match(line) {
            break;
        }
    }

    if inline_value && items.is_empty() && !inline.is_empty() {
        items.push(inline.to_string());
    }
    items
}

fn strip_item_token(line: &str) -> &str {
    let line = line.trim();
    match ITEM_TOKEN.find(line) {
        Some(token) => line[token.end()..].trim(),
        None => line,
    }
}

/// Configured list spec bound to a block delimiter
#[derive(Debug, Clone)]
pub struct ListMatcher {
    headings: Vec<String>,
    strategy: ListStrategy,
    stop_at_label: bool,
    inline_value: bool,
    fallback: Vec<String>,
    delimiter: String,
}

impl ListMatcher {
    pub fn new(spec: &ListSpec, delimiter: &str) -> Self {
        Self {
            headings: spec.headings.clone(),
            strategy: spec.strategy,
            stop_at_label: spec.stop_at_label,
            inline_value: spec.inline_value,
            fallback: spec.fallback.clone(),
            delimiter: delimiter.to_string(),
        }
    }

    /// Items under the first heading present, `None` when none is present
    pub fn find(&self, section: &str) -> Option<Vec<String>> {
        self.headings.iter().find_map(|heading| {
            block(section, heading, &self.delimiter)
                .map(|b| items(b, self.strategy, self.stop_at_label, self.inline_value))
        })
    }

    /// Items under the first heading present, or the fallback
    pub fn extract(&self, section: &str) -> Vec<String> {
        self.find(section).unwrap_or_else(|| {
            tracing::debug!(
                heading = %self.headings.first().map(String::as_str).unwrap_or(""),
                "List heading not found, using fallback"
            );
            self.fallback.clone()
        })
    }

    pub fn fallback(&self) -> &[String] {
        &self.fallback
    }
}
