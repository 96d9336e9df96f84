//! Section splitting
//!
//! A report is cut into three spans by literal heading markers. Markers are
//! exact substrings: case, spacing and punctuation must match.

use salesflow_config::{SectionSpec, SectionsLayout};

/// Span between `start` and `end`, trimmed
///
/// The span begins right after the first occurrence of `start` and runs to
/// the first `end` found after that point, or to end of text when `end` is
/// `None` or absent. A missing (or empty) `start` yields `""`.
pub fn split<'a>(text: &'a str, start: &str, end: Option<&str>) -> &'a str {
    if start.is_empty() {
        return "";
    }
    let Some(start_idx) = text.find(start) else {
        return "";
    };

    let body = &text[start_idx + start.len()..];
    let body_end = end
        .filter(|marker| !marker.is_empty())
        .and_then(|marker| body.find(marker))
        .unwrap_or(body.len());

    body[..body_end].trim()
}

/// Split using a configured section spec
pub fn split_section<'a>(text: &'a str, spec: &SectionSpec) -> &'a str {
    split(text, &spec.start, spec.end.as_deref())
}

/// The three report sections, borrowed from the raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sections<'a> {
    pub meeting: &'a str,
    pub crm: &'a str,
    pub engagement: &'a str,
}

impl<'a> Sections<'a> {
    pub fn split(text: &'a str, layout: &SectionsLayout) -> Self {
        let sections = Self {
            meeting: split_section(text, &layout.meeting),
            crm: split_section(text, &layout.crm),
            engagement: split_section(text, &layout.engagement),
        };

        if sections.is_empty() {
            tracing::debug!(len = text.len(), "No report sections found");
        }
        sections
    }

    /// True when no section marker was found (or every section is blank)
    pub fn is_empty(&self) -> bool {
        self.meeting.is_empty() && self.crm.is_empty() && self.engagement.is_empty()
    }
}
