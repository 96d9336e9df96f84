//! Follow-up email body extraction

use salesflow_config::constants::markers;
use salesflow_config::EmailLayout;
use salesflow_core::EMAIL_BODY_NOT_FOUND;

/// Body of the generated email with the standard markers and placeholder
pub fn email_body(section: &str) -> String {
    find_body(section, markers::EMAIL_BODY, markers::EMAIL_NOTES)
        .map(str::to_string)
        .unwrap_or_else(|| EMAIL_BODY_NOT_FOUND.to_string())
}

/// Text after `body_marker`, up to `notes_marker` or end of section
///
/// Trimmed at both ends; inner line breaks are kept as written.
pub fn find_body<'a>(section: &'a str, body_marker: &str, notes_marker: &str) -> Option<&'a str> {
    if body_marker.is_empty() {
        return None;
    }
    let start = section.find(body_marker)? + body_marker.len();
    let body = &section[start..];
    let end = if notes_marker.is_empty() {
        body.len()
    } else {
        body.find(notes_marker).unwrap_or(body.len())
    };
    Some(body[..end].trim())
}

/// Email body extractor bound to configured markers
#[derive(Debug, Clone)]
pub struct EmailBodyExtractor {
    body_marker: String,
    notes_marker: String,
    placeholder: String,
}

impl EmailBodyExtractor {
    pub fn new(layout: &EmailLayout) -> Self {
        Self {
            body_marker: layout.body_marker.clone(),
            notes_marker: layout.notes_marker.clone(),
            placeholder: layout.placeholder.clone(),
        }
    }

    pub fn extract(&self, section: &str) -> String {
        match find_body(section, &self.body_marker, &self.notes_marker) {
            Some(body) => body.to_string(),
            None => {
                tracing::debug!(marker = %self.body_marker, "Email body marker not found");
                self.placeholder.clone()
            }
        }
    }
}

impl Default for EmailBodyExtractor {
    fn default() -> Self {
        Self::new(&EmailLayout::default())
    }
}
