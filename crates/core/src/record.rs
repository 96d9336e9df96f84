//! Extracted record types
//!
//! The record is the single output of one extraction pass. Every leaf is a
//! string or an ordered list of strings and is always present: parsers fill
//! gaps with typed defaults instead of leaving values out.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Default value for a scalar fact that could not be located
pub const NOT_AVAILABLE: &str = "N/A";

/// Default placeholder for a follow-up email without a body marker
pub const EMAIL_BODY_NOT_FOUND: &str = "Email body not found.";

/// Informational CRM status shown with every record
pub const DEFAULT_CRM_STATUS: &str = "✅ Update Instructions Generated";

/// Root output of the extraction pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    pub meeting_analysis: MeetingAnalysis,
    pub crm_update: CrmUpdate,
    pub follow_up_email: FollowUpEmail,
}

impl ExtractedRecord {
    /// Serialize to the key/value shape the display layer consumes
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to a `serde_json::Value`
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self {
            meeting_analysis: MeetingAnalysis::default(),
            crm_update: CrmUpdate::default(),
            follow_up_email: FollowUpEmail::default(),
        }
    }
}

/// Customer facts recovered from the meeting intelligence step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingAnalysis {
    pub customer_name: String,
    pub company: String,
    pub role: String,
    pub pain_points: Vec<String>,
    pub budget: String,
    pub timeline: String,
    pub decision_makers: Vec<String>,
    pub next_steps: Vec<String>,
}

impl MeetingAnalysis {
    /// Analysis with every scalar set to `missing` and every list empty
    pub fn with_missing_value(missing: &str) -> Self {
        Self {
            customer_name: missing.to_string(),
            company: missing.to_string(),
            role: missing.to_string(),
            pain_points: Vec::new(),
            budget: missing.to_string(),
            timeline: missing.to_string(),
            decision_makers: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn has_next_steps(&self) -> bool {
        !self.next_steps.is_empty()
    }
}

impl Default for MeetingAnalysis {
    fn default() -> Self {
        Self::with_missing_value(NOT_AVAILABLE)
    }
}

/// CRM actions recovered from the CRM assessment step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmUpdate {
    /// Constant informational status, never derived from input
    pub status: String,
    pub actions: Vec<String>,
    pub deal_score: String,
}

impl Default for CrmUpdate {
    fn default() -> Self {
        Self {
            status: DEFAULT_CRM_STATUS.to_string(),
            actions: Vec::new(),
            deal_score: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Email draft recovered from the engagement strategy step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpEmail {
    pub subject: String,
    /// Multi-line body, internal line breaks preserved
    pub body: String,
}

impl FollowUpEmail {
    /// Text placed on the clipboard by the display layer's copy action
    pub fn clipboard_text(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }
}

impl Default for FollowUpEmail {
    fn default() -> Self {
        Self {
            subject: NOT_AVAILABLE.to_string(),
            body: EMAIL_BODY_NOT_FOUND.to_string(),
        }
    }
}
