//! Report Layout Configuration
//!
//! Declarative label/heading table that drives record assembly. One table
//! describes one report format version: where each section starts and ends,
//! which labels carry each scalar fact, which headings open each list and how
//! that list is laid out, and what every leaf falls back to.
//!
//! Alternative labels for the same fact (e.g. "Pain Points" and "Buying
//! Signals") are listed together and tried in order, so one table covers
//! several historical formats.

use serde::{Deserialize, Serialize};
use std::path::Path;

use salesflow_core::{DEFAULT_CRM_STATUS, EMAIL_BODY_NOT_FOUND, NOT_AVAILABLE};

use crate::constants::{defaults, headings, labels, markers};

/// Layout of list items under a heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListStrategy {
    /// Block is split on `N.` prefixes; an item may span several lines
    #[default]
    Numbered,
    /// Only lines starting with `N.` or `-` are items; other lines are dropped
    LineFiltered,
}

/// Section boundaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub start: String,
    /// `None` runs the section to end of text
    #[serde(default)]
    pub end: Option<String>,
}

impl SectionSpec {
    pub fn new(start: &str, end: Option<&str>) -> Self {
        Self {
            start: start.to_string(),
            end: end.map(str::to_string),
        }
    }
}

/// The three report sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsLayout {
    pub meeting: SectionSpec,
    pub crm: SectionSpec,
    pub engagement: SectionSpec,
}

impl Default for SectionsLayout {
    fn default() -> Self {
        Self {
            meeting: SectionSpec::new(markers::MEETING_SECTION, Some(markers::CRM_SECTION)),
            crm: SectionSpec::new(markers::CRM_SECTION, Some(markers::ENGAGEMENT_SECTION)),
            engagement: SectionSpec::new(markers::ENGAGEMENT_SECTION, None),
        }
    }
}

/// Scalar fact located by `Label: value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Literal labels without the colon, tried in order
    pub labels: Vec<String>,
    /// Overrides the layout-wide missing value
    #[serde(default)]
    pub fallback: Option<String>,
}

impl FieldSpec {
    pub fn new(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            fallback: None,
        }
    }
}

/// List block located by a heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSpec {
    /// Literal headings, tried in order; the first one present wins
    pub headings: Vec<String>,
    #[serde(default)]
    pub strategy: ListStrategy,
    /// Line-filtered blocks also end at the next `Label:` line
    #[serde(default)]
    pub stop_at_label: bool,
    /// Text after the heading is the single item when no marked line follows
    #[serde(default)]
    pub inline_value: bool,
    /// Returned when none of the headings is present
    #[serde(default)]
    pub fallback: Vec<String>,
}

impl ListSpec {
    pub fn new(headings: &[&str], strategy: ListStrategy) -> Self {
        Self {
            headings: headings.iter().map(|h| h.to_string()).collect(),
            strategy,
            stop_at_label: false,
            inline_value: false,
            fallback: Vec::new(),
        }
    }

    pub fn stopping_at_label(mut self) -> Self {
        self.stop_at_label = true;
        self
    }

    pub fn with_inline_value(mut self) -> Self {
        self.inline_value = true;
        self
    }
}

/// Meeting intelligence leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingLayout {
    pub customer_name: FieldSpec,
    pub company: FieldSpec,
    pub role: FieldSpec,
    pub budget: FieldSpec,
    pub timeline: FieldSpec,
    pub pain_points: ListSpec,
    pub decision_makers: ListSpec,
    pub next_steps: ListSpec,
}

impl Default for MeetingLayout {
    fn default() -> Self {
        Self {
            customer_name: FieldSpec::new(&[labels::NAME]),
            company: FieldSpec::new(&[labels::COMPANY]),
            role: FieldSpec::new(&[labels::ROLE]),
            budget: FieldSpec::new(&[labels::BUDGET]),
            timeline: FieldSpec::new(&[labels::TIMELINE]),
            pain_points: ListSpec::new(
                &[
                    headings::PAIN_POINTS,
                    headings::BUYING_SIGNALS,
                    headings::PRIMARY_PAIN_POINT,
                ],
                ListStrategy::LineFiltered,
            )
            .stopping_at_label()
            .with_inline_value(),
            decision_makers: ListSpec::new(&[headings::DECISION_MAKERS], ListStrategy::LineFiltered)
                .stopping_at_label()
                .with_inline_value(),
            next_steps: ListSpec::new(&[markers::NEXT_STEPS_HEADING], ListStrategy::Numbered),
        }
    }
}

/// CRM assessment leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmLayout {
    /// Constant status string copied into every record
    pub status: String,
    pub actions: ListSpec,
    pub deal_score: FieldSpec,
    /// Used only to derive actions when the action list is absent
    pub contact_name: FieldSpec,
    pub opportunity_name: FieldSpec,
    pub derive_actions: bool,
}

impl Default for CrmLayout {
    fn default() -> Self {
        Self {
            status: DEFAULT_CRM_STATUS.to_string(),
            actions: ListSpec::new(&[markers::IMMEDIATE_ACTIONS_HEADING], ListStrategy::LineFiltered),
            deal_score: FieldSpec::new(&[labels::OPPORTUNITY_STRENGTH, labels::DEAL_SCORE]),
            contact_name: FieldSpec::new(&[labels::FULL_NAME]),
            opportunity_name: FieldSpec::new(&[labels::OPPORTUNITY_NAME]),
            derive_actions: true,
        }
    }
}

/// Engagement strategy leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailLayout {
    pub subject: FieldSpec,
    pub body_marker: String,
    pub notes_marker: String,
    /// Body used when `body_marker` is absent
    pub placeholder: String,
}

impl Default for EmailLayout {
    fn default() -> Self {
        Self {
            subject: FieldSpec::new(&[labels::SUBJECT_LINE, labels::SUBJECT]),
            body_marker: markers::EMAIL_BODY.to_string(),
            notes_marker: markers::EMAIL_NOTES.to_string(),
            placeholder: EMAIL_BODY_NOT_FOUND.to_string(),
        }
    }
}

/// Root layout table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    pub version: String,
    /// Scalar default when no label matches
    pub missing_value: String,
    /// Marker that closes a list block
    pub block_delimiter: String,
    pub sections: SectionsLayout,
    pub meeting: MeetingLayout,
    pub crm: CrmLayout,
    pub email: EmailLayout,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReportLayout {
    /// Built-in table covering the known orchestrator report versions
    pub fn standard() -> Self {
        Self {
            version: defaults::LAYOUT_VERSION.to_string(),
            missing_value: NOT_AVAILABLE.to_string(),
            block_delimiter: markers::BLOCK_DELIMITER.to_string(),
            sections: SectionsLayout::default(),
            meeting: MeetingLayout::default(),
            crm: CrmLayout::default(),
            email: EmailLayout::default(),
        }
    }

    /// Load from a YAML, TOML or JSON file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReportLayoutError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReportLayoutError::FileNotFound(path.display().to_string(), e.to_string())
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let layout: Self = match extension.as_deref() {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ReportLayoutError::ParseError(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ReportLayoutError::ParseError(e.to_string()))?,
            _ => serde_yaml::from_str(&content)
                .map_err(|e| ReportLayoutError::ParseError(e.to_string()))?,
        };

        layout.validate()?;
        tracing::info!(
            path = %path.display(),
            version = %layout.version,
            "Loaded report layout"
        );
        Ok(layout)
    }

    /// Check that every marker, label and heading is usable
    pub fn validate(&self) -> Result<(), ReportLayoutError> {
        for (name, section) in self.section_specs() {
            if section.start.is_empty() {
                return Err(ReportLayoutError::Invalid(format!(
                    "sections.{name}.start must not be empty"
                )));
            }
            if matches!(section.end.as_deref(), Some("")) {
                return Err(ReportLayoutError::Invalid(format!(
                    "sections.{name}.end must be omitted rather than empty"
                )));
            }
        }

        for (name, field) in self.field_specs() {
            if field.labels.is_empty() || field.labels.iter().any(|l| l.trim().is_empty()) {
                return Err(ReportLayoutError::Invalid(format!(
                    "{name}.labels must hold at least one non-empty label"
                )));
            }
        }

        for (name, list) in self.list_specs() {
            if list.headings.is_empty() || list.headings.iter().any(|h| h.trim().is_empty()) {
                return Err(ReportLayoutError::Invalid(format!(
                    "{name}.headings must hold at least one non-empty heading"
                )));
            }
        }

        if self.block_delimiter.is_empty() {
            return Err(ReportLayoutError::Invalid(
                "block_delimiter must not be empty".to_string(),
            ));
        }
        if self.email.body_marker.is_empty() || self.email.notes_marker.is_empty() {
            return Err(ReportLayoutError::Invalid(
                "email markers must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn section_specs(&self) -> [(&'static str, &SectionSpec); 3] {
        [
            ("meeting", &self.sections.meeting),
            ("crm", &self.sections.crm),
            ("engagement", &self.sections.engagement),
        ]
    }

    fn field_specs(&self) -> [(&'static str, &FieldSpec); 9] {
        [
            ("meeting.customer_name", &self.meeting.customer_name),
            ("meeting.company", &self.meeting.company),
            ("meeting.role", &self.meeting.role),
            ("meeting.budget", &self.meeting.budget),
            ("meeting.timeline", &self.meeting.timeline),
            ("crm.deal_score", &self.crm.deal_score),
            ("crm.contact_name", &self.crm.contact_name),
            ("crm.opportunity_name", &self.crm.opportunity_name),
            ("email.subject", &self.email.subject),
        ]
    }

    fn list_specs(&self) -> [(&'static str, &ListSpec); 4] {
        [
            ("meeting.pain_points", &self.meeting.pain_points),
            ("meeting.decision_makers", &self.meeting.decision_makers),
            ("meeting.next_steps", &self.meeting.next_steps),
            ("crm.actions", &self.crm.actions),
        ]
    }
}

/// Report layout errors
#[derive(Debug, thiserror::Error)]
pub enum ReportLayoutError {
    #[error("Report layout file not found: {0}: {1}")]
    FileNotFound(String, String),

    #[error("Failed to parse report layout: {0}")]
    ParseError(String),

    #[error("Invalid report layout: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_standard_layout_is_valid() {
        let layout = ReportLayout::standard();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.sections.meeting.start, "STEP 1: MEETING INTELLIGENCE");
        assert_eq!(layout.sections.meeting.end.as_deref(), Some("STEP 2: CRM ASSESSMENT"));
        assert!(layout.sections.engagement.end.is_none());
        assert_eq!(layout.meeting.next_steps.strategy, ListStrategy::Numbered);
        assert_eq!(layout.crm.actions.strategy, ListStrategy::LineFiltered);
    }

    #[test]
    fn test_pain_point_variants_are_merged() {
        let layout = ReportLayout::standard();
        let headings = &layout.meeting.pain_points.headings;
        assert_eq!(headings[0], "Pain Points:");
        assert!(headings.iter().any(|h| h == "Buying Signals:"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
version: legacy
meeting:
  pain_points:
    headings: ["Buying Signals:"]
    strategy: numbered
    fallback: ["None captured"]
"#;
        let layout: ReportLayout = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(layout.version, "legacy");
        assert_eq!(layout.meeting.pain_points.strategy, ListStrategy::Numbered);
        assert_eq!(layout.meeting.pain_points.fallback, vec!["None captured"]);
        assert!(!layout.meeting.pain_points.stop_at_label);
        assert!(!layout.meeting.pain_points.inline_value);
        assert!(ReportLayout::standard().meeting.decision_makers.inline_value);
        assert!(!ReportLayout::standard().crm.actions.inline_value);
        // Untouched leaves keep the standard table
        assert_eq!(layout.meeting.customer_name.labels, vec!["Name"]);
        assert_eq!(layout.missing_value, "N/A");
    }

    #[test]
    fn test_load_toml_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
version = "toml-layout"
missing_value = "Unknown"

[crm]
derive_actions = false
"#
        )
        .unwrap();

        let layout = ReportLayout::load(file.path()).unwrap();
        assert_eq!(layout.version, "toml-layout");
        assert_eq!(layout.missing_value, "Unknown");
        assert!(!layout.crm.derive_actions);
    }

    #[test]
    fn test_shipped_layout_matches_standard() {
        let path = concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../config/layouts/orchestrator-v2.yaml"
        );
        let layout = ReportLayout::load(path).unwrap();
        assert_eq!(layout, ReportLayout::standard());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReportLayout::load("/nonexistent/layout.yaml").unwrap_err();
        assert!(matches!(err, ReportLayoutError::FileNotFound(..)));
    }

    #[test]
    fn test_validation_rejects_empty_labels() {
        let mut layout = ReportLayout::standard();
        layout.meeting.company.labels.clear();
        assert!(layout.validate().is_err());

        let mut layout = ReportLayout::standard();
        layout.crm.actions.headings = vec!["  ".to_string()];
        assert!(layout.validate().is_err());

        let mut layout = ReportLayout::standard();
        layout.sections.crm.start.clear();
        assert!(layout.validate().is_err());
    }
}
