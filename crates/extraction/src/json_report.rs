//! JSON payload reports
//!
//! The single-agent pipeline asked the model for a JSON object describing the
//! meeting. Model output often wraps that object in prose, so the outermost
//! `{ ... }` span is parsed. A payload that cannot be used is replaced by a
//! fixed fallback analysis that asks for manual review.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use salesflow_config::constants::markers;
use salesflow_core::{
    CrmUpdate, ExtractedRecord, FollowUpEmail, MeetingAnalysis, ReportExtractor,
};

use crate::assembler::ReportParser;

/// Scalar default of the JSON payload format
pub const NOT_MENTIONED: &str = "Not mentioned";

const REQUIRED_FIELDS: [&str; 5] = ["customer_name", "company", "role", "pain_points", "next_steps"];

static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

/// Shape of a raw report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Three-step orchestrator report
    Stepwise,
    /// JSON payload, possibly wrapped in prose
    Json,
    Unstructured,
}

/// Classify a raw report
pub fn detect_format(raw: &str) -> ReportFormat {
    let step_markers = [
        markers::MEETING_SECTION,
        markers::CRM_SECTION,
        markers::ENGAGEMENT_SECTION,
    ];
    if step_markers.iter().any(|m| raw.contains(m)) {
        ReportFormat::Stepwise
    } else if JSON_OBJECT.is_match(raw) {
        ReportFormat::Json
    } else {
        ReportFormat::Unstructured
    }
}

/// Extract with whichever built-in parser fits the input
///
/// Unstructured text goes through the stepwise parser and comes back as the
/// all-default record.
pub fn extract_any(raw: &str) -> ExtractedRecord {
    match detect_format(raw) {
        ReportFormat::Json => JsonReportParser::new().extract(raw),
        ReportFormat::Stepwise | ReportFormat::Unstructured => crate::assemble(raw),
    }
}

/// Why a payload was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
enum PayloadIssue {
    NoObject,
    Invalid(String),
    NotAnObject,
    MissingField(&'static str),
}

impl std::fmt::Display for PayloadIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadIssue::NoObject => write!(f, "no JSON object found"),
            PayloadIssue::Invalid(e) => write!(f, "invalid JSON: {}", e),
            PayloadIssue::NotAnObject => write!(f, "payload is not an object"),
            PayloadIssue::MissingField(field) => write!(f, "missing required field: {}", field),
        }
    }
}

/// Parser for JSON payload reports
///
/// The payload only describes the meeting; CRM and email leaves keep their
/// defaults.
#[derive(Debug, Clone)]
pub struct JsonReportParser {
    missing_value: String,
}

impl Default for JsonReportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportParser {
    pub fn new() -> Self {
        Self {
            missing_value: NOT_MENTIONED.to_string(),
        }
    }

    pub fn with_missing_value(mut self, missing: impl Into<String>) -> Self {
        self.missing_value = missing.into();
        self
    }

    /// Meeting analysis from the payload, or the manual-review fallback
    pub fn analyze(&self, raw: &str) -> MeetingAnalysis {
        match self.parse(raw) {
            Ok(analysis) => analysis,
            Err(issue) => {
                tracing::warn!(issue = %issue, "JSON report unusable, using fallback analysis");
                self.fallback_analysis()
            }
        }
    }

    /// Analysis used when the payload cannot be read
    pub fn fallback_analysis(&self) -> MeetingAnalysis {
        MeetingAnalysis {
            pain_points: vec!["Unable to extract automatically".to_string()],
            next_steps: vec![
                "Review meeting manually".to_string(),
                "Follow up with customer".to_string(),
            ],
            ..MeetingAnalysis::with_missing_value(&self.missing_value)
        }
    }

    fn parse(&self, raw: &str) -> Result<MeetingAnalysis, PayloadIssue> {
        let span = JSON_OBJECT.find(raw).ok_or(PayloadIssue::NoObject)?;
        let value: Value = serde_json::from_str(span.as_str())
            .map_err(|e| PayloadIssue::Invalid(e.to_string()))?;
        let object = value.as_object().ok_or(PayloadIssue::NotAnObject)?;

        if let Some(field) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
            return Err(PayloadIssue::MissingField(*field));
        }

        Ok(MeetingAnalysis {
            customer_name: self.scalar(object, "customer_name"),
            company: self.scalar(object, "company"),
            role: self.scalar(object, "role"),
            pain_points: string_list(object, "pain_points"),
            budget: self.scalar(object, "budget"),
            timeline: self.scalar(object, "timeline"),
            decision_makers: string_list(object, "decision_makers"),
            next_steps: string_list(object, "next_steps"),
        })
    }

    fn scalar(&self, object: &Map<String, Value>, key: &str) -> String {
        match object.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => self.missing_value.clone(),
        }
    }
}

/// String items of an array leaf; anything else is an empty list
fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

impl ReportExtractor for JsonReportParser {
    fn extract(&self, raw: &str) -> ExtractedRecord {
        ExtractedRecord {
            meeting_analysis: self.analyze(raw),
            crm_update: CrmUpdate::default(),
            follow_up_email: FollowUpEmail::default(),
        }
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Routes each report to the stepwise or JSON parser
#[derive(Debug, Clone, Default)]
pub struct FormatRouter {
    stepwise: ReportParser,
    json: JsonReportParser,
}

impl FormatRouter {
    pub fn new(stepwise: ReportParser, json: JsonReportParser) -> Self {
        Self { stepwise, json }
    }

    pub fn extractor_for(&self, raw: &str) -> &dyn ReportExtractor {
        match detect_format(raw) {
            ReportFormat::Json => &self.json,
            ReportFormat::Stepwise | ReportFormat::Unstructured => &self.stepwise,
        }
    }
}

impl ReportExtractor for FormatRouter {
    fn extract(&self, raw: &str) -> ExtractedRecord {
        let extractor = self.extractor_for(raw);
        tracing::debug!(extractor = extractor.name(), "Routing report");
        extractor.extract(raw)
    }

    fn name(&self) -> &str {
        "router"
    }
}
