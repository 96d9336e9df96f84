//! Scalar field extraction
//!
//! A field is a `Label: value` line. The label is literal text anchored at
//! line start (leading spaces or tabs allowed) and matched case-sensitively.
//! The value is the rest of the label line or, when that is blank, the next
//! line. Exactly one line is captured.

use regex::Regex;

use salesflow_config::FieldSpec;

use crate::{ExtractionError, Result};

/// Compile the line pattern for one literal label
pub fn field_pattern(label: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?m)^[^\S\n]*{}:[^\S\n]*(?:\n[^\S\n]*)?(\S.*)$",
        regex::escape(label)
    ))
}

/// Value of the first `label:` line in `section`, or `fallback`
pub fn field(section: &str, label: &str, fallback: &str) -> String {
    match field_pattern(label) {
        Ok(pattern) => capture(&pattern, section).unwrap_or_else(|| fallback.to_string()),
        Err(e) => {
            tracing::warn!(label = %label, error = %e, "Field label did not compile");
            fallback.to_string()
        }
    }
}

fn capture(pattern: &Regex, section: &str) -> Option<String> {
    pattern
        .captures(section)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Compiled field spec: alternative labels tried in order
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    labels: Vec<(String, Regex)>,
    fallback: String,
}

impl FieldMatcher {
    /// Compile a spec; `missing_value` applies when the spec has no fallback
    pub fn compile(spec: &FieldSpec, missing_value: &str) -> Result<Self> {
        let labels = spec
            .labels
            .iter()
            .map(|label| {
                field_pattern(label)
                    .map(|pattern| (label.clone(), pattern))
                    .map_err(|e| ExtractionError::InvalidPattern {
                        label: label.clone(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            labels,
            fallback: spec
                .fallback
                .clone()
                .unwrap_or_else(|| missing_value.to_string()),
        })
    }

    /// Value of the first label that matches, if any
    pub fn find(&self, section: &str) -> Option<String> {
        self.labels
            .iter()
            .find_map(|(_, pattern)| capture(pattern, section))
    }

    /// Value of the first label that matches, or the fallback
    pub fn extract(&self, section: &str) -> String {
        self.find(section).unwrap_or_else(|| {
            tracing::debug!(label = %self.primary_label(), "Field not found, using fallback");
            self.fallback.clone()
        })
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    fn primary_label(&self) -> &str {
        self.labels.first().map(|(l, _)| l.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value() {
        let section = "Name: Sarah Johnson\nCompany: TechCorp Solutions\nRole: VP Operations";
        assert_eq!(field(section, "Company", "N/A"), "TechCorp Solutions");
        assert_eq!(field(section, "Role", "N/A"), "VP Operations");
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(field("Name: Alice\nName: Bob", "Name", "N/A"), "Alice");
    }

    #[test]
    fn test_missing_label_uses_fallback() {
        assert_eq!(field("Company: TechCorp", "Budget", "N/A"), "N/A");
        assert_eq!(field("", "Budget", "Not mentioned"), "Not mentioned");
    }

    #[test]
    fn test_label_must_start_line() {
        // "Full Name" is a different label
        assert_eq!(field("Full Name: Sarah", "Name", "N/A"), "N/A");
        assert_eq!(field("  Name:  Sarah  ", "Name", "N/A"), "Sarah");
        assert_eq!(field("\tBudget:\t$50K", "Budget", "N/A"), "$50K");
    }

    #[test]
    fn test_value_on_next_line() {
        assert_eq!(field("Budget:\n$50K", "Budget", "N/A"), "$50K");
        assert_eq!(field("Budget:   \n  $50,000 annually\nTimeline: Q1", "Budget", "N/A"), "$50,000 annually");
        assert_eq!(field("Budget:\r\n$50K\r\n", "Budget", "N/A"), "$50K");
    }

    #[test]
    fn test_single_line_only() {
        // The first label takes the following line, even if it looks like a label
        let section = "Budget:\nCompany: TechCorp\nBudget: $50K";
        assert_eq!(field(section, "Budget", "N/A"), "Company: TechCorp");
        assert_eq!(field("Budget: $50K\nper year", "Budget", "N/A"), "$50K");
        // Only one line break is crossed
        assert_eq!(field("Budget:\n\n$50K", "Budget", "N/A"), "N/A");
        assert_eq!(field("Budget:", "Budget", "N/A"), "N/A");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(field("Name: Sarah\r\nCompany: TechCorp\r\n", "Name", "N/A"), "Sarah");
    }

    #[test]
    fn test_labels_are_literal() {
        let section = "Timeline (Q1): March\nTimelineX: nope";
        assert_eq!(field(section, "Timeline (Q1)", "N/A"), "March");
        assert_eq!(field("DealXScore: 8", "Deal.Score", "N/A"), "N/A");
        assert_eq!(field("a+b: c", "a+b", "N/A"), "c");
    }

    #[test]
    fn test_label_is_case_sensitive() {
        assert_eq!(field("name: Sarah", "Name", "N/A"), "N/A");
    }

    #[test]
    fn test_matcher_alternatives() {
        let spec = FieldSpec::new(&["Opportunity Strength", "Deal Score"]);
        let matcher = FieldMatcher::compile(&spec, "N/A").unwrap();

        assert_eq!(matcher.extract("Deal Score: 7/10"), "7/10");
        assert_eq!(
            matcher.extract("Deal Score: 7/10\nOpportunity Strength: High"),
            "High"
        );
        assert_eq!(matcher.extract("nothing here"), "N/A");
        assert!(matcher.find("nothing here").is_none());
    }

    #[test]
    fn test_spec_fallback_overrides_missing_value() {
        let mut spec = FieldSpec::new(&["Budget"]);
        spec.fallback = Some("Not mentioned".to_string());
        let matcher = FieldMatcher::compile(&spec, "N/A").unwrap();
        assert_eq!(matcher.fallback(), "Not mentioned");
        assert_eq!(matcher.extract(""), "Not mentioned");
    }
}
