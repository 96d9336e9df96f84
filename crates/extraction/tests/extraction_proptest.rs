//! Property-based tests for report extraction
//!
//! Extraction must be total and deterministic over arbitrary text, and the
//! field and list rules must hold for generated values.

use proptest::prelude::*;

use salesflow_config::ListStrategy;
use salesflow_core::{ExtractedRecord, ReportExtractor};
use salesflow_extraction::{
    assemble, email_body, field, list, split, JsonReportParser, ReportParser,
};

/// Generate single-line values without surrounding whitespace
fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][a-z0-9]{0,8}( [A-Za-z0-9$,]{1,8}){0,3}"
}

/// Generate text that holds none of the report markers
fn unmarked_text_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 ,.:\\-\n]{0,200}"
}

/// Generate report-like text mixing markers, labels and noise
fn report_like_strategy() -> impl Strategy<Value = String> {
    let marker = prop::sample::select(vec![
        "STEP 1: MEETING INTELLIGENCE\n",
        "STEP 2: CRM ASSESSMENT\n",
        "STEP 3: ENGAGEMENT STRATEGY\n",
        "=== NEXT STEPS MENTIONED ===\n",
        "IMMEDIATE (24-48 hours):\n",
        "Pain Points:\n",
        "Decision Makers: ",
        "Full Name: ",
        "**Email Body:**\n",
        "**Email Personalization Notes:**\n",
        "===\n",
    ])
    .prop_map(str::to_string);

    let fragment = prop_oneof![
        marker,
        value_strategy().prop_map(|v| format!("Name: {}\n", v)),
        value_strategy().prop_map(|v| format!("1. {}\n", v)),
        value_strategy().prop_map(|v| format!("- {}\n", v)),
        "[ -~\n]{0,30}",
    ];
    prop::collection::vec(fragment, 0..20).prop_map(|parts| parts.concat())
}

fn assert_complete(record: &ExtractedRecord) {
    let meeting = &record.meeting_analysis;
    for scalar in [
        &meeting.customer_name,
        &meeting.company,
        &meeting.role,
        &meeting.budget,
        &meeting.timeline,
        &record.crm_update.deal_score,
        &record.follow_up_email.subject,
    ] {
        assert!(!scalar.is_empty());
        assert_eq!(scalar.trim(), scalar.as_str());
    }
    assert!(!record.crm_update.status.is_empty());
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_extraction_is_total(input in any::<String>()) {
            let record = assemble(&input);
            assert_complete(&record);
            prop_assert!(record.to_json().is_ok());
        }

        #[test]
        fn test_report_like_input_is_total(input in report_like_strategy()) {
            let record = assemble(&input);
            assert_complete(&record);
            for item in record
                .meeting_analysis
                .next_steps
                .iter()
                .chain(&record.meeting_analysis.pain_points)
                .chain(&record.crm_update.actions)
            {
                prop_assert!(!item.is_empty());
            }
        }

        #[test]
        fn test_extraction_is_idempotent(input in report_like_strategy()) {
            let parser = ReportParser::standard();
            prop_assert_eq!(parser.extract(&input), parser.extract(&input));
            prop_assert_eq!(assemble(&input), parser.extract(&input));
        }

        #[test]
        fn test_no_markers_yields_defaults(input in unmarked_text_strategy()) {
            prop_assert_eq!(assemble(&input), ExtractedRecord::default());
        }

        #[test]
        fn test_first_field_wins(first in value_strategy(), second in value_strategy()) {
            let section = format!("Name: {}\nName: {}", first, second);
            prop_assert_eq!(field(&section, "Name", "N/A"), first);
        }

        #[test]
        fn test_numbered_items_roundtrip(items in prop::collection::vec(value_strategy(), 1..8)) {
            let body: String = items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}\n", i + 1, item))
                .collect();
            let section = format!("=== NEXT STEPS MENTIONED ===\n{}===\ntrailing", body);

            prop_assert_eq!(
                list(&section, "=== NEXT STEPS MENTIONED ===", ListStrategy::Numbered, &[]),
                items
            );
        }

        #[test]
        fn test_bulleted_items_roundtrip(
            items in prop::collection::vec(value_strategy(), 1..8),
            noise in "[a-z ]{0,20}",
        ) {
            let body: String = items.iter().map(|item| format!("- {}\n{}\n", item, noise)).collect();
            let section = format!("IMMEDIATE (24-48 hours):\n{}===", body);

            prop_assert_eq!(
                list(&section, "IMMEDIATE (24-48 hours):", ListStrategy::LineFiltered, &[]),
                items
            );
        }

        #[test]
        fn test_split_never_contains_start_marker(input in report_like_strategy()) {
            let section = split(&input, "STEP 1: MEETING INTELLIGENCE", Some("STEP 2: CRM ASSESSMENT"));
            prop_assert!(!section.contains("STEP 2: CRM ASSESSMENT"));
            prop_assert_eq!(section.trim(), section);
        }

        #[test]
        fn test_email_body_excludes_notes(body in "[A-Za-z ,.\n]{0,80}", notes in "[a-z ]{0,20}") {
            let section = format!("**Email Body:**\n{}\n**Email Personalization Notes:**\n{}", body, notes);
            prop_assert_eq!(email_body(&section), body.trim());
        }

        #[test]
        fn test_json_parser_is_total(input in any::<String>()) {
            let record = JsonReportParser::new().extract(&input);
            prop_assert!(!record.meeting_analysis.customer_name.is_empty());
        }
    }
}
