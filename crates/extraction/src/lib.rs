//! Report extraction for SalesFlow
//!
//! Recovers a structured record from the free-form report written by the
//! orchestrator agents:
//! - **Sections**: cut the report into meeting, CRM and engagement spans
//! - **Fields**: single-line `Label: value` facts
//! - **Lists**: numbered or bulleted items under a heading
//! - **Email**: the generated email body between its markers
//! - **Assembly**: the layout-driven `ReportParser` that fills every leaf
//!
//! Extraction is total. Unknown or malformed input produces a record made
//! of defaults, never an error; errors only arise when compiling a layout.
//!
//! # Example
//!
//! ```
//! use salesflow_extraction::ReportParser;
//!
//! let parser = ReportParser::standard();
//! let record = parser.extract("STEP 1: MEETING INTELLIGENCE\nCompany: TechCorp");
//! assert_eq!(record.meeting_analysis.company, "TechCorp");
//! assert_eq!(record.meeting_analysis.budget, "N/A");
//! ```

pub mod action_plan;
pub mod assembler;
pub mod email;
pub mod fields;
pub mod json_report;
pub mod lists;
pub mod sections;

pub use action_plan::build_action_plan;
pub use assembler::{assemble, ReportParser};
pub use email::{email_body, EmailBodyExtractor};
pub use fields::{field, FieldMatcher};
pub use json_report::{detect_format, extract_any, FormatRouter, JsonReportParser, ReportFormat};
pub use lists::{list, ListMatcher};
pub use sections::{split, Sections};

use thiserror::Error;

/// Extraction errors
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Invalid pattern for label '{label}': {message}")]
    InvalidPattern { label: String, message: String },

    #[error("Invalid report layout: {0}")]
    InvalidLayout(String),

    #[error("Configuration error: {0}")]
    Config(#[from] salesflow_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

impl From<ExtractionError> for salesflow_core::Error {
    fn from(err: ExtractionError) -> Self {
        salesflow_core::Error::Extraction(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: ExtractionError =
            salesflow_config::ConfigError::FileNotFound("layout.yaml".to_string()).into();
        assert!(matches!(err, ExtractionError::Config(_)));

        let core: salesflow_core::Error = err.into();
        assert!(matches!(core, salesflow_core::Error::Extraction(ref m) if m.contains("layout.yaml")));
    }
}
