//! Extraction trait
//!
//! Parsers for the different report formats implement `ReportExtractor` so a
//! caller can hold any of them behind one interface.

use crate::ExtractedRecord;

/// Turns one raw AI report into a complete record
///
/// Implementations are total: every input string, including the empty
/// string, yields a fully populated record. They keep no state between
/// calls, so a shared reference can be used from several threads.
pub trait ReportExtractor: Send + Sync {
    /// Extract a record from the raw report text
    fn extract(&self, raw: &str) -> ExtractedRecord;

    /// Extractor name for logging
    fn name(&self) -> &str;
}
