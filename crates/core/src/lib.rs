//! Core types and traits for SalesFlow report extraction
//!
//! This crate provides the foundational types shared by the other crates:
//! - The extracted record (meeting analysis, CRM update, follow-up email)
//! - Action plan items derived from a record
//! - The `ReportExtractor` trait implemented by the parsers
//! - Error types

pub mod action_plan;
pub mod error;
pub mod record;
pub mod traits;

pub use action_plan::{ActionItem, ActionPriority, ActionStatus, ProcessedReport};
pub use error::{Error, Result};
pub use record::{
    CrmUpdate, ExtractedRecord, FollowUpEmail, MeetingAnalysis, DEFAULT_CRM_STATUS,
    EMAIL_BODY_NOT_FOUND, NOT_AVAILABLE,
};
pub use traits::ReportExtractor;
