//! Report domain configuration
//!
//! The label table that drives extraction, and the agent directory of the
//! orchestrator that writes the reports.

mod agents;
mod report_layout;

pub use agents::{AgentDirectory, AgentIdentity, OrchestrateConfig, DEFAULT_ORCHESTRATE_HOST};
pub use report_layout::{
    CrmLayout, EmailLayout, FieldSpec, ListSpec, ListStrategy, MeetingLayout, ReportLayout,
    ReportLayoutError, SectionSpec, SectionsLayout,
};
