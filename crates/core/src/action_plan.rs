//! Action plan types
//!
//! A follow-up plan derived from an extracted record, handed to the CRM
//! client together with the record itself.

use serde::{Deserialize, Serialize};

use crate::ExtractedRecord;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPriority {
    High,
    Medium,
    Low,
}

impl ActionPriority {
    /// Lowercase name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionPriority::High => "high",
            ActionPriority::Medium => "medium",
            ActionPriority::Low => "low",
        }
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Pending,
    Completed,
}

/// One follow-up task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// 1-based position in the plan
    pub id: usize,
    pub task: String,
    pub priority: ActionPriority,
    pub status: ActionStatus,
}

impl ActionItem {
    pub fn pending(id: usize, task: impl Into<String>, priority: ActionPriority) -> Self {
        Self {
            id,
            task: task.into(),
            priority,
            status: ActionStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ActionStatus::Pending
    }
}

/// Record plus the values a caller shows next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedReport {
    #[serde(flatten)]
    pub record: ExtractedRecord,
    pub action_plan: Vec<ActionItem>,
    /// Fixed business constant, not derived from the report
    pub time_saved: u32,
}
