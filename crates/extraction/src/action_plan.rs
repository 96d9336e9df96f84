//! Follow-up action plan
//!
//! Turns the next steps of a meeting into an ordered task list for the CRM
//! client. The first next step is the most urgent; the email follow-up and
//! the CRM note close the plan.

use salesflow_core::{ActionItem, ActionPriority, ActionStatus, MeetingAnalysis};

const CRM_NOTE_TASK: &str = "CRM record updated with meeting notes";

/// Build the plan: next steps, then email follow-up, then CRM note
pub fn build_action_plan(analysis: &MeetingAnalysis) -> Vec<ActionItem> {
    let mut plan: Vec<ActionItem> = analysis
        .next_steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let priority = if i == 0 {
                ActionPriority::High
            } else {
                ActionPriority::Medium
            };
            ActionItem::pending(i + 1, step.as_str(), priority)
        })
        .collect();

    plan.push(ActionItem::pending(
        plan.len() + 1,
        format!("Send follow-up email to {}", analysis.customer_name),
        ActionPriority::High,
    ));

    plan.push(ActionItem {
        id: plan.len() + 1,
        task: CRM_NOTE_TASK.to_string(),
        priority: ActionPriority::Low,
        status: ActionStatus::Completed,
    });

    for item in &plan {
        tracing::trace!(
            id = item.id,
            priority = item.priority.as_str(),
            task = %item.task,
            "Planned action"
        );
    }

    plan
}
