//! Record assembly
//!
//! `ReportParser` compiles a [`ReportLayout`] once and then turns any report
//! text into a complete [`ExtractedRecord`]. Sections are split once per
//! call; every leaf is filled from its section or from its default, so
//! extraction itself never fails.

use once_cell::sync::Lazy;

use salesflow_config::constants::crm;
use salesflow_config::{ReportLayout, Settings};
use salesflow_core::{
    CrmUpdate, ExtractedRecord, FollowUpEmail, MeetingAnalysis, ProcessedReport, ReportExtractor,
};

use crate::action_plan::build_action_plan;
use crate::email::EmailBodyExtractor;
use crate::fields::FieldMatcher;
use crate::lists::ListMatcher;
use crate::sections::Sections;
use crate::{ExtractionError, Result};

static STANDARD_PARSER: Lazy<ReportParser> = Lazy::new(|| {
    ReportParser::new(ReportLayout::standard()).expect("built-in report layout compiles")
});

/// Extract a record with the built-in layout
pub fn assemble(raw: &str) -> ExtractedRecord {
    STANDARD_PARSER.extract(raw)
}

#[derive(Debug, Clone)]
struct MeetingMatchers {
    customer_name: FieldMatcher,
    company: FieldMatcher,
    role: FieldMatcher,
    budget: FieldMatcher,
    timeline: FieldMatcher,
    pain_points: ListMatcher,
    decision_makers: ListMatcher,
    next_steps: ListMatcher,
}

impl MeetingMatchers {
    fn compile(layout: &ReportLayout) -> Result<Self> {
        let meeting = &layout.meeting;
        let missing = layout.missing_value.as_str();
        let delimiter = layout.block_delimiter.as_str();

        Ok(Self {
            customer_name: FieldMatcher::compile(&meeting.customer_name, missing)?,
            company: FieldMatcher::compile(&meeting.company, missing)?,
            role: FieldMatcher::compile(&meeting.role, missing)?,
            budget: FieldMatcher::compile(&meeting.budget, missing)?,
            timeline: FieldMatcher::compile(&meeting.timeline, missing)?,
            pain_points: ListMatcher::new(&meeting.pain_points, delimiter),
            decision_makers: ListMatcher::new(&meeting.decision_makers, delimiter),
            next_steps: ListMatcher::new(&meeting.next_steps, delimiter),
        })
    }

    fn extract(&self, section: &str) -> MeetingAnalysis {
        MeetingAnalysis {
            customer_name: self.customer_name.extract(section),
            company: self.company.extract(section),
            role: self.role.extract(section),
            pain_points: self.pain_points.extract(section),
            budget: self.budget.extract(section),
            timeline: self.timeline.extract(section),
            decision_makers: self.decision_makers.extract(section),
            next_steps: self.next_steps.extract(section),
        }
    }
}

#[derive(Debug, Clone)]
struct CrmMatchers {
    status: String,
    actions: ListMatcher,
    deal_score: FieldMatcher,
    contact_name: FieldMatcher,
    opportunity_name: FieldMatcher,
    derive_actions: bool,
}

impl CrmMatchers {
    fn compile(layout: &ReportLayout) -> Result<Self> {
        let crm = &layout.crm;
        let missing = layout.missing_value.as_str();

        Ok(Self {
            status: crm.status.clone(),
            actions: ListMatcher::new(&crm.actions, &layout.block_delimiter),
            deal_score: FieldMatcher::compile(&crm.deal_score, missing)?,
            contact_name: FieldMatcher::compile(&crm.contact_name, missing)?,
            opportunity_name: FieldMatcher::compile(&crm.opportunity_name, missing)?,
            derive_actions: crm.derive_actions,
        })
    }

    fn extract(&self, section: &str) -> CrmUpdate {
        // Derivation needs a CRM section; without one the fallback applies
        let actions = match self.actions.find(section) {
            Some(actions) => actions,
            None if self.derive_actions && !section.is_empty() => self.derived_actions(section),
            None => self.actions.fallback().to_vec(),
        };

        CrmUpdate {
            status: self.status.clone(),
            actions,
            deal_score: self.deal_score.extract(section),
        }
    }

    /// Actions implied by the contact and opportunity fields
    fn derived_actions(&self, section: &str) -> Vec<String> {
        let present = |matcher: &FieldMatcher| {
            matcher
                .find(section)
                .filter(|value| value != matcher.fallback())
        };

        let mut actions = Vec::with_capacity(3);
        if let Some(contact) = present(&self.contact_name) {
            actions.push(format!("{}{}", crm::CREATE_CONTACT_PREFIX, contact));
        }
        if let Some(opportunity) = present(&self.opportunity_name) {
            actions.push(format!("{}{}", crm::CREATE_OPPORTUNITY_PREFIX, opportunity));
        }
        actions.push(crm::SET_FOLLOW_UP_TASKS.to_string());

        tracing::debug!(count = actions.len(), "Derived CRM actions from fields");
        actions
    }
}

#[derive(Debug, Clone)]
struct EmailMatchers {
    subject: FieldMatcher,
    body: EmailBodyExtractor,
}

impl EmailMatchers {
    fn compile(layout: &ReportLayout) -> Result<Self> {
        Ok(Self {
            subject: FieldMatcher::compile(&layout.email.subject, &layout.missing_value)?,
            body: EmailBodyExtractor::new(&layout.email),
        })
    }

    fn extract(&self, section: &str) -> FollowUpEmail {
        FollowUpEmail {
            subject: self.subject.extract(section),
            body: self.body.extract(section),
        }
    }
}

/// Layout-driven parser for stepwise orchestrator reports
#[derive(Debug, Clone)]
pub struct ReportParser {
    layout: ReportLayout,
    meeting: MeetingMatchers,
    crm: CrmMatchers,
    email: EmailMatchers,
    time_saved: u32,
}

impl ReportParser {
    /// Validate and compile a layout
    pub fn new(layout: ReportLayout) -> Result<Self> {
        layout
            .validate()
            .map_err(|e| ExtractionError::InvalidLayout(e.to_string()))?;

        let meeting = MeetingMatchers::compile(&layout)?;
        let crm = CrmMatchers::compile(&layout)?;
        let email = EmailMatchers::compile(&layout)?;

        tracing::debug!(version = %layout.version, "Report parser compiled");

        Ok(Self {
            layout,
            meeting,
            crm,
            email,
            time_saved: salesflow_config::constants::defaults::TIME_SAVED_MINUTES,
        })
    }

    /// Parser for the built-in layout
    pub fn standard() -> Self {
        STANDARD_PARSER.clone()
    }

    /// Parser for the layout and time-saved constant in `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let layout = settings.report_layout()?;
        Ok(Self::new(layout)?.with_time_saved(settings.extraction.time_saved_minutes))
    }

    pub fn with_time_saved(mut self, minutes: u32) -> Self {
        self.time_saved = minutes;
        self
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    pub fn time_saved(&self) -> u32 {
        self.time_saved
    }

    /// Extract a complete record; never fails
    pub fn extract(&self, raw: &str) -> ExtractedRecord {
        let sections = Sections::split(raw, &self.layout.sections);

        let record = ExtractedRecord {
            meeting_analysis: self.meeting.extract(sections.meeting),
            crm_update: self.crm.extract(sections.crm),
            follow_up_email: self.email.extract(sections.engagement),
        };

        tracing::debug!(
            layout = %self.layout.version,
            next_steps = record.meeting_analysis.next_steps.len(),
            crm_actions = record.crm_update.actions.len(),
            "Report extracted"
        );
        record
    }

    /// Extract a record and attach the action plan and time saved
    pub fn process(&self, raw: &str) -> ProcessedReport {
        let record = self.extract(raw);
        let action_plan = build_action_plan(&record.meeting_analysis);

        ProcessedReport {
            record,
            action_plan,
            time_saved: self.time_saved,
        }
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReportExtractor for ReportParser {
    fn extract(&self, raw: &str) -> ExtractedRecord {
        ReportParser::extract(self, raw)
    }

    fn name(&self) -> &str {
        "stepwise"
    }
}
