//! Centralized constants
//!
//! Heading markers and labels of the orchestrator report format, plus
//! defaults shared by settings and the built-in report layout.

/// Section and block markers of the three-step report
pub mod markers {
    pub const MEETING_SECTION: &str = "STEP 1: MEETING INTELLIGENCE";
    pub const CRM_SECTION: &str = "STEP 2: CRM ASSESSMENT";
    pub const ENGAGEMENT_SECTION: &str = "STEP 3: ENGAGEMENT STRATEGY";

    /// Closes a list block
    pub const BLOCK_DELIMITER: &str = "===";

    pub const NEXT_STEPS_HEADING: &str = "=== NEXT STEPS MENTIONED ===";
    pub const IMMEDIATE_ACTIONS_HEADING: &str = "IMMEDIATE (24-48 hours):";

    pub const EMAIL_BODY: &str = "**Email Body:**";
    pub const EMAIL_NOTES: &str = "**Email Personalization Notes:**";
}

/// Field labels, written without the trailing colon
pub mod labels {
    pub const NAME: &str = "Name";
    pub const COMPANY: &str = "Company";
    pub const ROLE: &str = "Role";
    pub const BUDGET: &str = "Budget";
    pub const TIMELINE: &str = "Timeline";

    pub const FULL_NAME: &str = "Full Name";
    pub const OPPORTUNITY_NAME: &str = "Opportunity Name";
    pub const OPPORTUNITY_STRENGTH: &str = "Opportunity Strength";
    pub const DEAL_SCORE: &str = "Deal Score";

    pub const SUBJECT_LINE: &str = "Subject Line";
    pub const SUBJECT: &str = "Subject";
}

/// List headings, written as they appear in the report
pub mod headings {
    pub const PAIN_POINTS: &str = "Pain Points:";
    pub const BUYING_SIGNALS: &str = "Buying Signals:";
    pub const PRIMARY_PAIN_POINT: &str = "Primary Pain Point:";
    pub const DECISION_MAKERS: &str = "Decision Makers:";
}

/// Defaults
pub mod defaults {
    /// Minutes of manual work saved per processed meeting
    pub const TIME_SAVED_MINUTES: u32 = 13;

    /// Environment variable prefix for settings overrides
    pub const ENV_PREFIX: &str = "SALESFLOW";

    /// Layout version name of the built-in table
    pub const LAYOUT_VERSION: &str = "orchestrator-v2";

    pub const LOG_LEVEL: &str = "info";
}

/// Derived CRM action texts
pub mod crm {
    pub const CREATE_CONTACT_PREFIX: &str = "Create new contact: ";
    pub const CREATE_OPPORTUNITY_PREFIX: &str = "Create new opportunity: ";
    pub const SET_FOLLOW_UP_TASKS: &str = "Set follow-up tasks based on action plan";
}
