//! Orchestrator agent directory
//!
//! The four agents that produce the stepwise report, and the hosted
//! orchestrator instance that runs them. Identifiers are deployment-specific
//! and come from configuration; none are compiled in.

use serde::{Deserialize, Serialize};

/// Default hosted orchestrator region
pub const DEFAULT_ORCHESTRATE_HOST: &str = "https://au-syd.watson-orchestrate.cloud.ibm.com";

const CHAT_LOADER_PATH: &str = "/wxochat/wxoLoader.js?embed=true";

/// One agent as shown in the agent directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Deployed agent id, empty until configured
    #[serde(default)]
    pub agent_id: String,
    /// Deployed environment id, empty until configured
    #[serde(default)]
    pub environment_id: String,
}

impl AgentIdentity {
    fn new(name: &str, description: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            agent_id: String::new(),
            environment_id: String::new(),
        }
    }

    /// Whether both deployment ids are set
    pub fn is_deployed(&self) -> bool {
        !self.agent_id.is_empty() && !self.environment_id.is_empty()
    }
}

/// Orchestrator plus the three specialist agents, one per report step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentDirectory {
    pub orchestrator: AgentIdentity,
    pub meeting_intelligence: AgentIdentity,
    pub crm_intelligence: AgentIdentity,
    pub engagement: AgentIdentity,
}

impl Default for AgentDirectory {
    fn default() -> Self {
        Self {
            orchestrator: AgentIdentity::new(
                "SalesFlow AI Orchestrator",
                "Complete end-to-end sales workflow automation",
                "🎯",
            ),
            meeting_intelligence: AgentIdentity::new(
                "Sales Intelligence Agent",
                "Extracts customer info, pain points, and next steps",
                "🔍",
            ),
            crm_intelligence: AgentIdentity::new(
                "CRM Intelligence Engine",
                "Generates CRM update instructions and deal scoring",
                "💼",
            ),
            engagement: AgentIdentity::new(
                "Engagement Automation Specialist",
                "Creates personalized follow-up emails",
                "📧",
            ),
        }
    }
}

impl AgentDirectory {
    /// Agents in report order, orchestrator first
    pub fn iter(&self) -> impl Iterator<Item = &AgentIdentity> {
        [
            &self.orchestrator,
            &self.meeting_intelligence,
            &self.crm_intelligence,
            &self.engagement,
        ]
        .into_iter()
    }

    /// Find an agent by display name, case-insensitive
    pub fn find(&self, name: &str) -> Option<&AgentIdentity> {
        self.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

/// Hosted orchestrator instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestrateConfig {
    pub host_url: String,
    /// Orchestration (tenant) id
    pub orchestration_id: String,
    pub crn: String,
}

impl Default for OrchestrateConfig {
    fn default() -> Self {
        Self {
            host_url: DEFAULT_ORCHESTRATE_HOST.to_string(),
            orchestration_id: String::new(),
            crn: String::new(),
        }
    }
}

impl OrchestrateConfig {
    /// URL of the embeddable chat loader script
    pub fn chat_loader_url(&self) -> String {
        format!("{}{}", self.host_url.trim_end_matches('/'), CHAT_LOADER_PATH)
    }

    pub fn is_configured(&self) -> bool {
        !self.orchestration_id.is_empty() && !self.crn.is_empty()
    }
}
