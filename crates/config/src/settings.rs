//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::defaults;
use crate::domain::{AgentDirectory, OrchestrateConfig, ReportLayout};
use crate::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Relaxed validation
    #[default]
    Development,
    /// Deployment ids required
    Staging,
    /// All validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is the production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Extraction overrides and report layout location
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Hosted orchestrator instance
    #[serde(default)]
    pub orchestrate: OrchestrateConfig,

    #[serde(default)]
    pub agents: AgentDirectory,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    defaults::LOG_LEVEL.to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Extraction settings
///
/// Every override is optional and replaces the matching report layout value
/// only when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Report layout file (YAML, TOML or JSON); built-in table when unset
    #[serde(default)]
    pub layout_path: Option<String>,

    #[serde(default)]
    pub missing_value: Option<String>,

    #[serde(default)]
    pub email_placeholder: Option<String>,

    #[serde(default)]
    pub crm_status: Option<String>,

    /// Items returned when no next-steps heading is present
    #[serde(default)]
    pub next_steps_fallback: Option<Vec<String>>,

    #[serde(default)]
    pub derive_crm_actions: Option<bool>,

    /// Minutes saved per processed meeting, shown next to the record
    #[serde(default = "default_time_saved")]
    pub time_saved_minutes: u32,
}

fn default_time_saved() -> u32 {
    defaults::TIME_SAVED_MINUTES
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            layout_path: None,
            missing_value: None,
            email_placeholder: None,
            crm_status: None,
            next_steps_fallback: None,
            derive_crm_actions: None,
            time_saved_minutes: default_time_saved(),
        }
    }
}

impl ExtractionSettings {
    /// Apply the set overrides to a layout
    pub fn apply_to(&self, layout: &mut ReportLayout) {
        if let Some(missing) = &self.missing_value {
            layout.missing_value = missing.clone();
        }
        if let Some(placeholder) = &self.email_placeholder {
            layout.email.placeholder = placeholder.clone();
        }
        if let Some(status) = &self.crm_status {
            layout.crm.status = status.clone();
        }
        if let Some(fallback) = &self.next_steps_fallback {
            layout.meeting.next_steps.fallback = fallback
                .iter()
                .map(|step| step.trim())
                .filter(|step| !step.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(derive) = self.derive_crm_actions {
            layout.crm.derive_actions = derive;
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_observability()?;
        self.validate_extraction()?;

        if self.environment.is_strict() {
            self.validate_deployment()?;
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Must be one of {}, got '{}'",
                    LOG_LEVELS.join(", "),
                    self.observability.log_level
                ),
            });
        }
        Ok(())
    }

    fn validate_extraction(&self) -> Result<(), ConfigError> {
        let extraction = &self.extraction;

        if extraction.time_saved_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.time_saved_minutes".to_string(),
                message: "Must be positive".to_string(),
            });
        }

        if let Some(path) = &extraction.layout_path {
            if !Path::new(path).exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
        }

        for (field, value) in [
            ("extraction.missing_value", &extraction.missing_value),
            ("extraction.crm_status", &extraction.crm_status),
        ] {
            if matches!(value.as_deref(), Some("")) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Staging and production need real deployment ids
    fn validate_deployment(&self) -> Result<(), ConfigError> {
        if self.orchestrate.orchestration_id.is_empty() {
            return Err(ConfigError::MissingField(
                "orchestrate.orchestration_id".to_string(),
            ));
        }
        if self.orchestrate.crn.is_empty() {
            return Err(ConfigError::MissingField("orchestrate.crn".to_string()));
        }
        if !self.orchestrate.host_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "orchestrate.host_url".to_string(),
                message: "Must use https".to_string(),
            });
        }

        if let Some(agent) = self.agents.iter().find(|a| !a.is_deployed()) {
            return Err(ConfigError::MissingField(format!(
                "agents: deployment ids for '{}'",
                agent.name
            )));
        }

        Ok(())
    }

    /// Report layout with the extraction overrides applied
    pub fn report_layout(&self) -> Result<ReportLayout, ConfigError> {
        let mut layout = match &self.extraction.layout_path {
            Some(path) => ReportLayout::load(path)?,
            None => ReportLayout::standard(),
        };
        self.extraction.apply_to(&mut layout);
        layout.validate()?;
        Ok(layout)
    }
}

/// Load settings from `config/` and `SALESFLOW__*` environment variables
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Load settings from a config directory
///
/// Sources, later overriding earlier: `{dir}/default`, `{dir}/{env}`, then
/// environment variables such as `SALESFLOW__EXTRACTION__MISSING_VALUE`.
pub fn load_settings_from<P: AsRef<Path>>(
    config_dir: P,
    env: Option<&str>,
) -> Result<Settings, ConfigError> {
    let config_dir = config_dir.as_ref();
    let mut builder = Config::builder();

    // Load default config
    let default_path = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        if env_name.is_empty() || env_name.contains(['/', '\\', '.']) {
            return Err(ConfigError::Environment(format!(
                "invalid environment name '{env_name}'"
            )));
        }
        let env_path = config_dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(defaults::ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("extraction.next_steps_fallback"),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        environment = ?settings.environment,
        production = settings.environment.is_production(),
        layout_path = ?settings.extraction.layout_path,
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.environment, RuntimeEnvironment::Development);
        assert_eq!(settings.extraction.time_saved_minutes, 13);
        assert_eq!(settings.observability.log_level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_environment_strictness() {
        assert!(RuntimeEnvironment::Production.is_production());
        assert!(RuntimeEnvironment::Production.is_strict());
        assert!(!RuntimeEnvironment::Staging.is_production());
        assert!(RuntimeEnvironment::Staging.is_strict());
        assert!(!RuntimeEnvironment::Development.is_production());
        assert!(!RuntimeEnvironment::Development.is_strict());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.observability.log_level = "verbose".to_string();
        assert!(settings.validate().is_err());

        settings.observability.log_level = "DEBUG".to_string();
        assert!(settings.validate().is_ok());

        settings.extraction.time_saved_minutes = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_strict_environment_requires_deployment() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingField(_))
        ));

        settings.orchestrate.orchestration_id = "tenant-1".to_string();
        settings.orchestrate.crn = "crn:v1:test".to_string();
        for field in [
            &mut settings.agents.orchestrator,
            &mut settings.agents.meeting_intelligence,
            &mut settings.agents.crm_intelligence,
            &mut settings.agents.engagement,
        ] {
            field.agent_id = "agent".to_string();
            field.environment_id = "env".to_string();
        }
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_overrides_applied_to_layout() {
        let mut settings = Settings::default();
        settings.extraction.missing_value = Some("Not mentioned".to_string());
        settings.extraction.next_steps_fallback = Some(vec!["Review meeting manually".to_string()]);
        settings.extraction.derive_crm_actions = Some(false);

        let layout = settings.report_layout().unwrap();
        assert_eq!(layout.missing_value, "Not mentioned");
        assert_eq!(layout.meeting.next_steps.fallback, vec!["Review meeting manually"]);

        settings.extraction.next_steps_fallback =
            Some(vec![" Call back ".to_string(), String::new()]);
        let layout = settings.report_layout().unwrap();
        assert_eq!(layout.meeting.next_steps.fallback, vec!["Call back"]);
        assert!(!layout.crm.derive_actions);
        // Unset overrides leave the table alone
        assert_eq!(layout.email.placeholder, "Email body not found.");
    }

    #[test]
    fn test_load_settings_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "extraction:\n  time_saved_minutes: 20\n  missing_value: Unknown\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging-test.toml"),
            "[observability]\nlog_json = true\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), Some("staging-test")).unwrap();
        assert_eq!(settings.extraction.time_saved_minutes, 20);
        assert_eq!(settings.extraction.missing_value.as_deref(), Some("Unknown"));
        assert!(settings.observability.log_json);
    }

    #[test]
    fn test_next_steps_fallback_from_env() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(
            "SALESFLOW__EXTRACTION__NEXT_STEPS_FALLBACK",
            "Follow up, Schedule next meeting",
        );
        let loaded = load_settings_from(dir.path(), None);
        std::env::remove_var("SALESFLOW__EXTRACTION__NEXT_STEPS_FALLBACK");

        let settings = loaded.unwrap();
        let layout = settings.report_layout().unwrap();
        assert_eq!(
            layout.meeting.next_steps.fallback,
            vec!["Follow up", "Schedule next meeting"]
        );
    }

    #[test]
    fn test_environment_name_must_be_plain() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_settings_from(dir.path(), Some("../prod")),
            Err(ConfigError::Environment(_))
        ));
    }

    #[test]
    fn test_missing_layout_file_rejected() {
        let mut settings = Settings::default();
        settings.extraction.layout_path = Some("/nonexistent/layout.yaml".to_string());
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
