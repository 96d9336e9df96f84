//! Configuration management for the sales report pipeline
//!
//! Supports loading configuration from:
//! - YAML/TOML files under `config/`
//! - Environment variables (SALESFLOW__ prefix)
//!
//! # Report Layout
//!
//! Section markers, field labels and list headings of the orchestrator
//! report live in a [`ReportLayout`] table. The built-in table covers the
//! known report versions; a deployment can point
//! `extraction.layout_path` at its own file instead.

pub mod constants;
pub mod domain;
pub mod observability;
pub mod settings;

pub use domain::{
    AgentDirectory, AgentIdentity, CrmLayout, EmailLayout, FieldSpec, ListSpec, ListStrategy,
    MeetingLayout, OrchestrateConfig, ReportLayout, ReportLayoutError, SectionSpec,
    SectionsLayout,
};
pub use observability::init_tracing;
pub use settings::{
    load_settings, load_settings_from, ExtractionSettings, ObservabilityConfig,
    RuntimeEnvironment, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => ConfigError::MissingField(key),
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}

impl From<ConfigError> for salesflow_core::Error {
    fn from(err: ConfigError) -> Self {
        salesflow_core::Error::Config(err.to_string())
    }
}

impl From<ReportLayoutError> for ConfigError {
    fn from(err: ReportLayoutError) -> Self {
        match err {
            ReportLayoutError::FileNotFound(path, _) => ConfigError::FileNotFound(path),
            ReportLayoutError::ParseError(msg) => ConfigError::ParseError(msg),
            ReportLayoutError::Invalid(msg) => ConfigError::InvalidValue {
                field: "report_layout".to_string(),
                message: msg,
            },
        }
    }
}
