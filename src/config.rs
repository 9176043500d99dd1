use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub codex: CodexConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CodexConfig {
    /// Launcher executable, resolved on `PATH`.
    #[serde(default = "default_program")]
    pub program: String,
    /// Arguments placed before the `exec` subcommand.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_model")]
    pub fallback_model: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkflowConfig {
    #[serde(default = "default_history_char_limit")]
    pub history_char_limit: usize,
}

impl Default for CodexConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            model: default_model(),
            fallback_model: default_model(),
            max_retries: default_max_retries(),
            backoff_secs: default_backoff_secs(),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            history_char_limit: default_history_char_limit(),
        }
    }
}

fn default_program() -> String {
    if cfg!(windows) {
        "npx.cmd".to_string()
    } else {
        "npx".to_string()
    }
}

fn default_args() -> Vec<String> {
    vec!["-y".to_string(), "codex".to_string()]
}

fn default_model() -> String {
    "gpt-5".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_secs() -> u64 {
    1
}

fn default_history_char_limit() -> usize {
    2500
}

impl CodexConfig {
    pub fn backoff_unit(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("codex-team").required(false));
        }

        // Environment variable overrides with CODEX_TEAM_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("CODEX_TEAM")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.codex.max_retries == 0 {
            return Err(AppError::Config(
                "codex.max_retries는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.codex.program.trim().is_empty() {
            return Err(AppError::Config("codex.program이 비어 있습니다".to_string()));
        }
        Ok(())
    }
}
