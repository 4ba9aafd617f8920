use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use toolchat::llm::OpenAiConfig;
use toolchat::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use toolchat::orchestrator::{DEFAULT_SYSTEM_PROMPT, OrchestratorConfig};
use toolchat::{ChatError, Settings};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub llm: LlmConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f64,
    pub base_url: String,
    pub timeout_ms: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 120000,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub system_prompt: String,
    pub max_rounds: Option<usize>,
    pub tool_timeout_ms: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_rounds: None,
            tool_timeout_ms: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            llm: LlmConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply OPENAI_MODEL / OPENAI_TEMPERATURE / OPENAI_BASE_URL overrides
    pub fn apply_env(&mut self) -> toolchat::Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    fn apply_env_with<F>(&mut self, var: F) -> toolchat::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = var("OPENAI_MODEL").filter(|m| !m.trim().is_empty()) {
            self.llm.model = model;
        }

        if let Some(raw) = var("OPENAI_TEMPERATURE") {
            self.llm.temperature = raw
                .trim()
                .parse()
                .map_err(|_| ChatError::Config(format!("OPENAI_TEMPERATURE is not a number: '{}'", raw)))?;
        }

        if let Some(base_url) = var("OPENAI_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.llm.base_url = base_url;
        }

        Ok(())
    }

    /// Build validated session settings, reading the credential from the environment
    pub fn settings(&self) -> toolchat::Result<Settings> {
        self.settings_with(|name| std::env::var(name).ok())
    }

    fn settings_with<F>(&self, var: F) -> toolchat::Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = var(&self.llm.api_key_env)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ChatError::Config(format!(
                    "{} environment variable not found. Please set it before starting toolchat.",
                    self.llm.api_key_env
                ))
            })?;

        Settings::new(api_key, self.llm.model.clone(), self.llm.temperature)
    }

    pub fn openai_config(&self) -> OpenAiConfig {
        OpenAiConfig::with_model(self.llm.model.clone())
            .with_base_url(self.llm.base_url.clone())
            .with_timeout(Duration::from_millis(self.llm.timeout_ms))
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            system_prompt: self.session.system_prompt.clone(),
            max_rounds: self.session.max_rounds,
            tool_timeout: self.session.tool_timeout_ms.map(Duration::from_millis),
        }
    }
}
