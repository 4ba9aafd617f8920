//! Session settings injected into the model client and orchestrator

use crate::error::{ChatError, Result};

/// Credential, model identifier and sampling temperature for a session.
///
/// Built once at startup by the shell; nothing in the library reads the
/// environment on its own.
#[derive(Clone)]
pub struct Settings {
    api_key: String,
    model: String,
    temperature: f64,
}

impl Settings {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, temperature: f64) -> Result<Self> {
        let api_key = api_key.into();
        let model = model.into();

        if api_key.trim().is_empty() {
            return Err(ChatError::Config("API key is empty".to_string()));
        }
        if model.trim().is_empty() {
            return Err(ChatError::Config("model identifier is empty".to_string()));
        }
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ChatError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                temperature
            )));
        }

        Ok(Self {
            api_key,
            model,
            temperature,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

// Keep the credential out of logs
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}
