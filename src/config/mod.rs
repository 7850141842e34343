use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::llm::{
    ProviderConfig, DEFAULT_FREQUENCY_PENALTY, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_PRESENCE_PENALTY, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key for the completion endpoint
    pub api_key: Option<String>,

    /// Base URL for the API
    pub base_url: Option<String>,

    /// Model to use
    pub model: String,

    /// Maximum tokens for responses
    pub max_tokens: u32,

    /// Temperature for sampling
    pub temperature: f32,

    /// Top-p for nucleus sampling
    pub top_p: f32,

    /// Frequency penalty for sampling
    pub frequency_penalty: f32,

    /// Presence penalty for sampling
    pub presence_penalty: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            frequency_penalty: DEFAULT_FREQUENCY_PENALTY,
            presence_penalty: DEFAULT_PRESENCE_PENALTY,
        }
    }
}

impl Config {
    /// Initialize configuration from various sources
    pub async fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = Self::default();

        // Load from environment variables
        config.load_from_env();

        // Try to load from configuration files
        if let Ok(file_config) = Self::load_from_file().await {
            config.merge_with(file_config);
        }

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            self.api_key = Some(key);
        }

        // Generic overrides
        if let Ok(key) = std::env::var("BANTER_API_KEY") {
            self.api_key = Some(key);
        }

        if let Ok(base_url) = std::env::var("BANTER_BASE_URL") {
            self.base_url = Some(base_url);
        }

        if let Ok(model) = std::env::var("BANTER_MODEL") {
            self.model = model;
        }

        if let Ok(max_tokens_str) = std::env::var("BANTER_MAX_TOKENS") {
            if let Ok(max_tokens) = max_tokens_str.parse() {
                self.max_tokens = max_tokens;
            }
        }

        if let Ok(temp_str) = std::env::var("BANTER_TEMPERATURE") {
            if let Ok(temperature) = temp_str.parse() {
                self.temperature = temperature;
            }
        }
    }

    /// Load configuration from banter.json files
    pub async fn load_from_file() -> Result<Self> {
        // Configuration priority:
        // 1. ./.banter.json
        // 2. ./banter.json
        // 3. $HOME/.config/banter/banter.json

        let mut config_paths = vec![
            PathBuf::from("./.banter.json"),
            PathBuf::from("./banter.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("banter").join("banter.json"));
        }

        for path in config_paths {
            if path.exists() {
                return Self::load_from_path(&path).await;
            }
        }

        Err(anyhow::anyhow!("No configuration file found"))
    }

    /// Load configuration from a specific file
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another configuration into this one
    pub fn merge_with(&mut self, other: Self) {
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if !other.model.is_empty() && other.model != DEFAULT_MODEL {
            self.model = other.model;
        }
        if other.max_tokens != DEFAULT_MAX_TOKENS {
            self.max_tokens = other.max_tokens;
        }
        if other.temperature != DEFAULT_TEMPERATURE {
            self.temperature = other.temperature;
        }
        if other.top_p != DEFAULT_TOP_P {
            self.top_p = other.top_p;
        }
        if other.frequency_penalty != DEFAULT_FREQUENCY_PENALTY {
            self.frequency_penalty = other.frequency_penalty;
        }
        if other.presence_penalty != DEFAULT_PRESENCE_PENALTY {
            self.presence_penalty = other.presence_penalty;
        }
    }

    /// Check if the configuration has a usable API key
    pub fn has_api_key(&self) -> bool {
        matches!(&self.api_key, Some(key) if !key.is_empty())
    }

    /// Validate the configuration
    ///
    /// A missing API key is not an error here; it is reported when a
    /// completion is actually requested.
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(anyhow::anyhow!("Model is required"));
        }

        if self.max_tokens == 0 {
            return Err(anyhow::anyhow!("max_tokens must be greater than 0"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(anyhow::anyhow!("temperature must be between 0.0 and 2.0"));
        }

        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(anyhow::anyhow!("top_p must be between 0.0 and 1.0"));
        }

        if !(-2.0..=2.0).contains(&self.frequency_penalty) {
            return Err(anyhow::anyhow!(
                "frequency_penalty must be between -2.0 and 2.0"
            ));
        }

        if !(-2.0..=2.0).contains(&self.presence_penalty) {
            return Err(anyhow::anyhow!(
                "presence_penalty must be between -2.0 and 2.0"
            ));
        }

        Ok(())
    }

    /// Provider settings derived from this configuration
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
        }
    }
}
