use crate::error::{Result, SumsumError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct RuntimeConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Override for the model directory; defaults to ~/.ollama/local_summarization
    pub dir: Option<PathBuf>,
    #[serde(default = "default_weights_url")]
    pub weights_url: String,
    #[serde(default = "default_modelfile_url")]
    pub modelfile_url: String,
    #[serde(default = "default_weights_filename")]
    pub weights_filename: String,
}

// Default value functions
fn default_host() -> String {
    "http://localhost:11434".to_string()
}
fn default_timeout_secs() -> u64 {
    300
}
fn default_model_name() -> String {
    "local_summarization".to_string()
}
fn default_weights_url() -> String {
    "https://huggingface.co/AKT47/Llama_3.2_3B_fine_tune_summarization/resolve/main/unsloth.Q8_0.gguf".to_string()
}
fn default_modelfile_url() -> String {
    "https://huggingface.co/AKT47/Llama_3.2_3B_fine_tune_summarization/resolve/main/Modelfile"
        .to_string()
}
fn default_weights_filename() -> String {
    "Llama_3.2_3B_fine_tune_summarization.gguf".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            dir: None,
            weights_url: default_weights_url(),
            modelfile_url: default_modelfile_url(),
            weights_filename: default_weights_filename(),
        }
    }
}

impl Config {
    /// Load config from disk, falling back to defaults if no file exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;

        toml::from_str(&content).map_err(|e| {
            SumsumError::Config(format!(
                "Failed to parse {}: {e}",
                config_path.display()
            ))
        })
    }

    /// Path to the config file, honoring `XDG_CONFIG_HOME`
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            let home = std::env::var("HOME")
                .map_err(|_| SumsumError::Config("HOME env var not set".to_string()))?;
            PathBuf::from(home).join(".config")
        };

        Ok(config_dir.join("sumsum").join("config.toml"))
    }
}
