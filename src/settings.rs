use async_openai::{Client, config::OpenAIConfig, error::OpenAIError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{error::SettingsError, generator::DEFAULT_TEMPERATURE, mode::Language};

pub const MODELS: &[&str] = &["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini"];
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Player preferences stored as JSON; missing fields take their defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    pub openai_api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: Language::English,
            openai_api_key: None,
            model: MODELS[0].to_string(),
            temperature: DEFAULT_TEMPERATURE,
            debug_mode: false,
        }
    }
}

pub fn get_game_data_dir() -> PathBuf {
    dir::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("runway")
        .join("data")
}

impl Settings {
    /// Reads `settings.json` from the game data dir, or defaults.
    pub fn load() -> Self {
        let path = get_game_data_dir().join("settings.json");
        Self::load_settings_from_file(&path).unwrap_or_else(|e| {
            log::info!("Using default settings, could not read {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to_file(get_game_data_dir().join("settings.json"))
    }

    pub fn load_settings_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    /// Stored key, or the one from the environment.
    pub fn api_key(&self) -> Option<String> {
        self.openai_api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Lists models with the key; any failure counts as invalid.
    pub async fn validate_api_key(api_key: &str) -> bool {
        let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
        match client.models().list().await {
            Ok(_) => true,
            Err(OpenAIError::Reqwest(e)) => {
                log::error!("Please verify your internet connection. Error: {e}");
                false
            }
            Err(e) => {
                log::warn!("API key rejected: {e}");
                false
            }
        }
    }
}
