use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::currency::CurrencyFormat;
use crate::errors::ConfigError;
use crate::utils::paths::{self, ensure_dir, write_atomic};

/// Keys accepted by `config set`.
pub const CONFIG_KEYS: [&str; 4] = ["locale", "currency", "color", "data_dir"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub ui_color_enabled: bool,
    /// Overrides where the `sales` and `expenses` files live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "pt-BR".into(),
            currency: "BRL".into(),
            ui_color_enabled: true,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::for_locale(&self.locale, &self.currency)
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        };
        match key {
            "locale" => {
                if value.is_empty() {
                    return Err(invalid("locale cannot be empty"));
                }
                self.locale = value.to_string();
            }
            "currency" => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(invalid("expected a three-letter ISO code"));
                }
                self.currency = value.to_uppercase();
            }
            "color" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => return Err(invalid("expected on or off")),
                };
            }
            "data_dir" => {
                self.data_dir = if value.is_empty() || value == "default" {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    /// Directory holding the record files for `config`.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| paths::data_dir_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
