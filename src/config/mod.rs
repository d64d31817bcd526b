use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    currency::{CurrencyCode, FormatOptions, LocaleConfig, NegativeStyle},
    errors::LedgerError,
    ledger::{CategoryPolicy, EditTimestampPolicy, LedgerPolicy},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub category_policy: CategoryPolicy,
    #[serde(default)]
    pub edit_timestamp: EditTimestampPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "es-AR".into(),
            currency: "ARS".into(),
            category_policy: CategoryPolicy::default(),
            edit_timestamp: EditTimestampPolicy::default(),
        }
    }
}

impl Config {
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            currency: CurrencyCode::new(self.currency.as_str()),
            negative_style: NegativeStyle::Sign,
        }
    }

    pub fn ledger_policy(&self) -> LedgerPolicy {
        LedgerPolicy::new(self.category_policy, self.edit_timestamp)
    }

    /// Applies a `key value` pair coming from the settings command.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.to_ascii_lowercase().replace('-', "_").as_str() {
            "locale" => self.locale = value.trim().to_string(),
            "currency" => self.currency = CurrencyCode::new(value.trim()).0,
            "category_policy" => self.category_policy = value.parse()?,
            "edit_timestamp" => self.edit_timestamp = value.parse()?,
            other => {
                return Err(format!(
                    "unknown setting `{}` (locale, currency, category_policy, edit_timestamp)",
                    other
                ))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ledger_policy(), LedgerPolicy::default());
    }

    #[test]
    fn save_then_load_keeps_policy_choices() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("edit-timestamp", "restamp").unwrap();
        config.set("category_policy", "optional").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.edit_timestamp, EditTimestampPolicy::Restamp);
        assert_eq!(loaded.category_policy, CategoryPolicy::Optional);
    }

    #[test]
    fn set_rejects_unknown_keys_and_values() {
        let mut config = Config::default();
        assert!(config.set("theme", "dark").is_err());
        assert!(config.set("edit_timestamp", "sometimes").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_policy_fields_fall_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "locale": "en-US", "currency": "usd" }"#).unwrap();
        assert_eq!(config.category_policy, CategoryPolicy::RequiredForExpense);
        assert_eq!(config.locale_config(), LocaleConfig::en_us());
    }
}
