//! # Configuration State
//!
//! Stores register configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Config file (`register.toml`, optional)
//! 3. Defaults (this file)
//!
//! Read-only after startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::{Money, OversellPolicy};
use tally_sheet::SheetConfig;

use crate::error::StartupError;

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "register.toml";

/// Register configuration.
///
/// ## Example `register.toml`
/// ```toml
/// data_dir = "data"
/// currency_label = "KRW"
/// oversell = "reject"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Directory holding the monthly workbooks.
    pub data_dir: PathBuf,

    /// Workbook file prefix (`POS` → `POS_2024_05.xlsx`).
    pub file_prefix: String,

    /// Rows pre-seeded with profit formulas in a new workbook.
    pub template_rows: usize,

    /// Label appended to amounts on screen.
    pub currency_label: String,

    /// What a sale does when it asks for more units than are stocked.
    pub oversell: OversellPolicy,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Workbooks in `data/`, prefix `POS`, 100 formula rows
    /// - Amounts shown as `5.00 KRW`
    /// - Over-selling clamps stock at zero
    fn default() -> Self {
        ConfigState {
            data_dir: PathBuf::from("data"),
            file_prefix: "POS".to_string(),
            template_rows: 100,
            currency_label: "KRW".to_string(),
            oversell: OversellPolicy::Clamp,
        }
    }
}

impl ConfigState {
    /// Defaults, then `register.toml` if present, then environment.
    pub fn load() -> Result<Self, StartupError> {
        let path = Path::new(CONFIG_FILE);
        let config = if path.exists() {
            ConfigState::from_file(path)?
        } else {
            ConfigState::default()
        };
        config.with_env()
    }

    /// Parses a TOML config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, StartupError> {
        let text = std::fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| StartupError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Applies environment overrides.
    ///
    /// ## Environment Variables
    /// - `TALLY_DATA_DIR`: workbook directory
    /// - `TALLY_CURRENCY`: currency label
    /// - `TALLY_OVERSELL`: `clamp` or `reject`
    pub fn with_env(self) -> Result<Self, StartupError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, StartupError> {
        if let Some(dir) = lookup("TALLY_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(label) = lookup("TALLY_CURRENCY") {
            self.currency_label = label;
        }

        if let Some(policy) = lookup("TALLY_OVERSELL") {
            self.oversell = policy.parse()?;
        }

        Ok(self)
    }

    /// Workbook settings derived from this configuration.
    pub fn sheet_config(&self) -> SheetConfig {
        SheetConfig::new(&self.data_dir)
            .file_prefix(&self.file_prefix)
            .template_rows(self.template_rows)
    }

    /// Formats an amount with the currency label.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(500)), "5.00 KRW");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if self.currency_label.is_empty() {
            amount.to_string()
        } else {
            format!("{} {}", amount, self.currency_label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(500)), "5.00 KRW");
        assert_eq!(config.format_currency(Money::zero()), "0.00 KRW");

        let bare = ConfigState {
            currency_label: String::new(),
            ..ConfigState::default()
        };
        assert_eq!(bare.format_currency(Money::from_cents(1999)), "19.99");
    }

    #[test]
    fn test_toml_partial_keeps_defaults() {
        let config: ConfigState = toml::from_str("oversell = \"reject\"\n").unwrap();
        assert_eq!(config.oversell, OversellPolicy::Reject);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.template_rows, 100);
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::default()
            .with_overrides(env(&[
                ("TALLY_DATA_DIR", "/srv/shop"),
                ("TALLY_CURRENCY", "USD"),
                ("TALLY_OVERSELL", "Reject"),
            ]))
            .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/shop"));
        assert_eq!(config.currency_label, "USD");
        assert_eq!(config.oversell, OversellPolicy::Reject);
    }

    #[test]
    fn test_bad_oversell_value() {
        let result = ConfigState::default().with_overrides(env(&[("TALLY_OVERSELL", "maybe")]));
        assert!(matches!(result, Err(StartupError::Setting(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "data_dir = \"books\"\ncurrency_label = \"EUR\"\n").unwrap();

        let config = ConfigState::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("books"));
        assert_eq!(config.currency_label, "EUR");
        assert_eq!(config.oversell, OversellPolicy::Clamp);

        std::fs::write(&path, "template_rows = \"many\"\n").unwrap();
        assert!(matches!(
            ConfigState::from_file(&path),
            Err(StartupError::ConfigParse { .. })
        ));
    }
}
