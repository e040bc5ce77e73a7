use loan_calc_core::refinance::DEFAULT_ASSUMED_RATE_DELTA_PERCENT;
use loan_calc_core::{Currency, CurrencyFormat, Rate};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    currency: CurrencySettings,
    refinance: RefinanceSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurrencySettings {
    code: Option<Currency>,
    symbol: Option<String>,
    group_separator: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RefinanceSettings {
    assumed_rate_delta_percent: Option<Rate>,
}

/// Presentation and assumption settings shared by every command.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub currency: CurrencyFormat,
    pub assumed_rate_delta_percent: Rate,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: CurrencyFormat::default(),
            assumed_rate_delta_percent: DEFAULT_ASSUMED_RATE_DELTA_PERCENT,
        }
    }
}

impl Settings {
    /// Load settings from an explicit path, or from the default location.
    ///
    /// An explicit path must exist and parse. The default file is optional;
    /// if it cannot be read or parsed a warning is logged and defaults apply.
    pub fn load(explicit: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config '{}': {}", path, e))?;
            let settings = Self::from_toml_str(&content)
                .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?;
            tracing::info!(path, "Loaded settings");
            return Ok(settings);
        }

        let Some(path) = config_path() else {
            return Ok(Settings::default());
        };
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Ok(Settings::default());
            }
        };

        match Self::from_toml_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "Loaded settings");
                Ok(settings)
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Ok(Settings::default())
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: SettingsFile = toml::from_str(content)?;

        let mut currency = CurrencyFormat::for_currency(file.currency.code.unwrap_or_default());
        if let Some(symbol) = file.currency.symbol {
            currency.symbol = symbol;
        }
        if let Some(separator) = file.currency.group_separator {
            currency.group_separator = separator;
        }

        Ok(Settings {
            currency,
            assumed_rate_delta_percent: file
                .refinance
                .assumed_rate_delta_percent
                .unwrap_or(DEFAULT_ASSUMED_RATE_DELTA_PERCENT),
        })
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".loancalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
        assert_eq!(Settings::default().currency.symbol, "$");
        assert_eq!(Settings::default().assumed_rate_delta_percent, dec!(1.5));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_toml_str(
            r#"
            [currency]
            code = "EUR"
            group_separator = "."

            [refinance]
            assumed_rate_delta_percent = "2.25"
            "#,
        )
        .unwrap();
        assert_eq!(settings.currency.currency, Currency::EUR);
        assert_eq!(settings.currency.symbol, "€");
        assert_eq!(settings.currency.group_separator, ".");
        assert_eq!(settings.assumed_rate_delta_percent, dec!(2.25));
    }

    #[test]
    fn test_symbol_override_keeps_code() {
        let settings = Settings::from_toml_str("[currency]\nsymbol = \"A$\"\n").unwrap();
        assert_eq!(settings.currency.currency, Currency::AUD);
        assert_eq!(settings.currency.symbol, "A$");
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(Settings::from_toml_str("[currency\nsymbol = 1").is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        assert!(Settings::load(Some("/nonexistent/loancalc.toml")).is_err());
    }
}
