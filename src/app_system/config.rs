use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid { key: &'static str, value: String, reason: String },
}

/// Runtime settings, read from the environment (and a `.env` file if present).
#[derive(Debug, Clone, PartialEq)]
pub struct ShopConfig {
    pub shop_name: String,
    /// LINE channel access token; pushes are disabled when unset.
    pub line_channel_token: Option<String>,
    /// User or group id that receives a copy of every receipt.
    pub line_admin_target: Option<String>,
    pub deposit_percent: Decimal,
    pub actor_buffer_size: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            shop_name: "Pet Shop".to_string(),
            line_channel_token: None,
            line_admin_target: None,
            deposit_percent: dec!(10),
            actor_buffer_size: 32,
        }
    }
}

impl ShopConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_vars(std::env::vars().collect())
    }

    /// Builds the config from an explicit variable map; unset keys keep their defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| vars.get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let deposit_percent = match non_empty("DEPOSIT_PERCENT") {
            Some(raw) => parse::<Decimal>("DEPOSIT_PERCENT", &raw)?,
            None => defaults.deposit_percent,
        };
        if deposit_percent < Decimal::ZERO || deposit_percent > Decimal::ONE_HUNDRED {
            return Err(ConfigError::Invalid {
                key: "DEPOSIT_PERCENT",
                value: deposit_percent.to_string(),
                reason: "must be between 0 and 100".to_string(),
            });
        }

        let actor_buffer_size = match non_empty("ACTOR_BUFFER_SIZE") {
            Some(raw) => parse::<usize>("ACTOR_BUFFER_SIZE", &raw)?,
            None => defaults.actor_buffer_size,
        };
        if actor_buffer_size == 0 {
            return Err(ConfigError::Invalid {
                key: "ACTOR_BUFFER_SIZE",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            shop_name: non_empty("SHOP_NAME").unwrap_or(defaults.shop_name),
            line_channel_token: non_empty("LINE_CHANNEL_ACCESS_TOKEN"),
            line_admin_target: non_empty("LINE_ADMIN_TARGET"),
            deposit_percent,
            actor_buffer_size,
        })
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(ShopConfig::from_vars(HashMap::new()).unwrap(), ShopConfig::default());
    }

    #[test]
    fn test_reads_values_and_ignores_blank_token() {
        let config = ShopConfig::from_vars(vars(&[
            ("SHOP_NAME", "Happy Paws"),
            ("LINE_CHANNEL_ACCESS_TOKEN", "  "),
            ("LINE_ADMIN_TARGET", "Cgroup"),
            ("DEPOSIT_PERCENT", "20"),
        ]))
        .unwrap();
        assert_eq!(config.shop_name, "Happy Paws");
        assert_eq!(config.line_channel_token, None);
        assert_eq!(config.line_admin_target.as_deref(), Some("Cgroup"));
        assert_eq!(config.deposit_percent, dec!(20));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(matches!(
            ShopConfig::from_vars(vars(&[("DEPOSIT_PERCENT", "ten")])),
            Err(ConfigError::Invalid { key: "DEPOSIT_PERCENT", .. })
        ));
        assert!(matches!(
            ShopConfig::from_vars(vars(&[("DEPOSIT_PERCENT", "150")])),
            Err(ConfigError::Invalid { key: "DEPOSIT_PERCENT", .. })
        ));
        assert!(matches!(
            ShopConfig::from_vars(vars(&[("ACTOR_BUFFER_SIZE", "0")])),
            Err(ConfigError::Invalid { key: "ACTOR_BUFFER_SIZE", .. })
        ));
    }
}
