//! Transfer settings. Every value has a default and can be overridden from
//! the environment with a `LEDGER_` prefix, e.g. `LEDGER_MAX_TRANSFER=500`
//! or `LEDGER_WINDOW_DAYS=3`.
use chrono::{DateTime, TimeDelta, Utc};
use config::{Config, Environment};
use serde::Deserialize;

use crate::domain::{Error, Money};

pub const ENV_PREFIX: &str = "LEDGER";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
    max_transfer: Money,
    window_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = TransferConfig::default();
        Self {
            max_transfer: defaults.maximum_transfer_threshold,
            window_days: defaults.activity_window_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferConfig {
    /// Largest amount a single transfer may move.
    pub maximum_transfer_threshold: Money,
    /// How many days of activities are loaded into an account's window.
    pub activity_window_days: i64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            maximum_transfer_threshold: Money::of(1_000_000),
            activity_window_days: 10,
        }
    }
}

impl TransferConfig {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(environment: Environment) -> Result<Self, Error> {
        let settings: Settings = Config::builder()
            .add_source(environment)
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| Error::Config(e.to_string()))?;

        if !settings.max_transfer.is_positive() {
            return Err(Error::Config(format!(
                "max_transfer must be positive, got {}",
                settings.max_transfer
            )));
        }
        if settings.window_days < 0 {
            return Err(Error::Config(format!(
                "window_days must not be negative, got {}",
                settings.window_days
            )));
        }

        Ok(Self {
            maximum_transfer_threshold: settings.max_transfer,
            activity_window_days: settings.window_days,
        })
    }

    /// Start of the activity window for a transfer happening at `now`.
    pub fn baseline_date(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, Error> {
        TimeDelta::try_days(self.activity_window_days)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                Error::Config(format!(
                    "activity window of {} days is out of range",
                    self.activity_window_days
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{ENV_PREFIX, TransferConfig};
    use crate::domain::{Error, Money};
    use chrono::{TimeZone, Utc};
    use config::{Environment, Map};

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(vars))
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = TransferConfig::from_environment(environment(&[])).unwrap();
        assert_eq!(config, TransferConfig::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = TransferConfig::from_environment(environment(&[
            ("LEDGER_MAX_TRANSFER", "250.50"),
            ("LEDGER_WINDOW_DAYS", "3"),
        ]))
        .unwrap();

        assert_eq!(
            config.maximum_transfer_threshold,
            "250.50".parse::<Money>().unwrap()
        );
        assert_eq!(config.activity_window_days, 3);
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let config =
            TransferConfig::from_environment(environment(&[("OTHER_WINDOW_DAYS", "99")])).unwrap();
        assert_eq!(config.activity_window_days, 10);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        for vars in [
            [("LEDGER_MAX_TRANSFER", "lots")],
            [("LEDGER_MAX_TRANSFER", "0")],
            [("LEDGER_WINDOW_DAYS", "-1")],
            [("LEDGER_WINDOW_DAYS", "ten")],
        ] {
            let result = TransferConfig::from_environment(environment(&vars));
            assert!(matches!(result, Err(Error::Config(_))), "{:?}", vars);
        }
    }

    #[test]
    fn baseline_date_subtracts_window() {
        let config = TransferConfig {
            activity_window_days: 2,
            ..TransferConfig::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();

        assert_eq!(
            config.baseline_date(now).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 8, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn oversized_window_is_a_config_error() {
        let config = TransferConfig {
            activity_window_days: i64::MAX,
            ..TransferConfig::default()
        };
        assert!(matches!(
            config.baseline_date(Utc::now()),
            Err(Error::Config(_))
        ));
    }
}
