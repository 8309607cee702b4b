use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use snafu::{Location, ResultExt, Snafu};

use crate::store::{FlightStore, StoreError};
use crate::time::deserialize_duration;
use crate::tracking::{SessionContext, TrackingSettings};

const ENV_PREFIX: &str = "SKYTRACK_";

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("could not read `SKYTRACK_*` environment variables"))]
    Environment {
        source: envy::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("refresh step must be between 1 and 100, got {step}"))]
    RefreshStep {
        step: u8,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("refresh interval must be longer than zero"))]
    RefreshInterval {
        #[snafu(implicit)]
        location: Location,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "defaults::log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "defaults::log_level")]
    pub log_level: String,

    #[serde(default = "defaults::refresh_interval", deserialize_with = "deserialize_duration")]
    pub refresh_interval: Duration,
    #[serde(default = "defaults::refresh_step")]
    pub refresh_step: u8,
    #[serde(default = "defaults::lookup_latency", deserialize_with = "deserialize_duration")]
    pub lookup_latency: Duration,
    #[serde(default = "defaults::auto_refresh")]
    pub auto_refresh: bool,

    #[serde(default)]
    pub flights_file: Option<PathBuf>,
    #[serde(default)]
    pub passenger: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .context(EnvironmentSnafu)?;
        config.validate()
    }

    fn validate(self) -> Result<Config, ConfigError> {
        snafu::ensure!(
            (1..=100).contains(&self.refresh_step),
            RefreshStepSnafu { step: self.refresh_step }
        );
        snafu::ensure!(!self.refresh_interval.is_zero(), RefreshIntervalSnafu);
        Ok(self)
    }

    pub fn tracking_settings(&self) -> TrackingSettings {
        TrackingSettings {
            lookup_latency: self.lookup_latency,
            refresh_interval: self.refresh_interval,
            refresh_step: self.refresh_step,
            auto_refresh: self.auto_refresh,
        }
    }

    pub fn session_context(&self) -> SessionContext {
        SessionContext::new(self.passenger.clone())
    }

    /// The configured seed file, or the built-in flights when none is set.
    pub fn flight_store(&self) -> Result<FlightStore, StoreError> {
        match &self.flights_file {
            Some(path) => FlightStore::from_file(path),
            None => FlightStore::builtin(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;
    use std::time::Duration;

    use crate::tracking::TrackingSettings;

    pub fn log_dir() -> PathBuf {
        PathBuf::from("logs")
    }

    pub fn log_level() -> String {
        "info".to_string()
    }

    pub fn refresh_interval() -> Duration {
        TrackingSettings::default().refresh_interval
    }

    pub fn refresh_step() -> u8 {
        TrackingSettings::default().refresh_step
    }

    pub fn lookup_latency() -> Duration {
        TrackingSettings::default().lookup_latency
    }

    pub fn auto_refresh() -> bool {
        TrackingSettings::default().auto_refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Config>(vars(pairs))
            .context(EnvironmentSnafu)?
            .validate()
    }

    #[test]
    fn defaults_match_tracking_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.tracking_settings(), TrackingSettings::default());
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.flights_file, None);
        assert_eq!(config.session_context(), SessionContext::default());
    }

    #[test]
    fn read_prefixed_variables() {
        let config = load(&[
            ("SKYTRACK_REFRESH_INTERVAL", "5s"),
            ("SKYTRACK_REFRESH_STEP", "10"),
            ("SKYTRACK_LOOKUP_LATENCY", "250ms"),
            ("SKYTRACK_AUTO_REFRESH", "false"),
            ("SKYTRACK_PASSENGER", "Ayu Lestari"),
            ("SKYTRACK_FLIGHTS_FILE", "/srv/flights.json"),
            ("UNRELATED", "ignored"),
        ])
        .unwrap();

        let settings = config.tracking_settings();
        assert_eq!(settings.refresh_interval, Duration::from_secs(5));
        assert_eq!(settings.refresh_step, 10);
        assert_eq!(settings.lookup_latency, Duration::from_millis(250));
        assert!(!settings.auto_refresh);
        assert_eq!(config.session_context().passenger.as_deref(), Some("Ayu Lestari"));
        assert_eq!(config.flights_file, Some(PathBuf::from("/srv/flights.json")));
    }

    #[test]
    fn reject_bad_values() {
        assert!(matches!(
            load(&[("SKYTRACK_REFRESH_STEP", "0")]),
            Err(ConfigError::RefreshStep { step: 0, .. })
        ));
        assert!(matches!(
            load(&[("SKYTRACK_REFRESH_INTERVAL", "0s")]),
            Err(ConfigError::RefreshInterval { .. })
        ));
        assert!(matches!(
            load(&[("SKYTRACK_REFRESH_INTERVAL", "whenever")]),
            Err(ConfigError::Environment { .. })
        ));
    }
}
