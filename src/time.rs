use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Deserializer};
use tracing::instrument;

pub type Timestamp = chrono::DateTime<Utc>;

pub fn now() -> Timestamp {
    Utc::now()
}

/// A repeating timer whose first tick fires one full `period` from now.
///
/// Ticks missed because the consumer was busy are skipped rather than burst.
#[instrument]
pub fn timer(period: Duration) -> tokio::time::Interval {
    let start = tokio::time::Instant::now() + period;

    let mut timer = tokio::time::interval_at(start, period);
    timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    timer
}

/// Deserialize a human readable duration such as `30s` or `1500ms`.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(&text).map_err(serde::de::Error::custom)
}
