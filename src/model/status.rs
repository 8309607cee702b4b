use super::*;

/// Status a flight can be seeded with. A seeded flight has not landed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeedStatus {
    Scheduled,
    InFlight,
}

/// Live status of a tracked flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Scheduled,
    InFlight,
    Landed,
}

impl From<SeedStatus> for FlightStatus {
    fn from(status: SeedStatus) -> Self {
        match status {
            SeedStatus::Scheduled => FlightStatus::Scheduled,
            SeedStatus::InFlight => FlightStatus::InFlight,
        }
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FlightStatus::Scheduled => "Scheduled",
            FlightStatus::InFlight => "In flight",
            FlightStatus::Landed => "Landed",
        };
        f.write_str(label)
    }
}

/// Journey completion in whole percent, always within `0..=100`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    pub const DEPARTED: Progress = Progress(0);
    pub const ARRIVED: Progress = Progress(100);

    pub fn new(percent: u8) -> Option<Progress> {
        (percent <= 100).then_some(Progress(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Move forward by `step` percent, saturating at [Progress::ARRIVED].
    pub fn advance(self, step: u8) -> Progress {
        Progress(self.0.saturating_add(step).min(100))
    }

    pub fn is_complete(self) -> bool {
        self == Progress::ARRIVED
    }
}

impl TryFrom<u8> for Progress {
    type Error = String;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Progress::new(percent).ok_or_else(|| format!("progress {percent}% is above 100%"))
    }
}

impl From<Progress> for u8 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
