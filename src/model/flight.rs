use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, new)]
pub struct Airport {
    pub code: String,
    pub city: String,
    pub country: String,
}

impl std::fmt::Display for Airport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.code, self.city, self.country)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineState {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, new)]
pub struct TimelineEntry {
    pub time: Timestamp,
    pub label: String,
    pub state: TimelineState,
}

/// Immutable description of one simulated flight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub id: FlightId,
    pub airline: String,
    pub aircraft: String,
    pub origin: Airport,
    pub destination: Airport,
    pub scheduled_departure: Timestamp,
    pub scheduled_arrival: Timestamp,
    pub duration_label: String,
    pub distance_label: String,
    pub initial_status: SeedStatus,
    #[serde(default)]
    pub initial_progress: Progress,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub boarding_pass: Option<BoardingPass>,
}
