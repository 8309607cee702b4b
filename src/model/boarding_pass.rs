use super::*;

/// Boarding details shown instead of the tracking view for reserved flights.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingPass {
    pub ticket_number: String,
    pub seat: String,
    pub cabin_class: String,
    pub boarding_group: String,
    pub gate: String,
    pub boarding_time: String,
    pub baggage: String,
    pub flight_date: String,
    #[serde(default)]
    pub services: Vec<String>,
}
