use std::collections::BTreeMap;
use std::path::Path;

use snafu::{ensure, Location, ResultExt, Snafu};

use crate::model::{FlightId, FlightRecord, SeedStatus};

/// The flights every process starts with unless a seed file replaces them.
const BUILTIN_FLIGHTS: &str = include_str!("flights.json");

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StoreError {
    #[snafu(display("flight `{id}` is seeded more than once"))]
    DuplicateFlight { id: FlightId },

    #[snafu(display("flight `{id}` is scheduled but seeded with {percent}% progress"))]
    ScheduledWithProgress { id: FlightId, percent: u8 },

    #[snafu(display("could not read flight seed file `{path}`"))]
    ReadSeedFile {
        path: String,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("malformed flight seed data"))]
    MalformedSeed {
        source: serde_json::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

/// Read-only catalogue of flights keyed by their normalized identifier.
#[derive(Debug, Clone, Default)]
pub struct FlightStore {
    flights: BTreeMap<FlightId, FlightRecord>,
}

impl FlightStore {
    /// Build a store, checking that ids are unique and scheduled flights have not progressed.
    pub fn from_records(
        records: impl IntoIterator<Item = FlightRecord>,
    ) -> Result<FlightStore, StoreError> {
        let mut flights = BTreeMap::new();

        for record in records {
            let percent = record.initial_progress.percent();
            ensure!(
                record.initial_status != SeedStatus::Scheduled || percent == 0,
                ScheduledWithProgressSnafu { id: record.id.clone(), percent }
            );
            ensure!(
                !flights.contains_key(&record.id),
                DuplicateFlightSnafu { id: record.id.clone() }
            );

            flights.insert(record.id.clone(), record);
        }

        tracing::debug!(count = flights.len(), "seeded flight store");
        Ok(FlightStore { flights })
    }

    pub fn from_json(json: &str) -> Result<FlightStore, StoreError> {
        let records: Vec<FlightRecord> = serde_json::from_str(json).context(MalformedSeedSnafu)?;
        Self::from_records(records)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<FlightStore, StoreError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "loading flights from seed file");

        let json = std::fs::read_to_string(path).context(ReadSeedFileSnafu {
            path: path.display().to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn builtin() -> Result<FlightStore, StoreError> {
        Self::from_json(BUILTIN_FLIGHTS)
    }

    /// Case-insensitive lookup; punctuation and surrounding whitespace are ignored.
    pub fn lookup(&self, id: &str) -> Option<&FlightRecord> {
        let id = FlightId::normalize(id)?;
        self.get(&id)
    }

    pub fn get(&self, id: &FlightId) -> Option<&FlightRecord> {
        self.flights.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlightRecord> {
        self.flights.values()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use serde_json::json;

    use super::*;
    use crate::model::Progress;

    fn record(id: &str, status: &str, progress: u8) -> serde_json::Value {
        json!({
            "id": id,
            "airline": "Test Air",
            "aircraft": "A320",
            "origin": { "code": "AAA", "city": "Alpha", "country": "Nowhere" },
            "destination": { "code": "BBB", "city": "Beta", "country": "Nowhere" },
            "scheduledDeparture": "2026-01-01T10:00:00Z",
            "scheduledArrival": "2026-01-01T12:00:00Z",
            "durationLabel": "2h",
            "distanceLabel": "900 km",
            "initialStatus": status,
            "initialProgress": progress,
        })
    }

    #[test]
    fn builtin_flights_are_valid() {
        let store = FlightStore::builtin().unwrap();
        let ids = store.iter().map(|flight| flight.id.as_str()).collect_vec();
        assert_eq!(ids, vec!["DL802", "GA1028004", "QZ7510", "SQ321"]);

        let flight = store.lookup("GA1028004").unwrap();
        assert_eq!(flight.initial_status, SeedStatus::InFlight);
        assert_eq!(flight.initial_progress, Progress::new(45).unwrap());
        assert!(flight.boarding_pass.is_some());
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let store = FlightStore::builtin().unwrap();
        let flight = store.lookup("  dl802 ").unwrap();
        assert_eq!(flight.id.as_str(), "DL802");
        assert_eq!(flight.origin.city, "Boise");
    }

    #[test]
    fn lookup_misses_unknown_and_blank_ids() {
        let store = FlightStore::builtin().unwrap();
        assert!(store.lookup("zz9999").is_none());
        assert!(store.lookup("   ").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = json!([record("AB1", "IN_FLIGHT", 10), record("ab1", "SCHEDULED", 0)]);
        let result = FlightStore::from_json(&json.to_string());
        assert!(
            matches!(result, Err(StoreError::DuplicateFlight { ref id }) if id.as_str() == "AB1"),
            "ids differing only by case should collide: {result:?}"
        );
    }

    #[test]
    fn scheduled_flight_must_start_at_zero() {
        let json = json!([record("AB1", "SCHEDULED", 30)]);
        let result = FlightStore::from_json(&json.to_string());
        assert!(matches!(
            result,
            Err(StoreError::ScheduledWithProgress { percent: 30, .. })
        ));
    }

    #[test]
    fn malformed_seed_is_reported() {
        let json = json!([record("AB1", "IN_FLIGHT", 140)]);
        let result = FlightStore::from_json(&json.to_string());
        assert!(matches!(result, Err(StoreError::MalformedSeed { .. })));

        let json = json!([record("AB1", "LANDED", 100)]);
        let result = FlightStore::from_json(&json.to_string());
        assert!(matches!(result, Err(StoreError::MalformedSeed { .. })), "flights cannot be seeded as landed");
    }

    #[test]
    fn missing_seed_file_is_reported() {
        let result = FlightStore::from_file("/definitely/not/here/flights.json");
        assert!(matches!(result, Err(StoreError::ReadSeedFile { .. })));
    }
}
