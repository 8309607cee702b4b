use crate::model::{FlightId, FlightRecord, FlightStatus, Progress};
use crate::time::Timestamp;

use super::error::{EmptyInputSnafu, NotFoundSnafu, TrackingError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    #[default]
    Idle,
    Searching,
    Found,
    NotFound,
}

/// The live copy of a flight the user is currently watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFlight {
    pub record: FlightRecord,
    pub progress: Progress,
    pub status: FlightStatus,
    pub last_updated: Timestamp,
}

impl TrackedFlight {
    pub fn new(record: FlightRecord, now: Timestamp) -> Self {
        Self {
            progress: record.initial_progress,
            status: record.initial_status.into(),
            last_updated: now,
            record,
        }
    }

    pub fn id(&self) -> &FlightId {
        &self.record.id
    }
}

/// Result of asking the session to move the tracked flight forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Nothing is tracked, the flight is not airborne, or auto-refresh is paused.
    Ignored,
    Moved(Progress),
    /// Progress reached 100% on this step. Reported once per tracked flight.
    Landed,
}

/// Per-user tracking state. Pure and synchronous: timing lives in the view-model.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    query_text: String,
    normalized_id: Option<FlightId>,
    status: SessionStatus,
    error: Option<TrackingError>,
    tracked: Option<TrackedFlight>,
    auto_refresh: bool,
    auto_refresh_default: bool,
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TrackingSession {
    pub fn new(auto_refresh: bool) -> Self {
        Self {
            query_text: String::new(),
            normalized_id: None,
            status: SessionStatus::Idle,
            error: None,
            tracked: None,
            auto_refresh,
            auto_refresh_default: auto_refresh,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn normalized_id(&self) -> Option<&FlightId> {
        self.normalized_id.as_ref()
    }

    pub fn error(&self) -> Option<&TrackingError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn tracked(&self) -> Option<&TrackedFlight> {
        self.tracked.as_ref()
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.auto_refresh
    }

    /// Record an edit of the input field. Clears any error without touching the status.
    pub fn edit_query(&mut self, text: &str) {
        self.query_text = text.to_string();
        self.error = None;
    }

    /// Start a search for `raw`.
    ///
    /// Input that normalizes to nothing is rejected: the status and tracked flight stay as they
    /// were and [TrackingError::EmptyInput] is kept as the session error. Otherwise the session
    /// moves to [SessionStatus::Searching] and the normalized id to look up is returned.
    pub fn submit_query(&mut self, raw: &str) -> Result<FlightId, TrackingError> {
        self.query_text = raw.to_string();
        self.normalized_id = FlightId::normalize(raw);

        let Some(id) = self.normalized_id.clone() else {
            let error = EmptyInputSnafu.build();
            self.error = Some(error.clone());
            return Err(error);
        };

        self.status = SessionStatus::Searching;
        self.error = None;
        Ok(id)
    }

    /// Apply the outcome of the lookup started by [TrackingSession::submit_query].
    ///
    /// A miss keeps whatever flight was tracked before.
    pub(crate) fn complete_lookup(
        &mut self, id: FlightId, record: Option<FlightRecord>, now: Timestamp,
    ) -> Result<&TrackedFlight, TrackingError> {
        let Some(record) = record else {
            let error = NotFoundSnafu { id }.build();
            self.status = SessionStatus::NotFound;
            self.error = Some(error.clone());
            return Err(error);
        };

        if self.tracked.is_none() {
            self.auto_refresh = self.auto_refresh_default;
        }

        self.status = SessionStatus::Found;
        self.error = None;
        Ok(&*self.tracked.insert(TrackedFlight::new(record, now)))
    }

    /// Forget the query, the error and the tracked flight.
    pub fn clear(&mut self) {
        *self = Self::new(self.auto_refresh_default);
    }

    /// Flip auto-refresh. Returns the new setting, or `None` when nothing is tracked.
    pub fn toggle_auto_refresh(&mut self) -> Option<bool> {
        self.tracked.as_ref()?;
        self.auto_refresh = !self.auto_refresh;
        Some(self.auto_refresh)
    }

    pub fn advance_progress(&mut self, step: u8, now: Timestamp) -> Advance {
        if !self.auto_refresh {
            return Advance::Ignored;
        }

        let Some(flight) = self.tracked.as_mut() else {
            return Advance::Ignored;
        };

        if flight.status != FlightStatus::InFlight {
            return Advance::Ignored;
        }

        flight.progress = flight.progress.advance(step);
        flight.last_updated = now;

        if flight.progress.is_complete() {
            flight.status = FlightStatus::Landed;
            Advance::Landed
        } else {
            Advance::Moved(flight.progress)
        }
    }
}
