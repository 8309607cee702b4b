//! Flight tracking: the per-user session state machine, and the view-model that runs its
//! lookups and auto-refresh on tokio.

use std::time::Duration;

use derive_new::new;

use crate::model::{BoardingPass, FlightId, FlightRecord};

pub use error::*;
pub use session::*;
pub use view_model::*;

mod driver;
mod error;
mod session;
mod view_model;

/// Timing knobs of a [TrackingViewModel].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSettings {
    /// Delay before a submitted query resolves.
    pub lookup_latency: Duration,
    /// Time between two auto-refresh ticks.
    pub refresh_interval: Duration,
    /// Percent added to the tracked flight on every tick.
    pub refresh_step: u8,
    /// Whether auto-refresh starts enabled for a newly tracked flight.
    pub auto_refresh: bool,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            lookup_latency: Duration::from_millis(1500),
            refresh_interval: Duration::from_secs(30),
            refresh_step: 2,
            auto_refresh: true,
        }
    }
}

/// Who is using the view-model. Handed over at construction instead of living in global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct SessionContext {
    pub passenger: Option<String>,
}

/// Fire-and-forget signals for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The tracked flight reached 100%.
    Landed { flight: FlightId },
    /// The tracked flight has a boarding pass; show it instead of the tracking details.
    BoardingPass {
        flight: FlightId,
        pass: BoardingPass,
        passenger: Option<String>,
    },
}

/// Generation counter used to tell current background work apart from work already replaced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Epoch(u64);

impl Epoch {
    pub(crate) fn next(self) -> Epoch {
        Epoch(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Results posted back to the view-model by its background tasks.
#[derive(Debug)]
pub(crate) enum Message {
    LookupResolved {
        epoch: Epoch,
        id: FlightId,
        record: Option<FlightRecord>,
    },
    Tick {
        epoch: Epoch,
    },
}
