use std::sync::Arc;

use tokio::select;
use tokio::sync::broadcast;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::instrument;

use super::driver::{RefreshDriver, Task};
use super::{
    Advance, Epoch, Message, Notification, SessionContext, TrackingSession, TrackingSettings,
};
use crate::model::{FlightId, FlightRecord, FlightStatus, Progress};
use crate::store::FlightStore;
use crate::time;

const NOTIFICATION_CAPACITY: usize = 16;

/// What changed after [TrackingViewModel::process_next] handled a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Found(FlightId),
    NotFound(FlightId),
    Progressed(Progress),
    Landed(FlightId),
    /// The message was stale or had no effect.
    Unchanged,
}

/// Owns one [TrackingSession] together with the background work acting on it.
///
/// At most one lookup and one refresh driver exist at a time. Both are stopped when they are
/// replaced, when tracking is cleared, and when the view-model is dropped. Their results come
/// back through [TrackingViewModel::process_next], so every state change happens on the
/// caller's task.
#[derive(Debug)]
pub struct TrackingViewModel {
    store: Arc<FlightStore>,
    settings: TrackingSettings,
    context: SessionContext,
    session: TrackingSession,

    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,

    query_epoch: Epoch,
    refresh_epoch: Epoch,
    lookup: Option<Task>,
    refresh: Option<RefreshDriver>,

    notifications: broadcast::Sender<Notification>,
}

impl TrackingViewModel {
    pub fn new(store: Arc<FlightStore>, settings: TrackingSettings, context: SessionContext) -> Self {
        let (tx, rx) = unbounded_channel();
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);

        Self {
            store,
            session: TrackingSession::new(settings.auto_refresh),
            settings,
            context,
            tx,
            rx,
            query_epoch: Epoch::default(),
            refresh_epoch: Epoch::default(),
            lookup: None,
            refresh: None,
            notifications,
        }
    }

    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn store(&self) -> &FlightStore {
        &self.store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    pub fn edit_query(&mut self, text: &str) {
        self.session.edit_query(text);
    }

    /// Start looking up `raw`. The latest query wins: a lookup still in flight is cancelled.
    ///
    /// Blank input is rejected on the spot and leaves any lookup in flight alone.
    #[instrument(skip(self))]
    pub fn submit_query(&mut self, raw: &str) {
        let id = match self.session.submit_query(raw) {
            Ok(id) => id,
            Err(error) => {
                tracing::info!(%error, "rejected flight query");
                return;
            }
        };

        if let Some(previous) = self.lookup.take() {
            tracing::debug!(epoch = %self.query_epoch, "replacing lookup still in flight");
            previous.stop();
        }

        self.query_epoch = self.query_epoch.next();
        tracing::info!(flight.id = %id, epoch = %self.query_epoch, "searching for flight");
        self.lookup = Some(self.spawn_lookup(self.query_epoch, id));
    }

    /// Drop the tracked flight and the query, cancelling all background work.
    #[instrument(skip(self))]
    pub fn clear_tracking(&mut self) {
        if let Some(lookup) = self.lookup.take() {
            lookup.stop();
        }
        self.stop_refresh();

        self.query_epoch = self.query_epoch.next();
        self.session.clear();
        tracing::info!("cleared tracking");
    }

    pub fn toggle_auto_refresh(&mut self) -> Option<bool> {
        let enabled = self.session.toggle_auto_refresh();
        if let Some(enabled) = enabled {
            tracing::info!(enabled, "toggled auto-refresh");
        }
        enabled
    }

    /// Move the tracked flight forward by `step` percent.
    ///
    /// Does nothing unless a flight is tracked, airborne, and auto-refresh is on. Landing stops
    /// the refresh driver and is announced exactly once.
    pub fn advance_progress(&mut self, step: u8) -> Advance {
        let advance = self.session.advance_progress(step, time::now());

        match advance {
            Advance::Ignored => {}
            Advance::Moved(progress) => {
                tracing::debug!(%progress, "flight progressed");
            }
            Advance::Landed => {
                self.stop_refresh();

                if let Some(flight) = self.session.tracked() {
                    let flight = flight.id().clone();
                    tracing::info!(flight.id = %flight, "flight landed");
                    self.notify(Notification::Landed { flight });
                }
            }
        }

        advance
    }

    /// Wait for the next lookup result or refresh tick and apply it.
    ///
    /// Cancel safe: nothing is lost if the returned future is dropped before completion.
    pub async fn process_next(&mut self) -> Update {
        match self.rx.recv().await {
            Some(message) => self.handle(message),
            None => Update::Unchanged,
        }
    }

    fn handle(&mut self, message: Message) -> Update {
        match message {
            Message::LookupResolved { epoch, id, record } => {
                if epoch != self.query_epoch || self.lookup.is_none() {
                    tracing::debug!(%epoch, flight.id = %id, "discarding stale lookup");
                    return Update::Unchanged;
                }

                self.lookup = None;
                self.resolve_lookup(id, record)
            }
            Message::Tick { epoch } => {
                if self.refresh.as_ref().map(RefreshDriver::epoch) != Some(epoch) {
                    tracing::debug!(%epoch, "discarding tick from a stopped driver");
                    return Update::Unchanged;
                }

                match self.advance_progress(self.settings.refresh_step) {
                    Advance::Ignored => Update::Unchanged,
                    Advance::Moved(progress) => Update::Progressed(progress),
                    Advance::Landed => match self.session.tracked() {
                        Some(flight) => Update::Landed(flight.id().clone()),
                        None => Update::Unchanged,
                    },
                }
            }
        }
    }

    fn resolve_lookup(&mut self, id: FlightId, record: Option<FlightRecord>) -> Update {
        let (in_flight, boarding_pass) = match self.session.complete_lookup(id.clone(), record, time::now()) {
            Ok(flight) => {
                tracing::info!(flight.id = %id, status = %flight.status, progress = %flight.progress, "tracking flight");
                (flight.status == FlightStatus::InFlight, flight.record.boarding_pass.clone())
            }
            Err(error) => {
                tracing::info!(flight.id = %id, %error, "flight lookup missed");
                return Update::NotFound(id);
            }
        };

        // only airborne flights move; a driver for anything else would tick for nothing
        if in_flight {
            self.start_refresh();
        } else {
            self.stop_refresh();
        }

        if let Some(pass) = boarding_pass {
            self.notify(Notification::BoardingPass {
                flight: id.clone(),
                pass,
                passenger: self.context.passenger.clone(),
            });
        }

        Update::Found(id)
    }

    fn spawn_lookup(&self, epoch: Epoch, id: FlightId) -> Task {
        let store = Arc::clone(&self.store);
        let events = self.tx.clone();
        let latency = self.settings.lookup_latency;

        Task::spawn(|mut signal| async move {
            select! {
                _ = &mut signal => {
                    tracing::debug!(%epoch, flight.id = %id, "lookup cancelled");
                }

                _ = tokio::time::sleep(latency) => {
                    let record = store.get(&id).cloned();
                    let _ = events.send(Message::LookupResolved { epoch, id, record });
                }
            }
        })
    }

    /// Give the freshly tracked flight its own driver, replacing the previous one.
    fn start_refresh(&mut self) {
        self.stop_refresh();

        if self.settings.refresh_interval.is_zero() {
            tracing::warn!("refresh interval is zero, auto-refresh disabled");
            return;
        }

        self.refresh_epoch = self.refresh_epoch.next();
        let driver = RefreshDriver::start(
            self.refresh_epoch,
            self.settings.refresh_interval,
            self.tx.clone(),
        );
        self.refresh = Some(driver);
    }

    fn stop_refresh(&mut self) {
        if let Some(driver) = self.refresh.take() {
            driver.stop();
        }
    }

    fn notify(&self, notification: Notification) {
        // no subscribers is fine
        let _ = self.notifications.send(notification);
    }
}
