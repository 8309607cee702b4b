use std::time::Duration;

use futures::Future;
use tokio::select;
use tokio::sync::{mpsc::UnboundedSender, oneshot};
use tracing::instrument;

use super::{Epoch, Message};
use crate::time;

pub(super) type StopSignal = oneshot::Receiver<()>;

/// A spawned background task paired with its stop signal.
///
/// Dropping the task closes the signal as well, so a task can never outlive its owner.
#[derive(Debug)]
pub(super) struct Task {
    _handle: tokio::task::JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl Task {
    pub(super) fn spawn<F>(f: impl FnOnce(StopSignal) -> F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (stop, signal) = oneshot::channel();
        Self {
            _handle: tokio::spawn(f(signal)),
            stop,
        }
    }

    pub(super) fn stop(self) {
        let _ = self.stop.send(());
    }
}

/// Periodic ticker that keeps a tracked flight moving.
///
/// One driver belongs to one tracked flight; its ticks carry the epoch it was started with so
/// the view-model can discard ticks from a driver it already replaced.
#[derive(Debug)]
pub(super) struct RefreshDriver {
    epoch: Epoch,
    task: Task,
}

impl RefreshDriver {
    #[instrument(skip(events))]
    pub(super) fn start(epoch: Epoch, period: Duration, events: UnboundedSender<Message>) -> Self {
        tracing::debug!(%epoch, ?period, "starting refresh driver");

        let task = Task::spawn(|mut signal| async move {
            let mut timer = time::timer(period);

            loop {
                select! {
                    _ = &mut signal => {
                        tracing::debug!(%epoch, "refresh driver stopped");
                        break;
                    }

                    instant = timer.tick() => {
                        tracing::trace!(%epoch, ?instant, "refresh driver ticked");
                        if events.send(Message::Tick { epoch }).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { epoch, task }
    }

    pub(super) fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub(super) fn stop(self) {
        self.task.stop();
    }
}
