use rustyline::{history::MemHistory, Editor};
use snafu::{ResultExt, Snafu};
use tokio::select;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{mpsc, oneshot};

use crate::tracking::{TrackingViewModel, Update};

mod parse;
mod render;

const HELP: &str = "\
commands:
  track <flight>   look up a flight and start tracking it
  edit <text>      type into the flight field (clears the error)
  clear            stop tracking
  auto             pause or resume auto-refresh
  status           show the tracked flight
  flights          list known flights
  help             show this message
  exit | quit      leave";

pub struct Repl {
    inner: Editor<(), MemHistory>,
}

impl Repl {
    pub fn new() -> Result<Self, ReplError> {
        let config = rustyline::Config::default();
        let inner =
            rustyline::Editor::with_history(config, MemHistory::new()).context(RustylineSnafu)?;

        Ok(Self { inner })
    }

    /// Block until the next line and parse it. End of input or interruption means [Action::Exit].
    pub fn prompt(&mut self) -> Action {
        let Ok(input) = self.inner.readline("track> ") else {
            return Action::Exit;
        };

        self.inner.add_history_entry(input.clone()).ok();

        match parse::parse(&input) {
            Ok(action) => action,
            Err(err) => {
                println!("  {err}");
                Action::None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Track { query: String },
    Edit { text: String },
    Clear,
    ToggleAutoRefresh,
    Status,
    Flights,
    Help,
    Exit,
    None,
}

#[derive(Debug, Snafu)]
pub enum ReplError {
    #[snafu(display("failed to initialize REPL: {}", source))]
    Rustyline {
        source: rustyline::error::ReadlineError,
    },

    #[snafu(display("the input thread stopped before it was ready"))]
    ReaderGone { source: oneshot::error::RecvError },
}

/// rustyline blocks, so the editor lives on its own thread and hands lines over as actions.
async fn spawn_reader() -> Result<mpsc::Receiver<Action>, ReplError> {
    let (tx, rx) = mpsc::channel(1);
    let (ready_tx, ready_rx) = oneshot::channel();

    std::thread::spawn(move || {
        let mut repl = match Repl::new() {
            Ok(repl) => repl,
            Err(error) => {
                let _ = ready_tx.send(Err(error));
                return;
            }
        };
        let _ = ready_tx.send(Ok(()));

        loop {
            let action = repl.prompt();
            let exit = action == Action::Exit;

            if tx.blocking_send(action).is_err() || exit {
                break;
            }
        }
    });

    ready_rx.await.context(ReaderGoneSnafu)??;
    Ok(rx)
}

pub async fn start(mut view_model: TrackingViewModel) -> Result<(), ReplError> {
    tracing::info!("starting REPL");
    println!("{HELP}");

    let mut actions = spawn_reader().await?;
    let mut notifications = view_model.subscribe();

    loop {
        select! {
            action = actions.recv() => {
                let Some(action) = action else { break };
                if !apply(&mut view_model, action) {
                    break;
                }
            }

            update = view_model.process_next() => report(&view_model, update),

            notification = notifications.recv() => match notification {
                Ok(notification) => println!("{}", render::notification(&notification)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "presentation fell behind on notifications");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    view_model.clear_tracking();
    tracing::info!("leaving REPL");
    Ok(())
}

/// Run one user action. Returns `false` when the user asked to leave.
fn apply(view_model: &mut TrackingViewModel, action: Action) -> bool {
    match action {
        Action::Track { query } => {
            view_model.submit_query(&query);
            println!("{}", render::query_state(view_model.session()));
        }
        Action::Edit { text } => {
            view_model.edit_query(&text);
            println!("{}", render::query_state(view_model.session()));
        }
        Action::Clear => {
            view_model.clear_tracking();
            println!("  tracking cleared");
        }
        Action::ToggleAutoRefresh => match view_model.toggle_auto_refresh() {
            Some(true) => println!("  auto-refresh resumed"),
            Some(false) => println!("  auto-refresh paused"),
            None => println!("  no flight is being tracked"),
        },
        Action::Status => println!("{}", render::session(view_model.session())),
        Action::Flights => println!("{}", render::flights(view_model.store())),
        Action::Help => println!("{HELP}"),
        Action::Exit => return false,
        Action::None => {}
    }

    true
}

fn report(view_model: &TrackingViewModel, update: Update) {
    match update {
        Update::Found(_) | Update::NotFound(_) => {
            println!("{}", render::session(view_model.session()));
        }
        Update::Progressed(_) => {
            if let Some(flight) = view_model.session().tracked() {
                println!("{}", render::progress_line(flight));
            }
        }
        Update::Landed(_) | Update::Unchanged => {}
    }
}
