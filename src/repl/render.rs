use std::fmt::Write as _;

use itertools::Itertools;

use crate::model::{BoardingPass, Progress, TimelineState};
use crate::store::FlightStore;
use crate::tracking::{Notification, SessionStatus, TrackedFlight, TrackingSession};

const BAR_WIDTH: usize = 20;

pub fn progress_bar(progress: Progress) -> String {
    let filled = usize::from(progress.percent()) * BAR_WIDTH / 100;
    format!("[{}{}] {:>4}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled), progress.to_string())
}

pub fn progress_line(flight: &TrackedFlight) -> String {
    format!(
        "  {} {} {} (updated {})",
        flight.id(),
        progress_bar(flight.progress),
        flight.status,
        flight.last_updated.format("%H:%M:%S"),
    )
}

/// The input line: status and any inline error.
pub fn query_state(session: &TrackingSession) -> String {
    let status = match session.status() {
        SessionStatus::Idle => "idle",
        SessionStatus::Searching => "searching",
        SessionStatus::Found => "found",
        SessionStatus::NotFound => "not found",
    };

    let mut line = format!("  [{status}] query: {:?}", session.query_text());
    if let Some(message) = session.error_message() {
        let _ = write!(line, "  error: {message}");
    }
    line
}

pub fn session(session: &TrackingSession) -> String {
    let mut out = query_state(session);

    let Some(flight) = session.tracked() else {
        return out;
    };

    let record = &flight.record;
    let auto = if session.auto_refresh_enabled() { "on" } else { "paused" };

    let _ = writeln!(out);
    let _ = writeln!(out, "  {} {} ({})", record.airline, record.id, record.aircraft);
    let _ = writeln!(out, "  {} -> {}", record.origin, record.destination);
    let _ = writeln!(
        out,
        "  departs {} / arrives {} / {} / {}",
        record.scheduled_departure.format("%Y-%m-%d %H:%M"),
        record.scheduled_arrival.format("%Y-%m-%d %H:%M"),
        record.duration_label,
        record.distance_label,
    );
    let _ = writeln!(out, "{}  auto-refresh {auto}", progress_line(flight));

    for entry in &record.timeline {
        let marker = match entry.state {
            TimelineState::Completed => "x",
            TimelineState::Current => ">",
            TimelineState::Upcoming => " ",
        };
        let _ = writeln!(out, "    [{marker}] {} {}", entry.time.format("%H:%M"), entry.label);
    }

    out.trim_end().to_string()
}

pub fn flights(store: &FlightStore) -> String {
    store
        .iter()
        .map(|flight| {
            format!(
                "  {:<10} {:<28} {} -> {}",
                flight.id.as_str(),
                flight.airline,
                flight.origin.code,
                flight.destination.code
            )
        })
        .join("\n")
}

fn boarding_pass(pass: &BoardingPass, passenger: Option<&str>) -> String {
    let mut out = String::from("  == boarding pass ==\n");
    if let Some(passenger) = passenger {
        let _ = writeln!(out, "  passenger  {passenger}");
    }
    let _ = writeln!(out, "  ticket     {}", pass.ticket_number);
    let _ = writeln!(out, "  class      {} / group {}", pass.cabin_class, pass.boarding_group);
    let _ = writeln!(out, "  seat       {}", pass.seat);
    let _ = writeln!(out, "  gate       {} / boarding {}", pass.gate, pass.boarding_time);
    let _ = writeln!(out, "  baggage    {}", pass.baggage);
    let _ = writeln!(out, "  date       {}", pass.flight_date);
    if !pass.services.is_empty() {
        let _ = writeln!(out, "  services   {}", pass.services.iter().join(", "));
    }
    out.trim_end().to_string()
}

pub fn notification(notification: &Notification) -> String {
    match notification {
        Notification::Landed { flight } => format!("  {flight} has landed"),
        Notification::BoardingPass { flight, pass, passenger } => {
            format!("  {flight} is booked\n{}", boarding_pass(pass, passenger.as_deref()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(Progress::DEPARTED), "[--------------------]   0%");
        assert_eq!(progress_bar(Progress::new(45).unwrap()), "[#########-----------]  45%");
        assert_eq!(progress_bar(Progress::ARRIVED), "[####################] 100%");
    }

    #[test]
    fn query_state_shows_error() {
        let mut session = TrackingSession::default();
        let _ = session.submit_query("   ");
        assert_eq!(query_state(&session), "  [idle] query: \"   \"  error: empty input");
    }

    #[test]
    fn landed_notification() {
        let text = notification(&Notification::Landed { flight: "SQ321".parse().unwrap() });
        assert_eq!(text, "  SQ321 has landed");
    }

    #[test]
    fn flights_lists_every_record() {
        let store = FlightStore::builtin().unwrap();
        let text = flights(&store);
        assert_eq!(text.lines().count(), store.len());
        assert!(text.contains("GA1028004"));
        assert!(text.contains("BOI -> FWA"));
    }
}
