use snafu::Snafu;

use crate::model::FlightId;

/// Problems reported back to the user through the session's error message.
///
/// Neither is fatal; both are kept on the session instead of being returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TrackingError {
    #[snafu(display("empty input"))]
    EmptyInput,

    #[snafu(display("flight not found"))]
    NotFound { id: FlightId },
}
