use snafu::{Location, Snafu};

use crate::config::ConfigError;
use crate::repl::ReplError;
use crate::store::StoreError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApplicationError {
    /// could not load the configuration
    ConfigLoad {
        source: ConfigError,
        #[snafu(implicit)]
        location: Location,
    },

    /// Could not initialize the logger
    InitializeLogger {
        source: tracing::subscriber::SetGlobalDefaultError,
        #[snafu(implicit)]
        location: Location,
    },

    /// Could not load the flight catalogue
    SeedFlights {
        source: StoreError,
        #[snafu(implicit)]
        location: Location,
    },

    /// The terminal front-end failed
    Repl {
        source: ReplError,
        #[snafu(implicit)]
        location: Location,
    },
}
