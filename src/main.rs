use std::sync::Arc;

use dotenvy::dotenv;
use snafu::ResultExt;

use skytrack::config::Config;
use skytrack::error::{ApplicationError, ConfigLoadSnafu, ReplSnafu, SeedFlightsSnafu};
use skytrack::logger;
use skytrack::repl;
use skytrack::tracking::TrackingViewModel;

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    dotenv().ok();

    let config = Config::from_env().context(ConfigLoadSnafu)?;

    let _guard = logger::init(&config)?;

    let store = config.flight_store().context(SeedFlightsSnafu)?;
    tracing::info!(flights = store.len(), "flight catalogue ready");

    let view_model = TrackingViewModel::new(
        Arc::new(store),
        config.tracking_settings(),
        config.session_context(),
    );

    repl::start(view_model).await.context(ReplSnafu)
}
