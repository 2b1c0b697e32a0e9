use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mbta_subway::Error;
use mbta_subway::cache::CachedMbtaClient;
use mbta_subway::config::AppConfig;
use mbta_subway::mbta::MbtaClient;
use mbta_subway::network::NetworkSnapshot;
use mbta_subway::report;
use mbta_subway::trip_request::TripRequest;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    let config = AppConfig::from_env()?;

    // Read the request before touching the network
    let request = TripRequest::from_file(&config.trip_file)?;
    info!(from = %request.from, to = %request.to, "trip request");

    let client = MbtaClient::new(config.mbta.clone())?;
    let source = CachedMbtaClient::new(client, &config.cache);

    let snapshot = NetworkSnapshot::build(&source, &config.snapshot_options()).await?;

    report::write_reports(
        &mut std::io::stdout().lock(),
        &snapshot,
        &request.from,
        &request.to,
    )
}
