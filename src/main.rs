use std::sync::Arc;

use anyhow::Context;
use log::LevelFilter;
use open_meteo::{API_URL, Coordinates, OpenMeteoClient, REQUEST_TIMEOUT};
use sensor::{Bme280Barometer, LocalReader};
use server::{AppState, BIND_ADDR};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

mod measurement;
mod open_meteo;
mod sensor;
mod server;
mod view;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    TermLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .set_time_offset_to_local()
            .map_err(|_| anyhow::anyhow!("Failed to set time offset to local"))?
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;

    if let Err(e) = run().await {
        log::error!("{e:#}");
    }

    Ok(())
}

pub async fn run() -> Result<(), anyhow::Error> {
    let mut barometer = Bme280Barometer::new().context("Failed to initialize barometer")?;
    barometer.init()?;

    let open_meteo =
        OpenMeteoClient::new(API_URL, REQUEST_TIMEOUT).context("Failed to initialize Open-Meteo")?;

    let state = AppState {
        reader: Arc::new(LocalReader::new(Box::new(barometer))),
        open_meteo,
        coordinates: Coordinates::STATION,
    };

    log::info!(
        "Serving weather for {}, {}",
        state.coordinates.latitude,
        state.coordinates.longitude
    );

    server::run_http_server(state, BIND_ADDR, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to wait for Ctrl+C signal: {e}");
        }
    })
    .await?;

    log::info!("Shutting down");

    Ok(())
}
