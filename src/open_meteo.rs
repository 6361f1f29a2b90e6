//! Current wind and temperature from the Open-Meteo forecast API.
//!
//! Every failure on this path (timeout, transport error, non-2xx status,
//! malformed or incomplete body) collapses into [`ForecastOutcome::Unavailable`].

use std::time::Duration;

use anyhow::Context as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const API_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m,wind_direction_10m";

pub const LATITUDE: f64 = 54.6;
pub const LONGITUDE: f64 = 18.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const STATION: Coordinates = Coordinates {
        latitude: LATITUDE,
        longitude: LONGITUDE,
    };
}

/// Numbers stay as upstream sent them, so `7` is not re-sent as `7.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteForecast {
    /// km/h
    pub wind_speed: serde_json::Number,
    /// Degrees
    pub wind_dir: serde_json::Number,
    /// °C
    pub remote_temp: serde_json::Number,
    pub updated_at: String,
}

impl RemoteForecast {
    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed.as_f64().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    Available(RemoteForecast),
    Unavailable,
}

impl ForecastOutcome {
    pub fn into_option(self) -> Option<RemoteForecast> {
        match self {
            ForecastOutcome::Available(forecast) => Some(forecast),
            ForecastOutcome::Unavailable => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    time: String,
    temperature_2m: serde_json::Number,
    wind_speed_10m: serde_json::Number,
    wind_direction_10m: serde_json::Number,
}

impl From<CurrentConditions> for RemoteForecast {
    fn from(current: CurrentConditions) -> Self {
        RemoteForecast {
            wind_speed: current.wind_speed_10m,
            wind_dir: current.wind_direction_10m,
            remote_temp: current.temperature_2m,
            updated_at: current.time,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub async fn fetch_remote(&self, coordinates: Coordinates) -> ForecastOutcome {
        match self.fetch_current(coordinates).await {
            Ok(forecast) => ForecastOutcome::Available(forecast),
            Err(e) => {
                log::warn!("Open-Meteo unavailable: {e:#}");
                ForecastOutcome::Unavailable
            }
        }
    }

    async fn fetch_current(
        &self,
        coordinates: Coordinates,
    ) -> Result<RemoteForecast, anyhow::Error> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .context("Request to Open-Meteo failed")?
            .error_for_status()
            .context("Open-Meteo returned an error status")?;

        let body: ForecastResponse = response
            .json()
            .await
            .context("Failed to parse Open-Meteo response")?;

        Ok(body.current.into())
    }
}
