//! HTML card for the dashboard.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::measurement::LocalReading;
use crate::open_meteo::{ForecastOutcome, RemoteForecast};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const RELOAD_AFTER_MS: u32 = 30_000;
pub const PLACE_NAME: &str = "Rumia";
pub const NO_DATA: &str = "brak danych";
pub const NO_DIRECTION: &str = "–";

/// Everything the card shows, decided before rendering. The `String` in
/// `WithoutForecast` is the server's UTC time shown in the footer.
#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    WithForecast(LocalReading, RemoteForecast),
    WithoutForecast(LocalReading, String),
}

impl CardView {
    pub fn new(local: LocalReading, outcome: ForecastOutcome, now: DateTime<Utc>) -> CardView {
        match outcome {
            ForecastOutcome::Available(forecast) => CardView::WithForecast(local, forecast),
            ForecastOutcome::Unavailable => {
                CardView::WithoutForecast(local, now.format(TIMESTAMP_FORMAT).to_string())
            }
        }
    }

    pub fn local(&self) -> &LocalReading {
        match self {
            CardView::WithForecast(local, _) | CardView::WithoutForecast(local, _) => local,
        }
    }
}

#[derive(Template)]
#[template(path = "card.html")]
struct CardTemplate<'a> {
    view: &'a CardView,
    local: &'a LocalReading,
    place_name: &'a str,
    no_data: &'a str,
    no_direction: &'a str,
    reload_after_ms: u32,
}

pub fn render_card(view: &CardView) -> Result<String, askama::Error> {
    CardTemplate {
        view,
        local: view.local(),
        place_name: PLACE_NAME,
        no_data: NO_DATA,
        no_direction: NO_DIRECTION,
        reload_after_ms: RELOAD_AFTER_MS,
    }
    .render()
}
