use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Number;
use std::time::Duration;

use crate::{City, DateRange, Error, WeatherSample, condition::condition_label};

use super::HistoryProvider;

const HOURLY_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,wind_speed_10m,wind_direction_10m,weather_code";

/// Client for the Open-Meteo historical weather API.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoint: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { endpoint, http })
    }
}

#[async_trait]
impl HistoryProvider for OpenMeteoProvider {
    async fn fetch_hourly(&self, city: &City, range: &DateRange) -> Result<Vec<WeatherSample>> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("latitude", city.latitude.to_string()),
                ("longitude", city.longitude.to_string()),
                ("start_date", range.start.to_string()),
                ("end_date", range.end.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo for {}", city.name))?;

        tracing::debug!("GET {}", res.url());

        let status = res.status();
        let body = res.text().await.context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(Error::HttpStatus { status, body: truncate_body(&body) }.into());
        }

        parse_samples(city, &body)
    }
}

/// Turn an Open-Meteo JSON body into samples for `city`.
///
/// Only as many samples as the shortest hourly array are produced; missing
/// arrays count as empty.
pub fn parse_samples(city: &City, body: &str) -> Result<Vec<WeatherSample>> {
    let parsed: OmResponse =
        serde_json::from_str(body).context("Failed to parse Open-Meteo JSON")?;
    let hourly = parsed.hourly.unwrap_or_default();

    let samples = hourly
        .time
        .unwrap_or_default()
        .into_iter()
        .zip(hourly.temperature_2m.unwrap_or_default())
        .zip(hourly.relative_humidity_2m.unwrap_or_default())
        .zip(hourly.wind_speed_10m.unwrap_or_default())
        .zip(hourly.wind_direction_10m.unwrap_or_default())
        .zip(hourly.weather_code.unwrap_or_default())
        .map(|(((((time, temperature), humidity), wind_speed), wind_direction), code)| {
            WeatherSample {
                city: city.name.clone(),
                lat: city.latitude,
                lon: city.longitude,
                time: normalize_time(time),
                temperature,
                humidity,
                wind_speed,
                wind_direction,
                condition: condition_label(code.map(|c| c as i64)).to_string(),
            }
        })
        .collect();

    Ok(samples)
}

/// Hourly timestamps come as `YYYY-MM-DDTHH:MM`; add the seconds.
fn normalize_time(mut time: String) -> String {
    if time.len() == 16 {
        time.push_str(":00");
    }
    time
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    #[serde(default)]
    hourly: Option<OmHourly>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmHourly {
    time: Option<Vec<String>>,
    temperature_2m: Option<Vec<Option<Number>>>,
    relative_humidity_2m: Option<Vec<Option<Number>>>,
    wind_speed_10m: Option<Vec<Option<Number>>>,
    wind_direction_10m: Option<Vec<Option<Number>>>,
    weather_code: Option<Vec<Option<f64>>>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let end = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
