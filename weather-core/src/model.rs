use serde::Serialize;
use serde_json::Number;

/// A named location from the cities file.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), latitude, longitude }
    }

    /// Identity used for deduplication. Coordinates compare by bit pattern,
    /// with `-0.0` folded into `0.0`.
    pub(crate) fn key(&self) -> (String, u64, u64) {
        (self.name.clone(), coord_bits(self.latitude), coord_bits(self.longitude))
    }
}

fn coord_bits(v: f64) -> u64 {
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}

/// One hourly observation for one city, in output column order.
///
/// Measurements keep the number exactly as the API sent it, so `81` stays
/// `81` and `14.0` stays `14.0` in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSample {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub time: String,
    #[serde(rename = "temp")]
    pub temperature: Option<Number>,
    pub humidity: Option<Number>,
    #[serde(rename = "wind")]
    pub wind_speed: Option<Number>,
    #[serde(rename = "wind_deg")]
    pub wind_direction: Option<Number>,
    #[serde(rename = "weather")]
    pub condition: String,
}
