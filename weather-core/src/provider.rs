use crate::{
    City, Config, DateRange, WeatherSample,
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Open-Meteo historical datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dataset {
    /// ERA5 reanalysis only.
    #[default]
    Era5,
    /// Best available blend of reanalysis models.
    Archive,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Era5 => "era5",
            Dataset::Archive => "archive",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Dataset::Era5 => "https://archive-api.open-meteo.com/v1/era5",
            Dataset::Archive => "https://archive-api.open-meteo.com/v1/archive",
        }
    }

    pub const fn all() -> &'static [Dataset] {
        &[Dataset::Era5, Dataset::Archive]
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Dataset {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "era5" => Ok(Dataset::Era5),
            "archive" => Ok(Dataset::Archive),
            _ => Err(anyhow::anyhow!("Unknown dataset '{value}'. Supported datasets: era5, archive.")),
        }
    }
}

/// Source of hourly history for a single city.
#[async_trait]
pub trait HistoryProvider: Send + Sync + Debug {
    async fn fetch_hourly(&self, city: &City, range: &DateRange) -> anyhow::Result<Vec<WeatherSample>>;
}

/// Construct the Open-Meteo provider described by the config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn HistoryProvider>> {
    let endpoint = config.endpoint()?;
    let provider = OpenMeteoProvider::new(endpoint, config.timeout())?;

    Ok(Box::new(provider))
}
