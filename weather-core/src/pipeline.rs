//! Fetch-transform-write run over a cities file.
//!
//! The run is split in two so callers can report the resolved plan before
//! any request goes out: [`prepare`] loads cities and resolves dates,
//! [`execute`] fetches each city in turn and writes the collected rows.

use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::{
    City, DateRange, Error, ThrottleConfig,
    cities::{load_cities, truncate},
    provider::HistoryProvider,
    writer::{WriteMode, write_rows},
};

/// Per-run options, normally taken from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub cities_csv: PathBuf,
    pub out: PathBuf,
    pub append: bool,
    pub days: u32,
    pub cities_limit: Option<usize>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Label for output timestamps. Samples are always fetched in UTC and
    /// written unchanged.
    pub tz: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            cities_csv: PathBuf::from("city_weather.csv"),
            out: PathBuf::from("city_weather.csv"),
            append: false,
            days: 30,
            cities_limit: None,
            start: None,
            end: None,
            tz: "UTC".to_string(),
        }
    }
}

/// Cities and dates resolved before fetching.
#[derive(Debug, Clone)]
pub struct Plan {
    pub cities: Vec<City>,
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub cities: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub rows: usize,
    pub out: PathBuf,
    pub mode: WriteMode,
}

/// Load cities, apply the limit and resolve the date range.
///
/// Fails with [`Error::NoCities`] when nothing usable is left.
pub fn prepare(options: &RunOptions, today: NaiveDate) -> Result<Plan> {
    let cities = truncate(load_cities(&options.cities_csv)?, options.cities_limit);
    if cities.is_empty() {
        return Err(Error::NoCities { path: options.cities_csv.clone() }.into());
    }

    let range = DateRange::resolve(options.days, options.start, options.end, today)?;
    tracing::debug!("resolved {range} for {} cities, tz label {}", cities.len(), options.tz);

    Ok(Plan { cities, range })
}

/// Fetch every city in order and write all rows once at the end.
///
/// A failed city is logged and contributes no rows.
pub async fn execute<P>(
    provider: &P,
    plan: &Plan,
    options: &RunOptions,
    throttle: &ThrottleConfig,
) -> Result<RunSummary>
where
    P: HistoryProvider + ?Sized,
{
    let total = plan.cities.len();
    let mut rows = Vec::new();
    let mut succeeded = 0;

    for (idx, city) in plan.cities.iter().enumerate() {
        let n = idx + 1;
        match provider.fetch_hourly(city, &plan.range).await {
            Ok(samples) => {
                tracing::info!("[{n}/{total}] {} ok: {} rows", city.name, samples.len());
                rows.extend(samples);
                succeeded += 1;
                tokio::time::sleep(throttle.success_delay()).await;
            }
            Err(e) => {
                tracing::warn!("[{n}/{total}] {} failed: {e:#}", city.name);
                tokio::time::sleep(throttle.failure_delay()).await;
            }
        }
    }

    let mode = write_rows(&options.out, &rows, options.append)?;

    Ok(RunSummary {
        cities: total,
        succeeded,
        failed: total - succeeded,
        rows: rows.len(),
        out: options.out.clone(),
        mode,
    })
}
