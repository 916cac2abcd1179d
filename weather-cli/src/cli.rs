use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::PathBuf;
use weather_core::{
    Config, RunOptions, parse_date, pipeline, provider::provider_from_config, writer::WriteMode,
};

/// Build hourly weather history for a list of cities (Open-Meteo ERA5).
#[derive(Debug, Parser)]
#[command(name = "city-weather", version)]
pub struct Cli {
    /// CSV with city (or name), lat and lon columns.
    #[arg(long, default_value = "city_weather.csv")]
    pub cities_csv: PathBuf,

    /// Output CSV path; overwritten unless --append is set.
    #[arg(long, default_value = "city_weather.csv")]
    pub out: PathBuf,

    /// Append to the output file if it already exists.
    #[arg(long)]
    pub append: bool,

    /// Number of days to look back.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: u32,

    /// Only fetch the first N cities.
    #[arg(long)]
    pub cities_limit: Option<usize>,

    /// First day, YYYY-MM-DD (default: end minus days).
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last day, YYYY-MM-DD (default: yesterday, UTC).
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Timezone label for output timestamps. Timestamps are written in UTC.
    #[arg(long, default_value = "UTC")]
    pub tz: String,

    /// Dataset to query: "era5" or "archive".
    #[arg(long)]
    pub dataset: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Config file; defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose logging.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;
        let provider = provider_from_config(&config)?;
        let options = self.run_options();

        let plan = pipeline::prepare(&options, Utc::now().date_naive())?;
        println!("Fetching {} | cities: {}", plan.range, plan.cities.len());

        let summary = pipeline::execute(provider.as_ref(), &plan, &options, &config.throttle).await?;

        let verb = match summary.mode {
            WriteMode::Append => "appended",
            WriteMode::Overwrite => "wrote",
        };
        println!(
            "Done: {verb} {} rows -> {} ({} of {} cities ok)",
            summary.rows,
            summary.out.display(),
            summary.succeeded,
            summary.cities,
        );

        Ok(())
    }

    /// File config with command-line overrides applied.
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(dataset) = &self.dataset {
            config.dataset = Some(dataset.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }

        Ok(config)
    }

    fn run_options(&self) -> RunOptions {
        RunOptions {
            cities_csv: self.cities_csv.clone(),
            out: self.out.clone(),
            append: self.append,
            days: self.days,
            cities_limit: self.cities_limit,
            start: self.start,
            end: self.end,
            tz: self.tz.clone(),
        }
    }
}
