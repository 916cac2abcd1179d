//! Core library for the `city-weather` CLI.
//!
//! This crate defines:
//! - Loading cities and resolving the date range to fetch
//! - Abstraction over historical weather providers (Open-Meteo)
//! - Mapping weather codes to coarse conditions
//! - Writing hourly samples to CSV
//! - The sequential fetch-and-write pipeline tying these together
//!
//! It is used by `city-weather-cli`, but can also be reused by other binaries or services.

pub mod cities;
pub mod condition;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod writer;

pub use condition::{Condition, condition_label};
pub use config::{Config, ThrottleConfig};
pub use dates::{DateRange, parse_date};
pub use error::Error;
pub use model::{City, WeatherSample};
pub use pipeline::{Plan, RunOptions, RunSummary};
pub use provider::{Dataset, HistoryProvider};
