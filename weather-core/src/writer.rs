use anyhow::{Context, Result};
use std::{fs::OpenOptions, path::Path};

use crate::WeatherSample;

/// Output columns, in order.
pub const HEADER: [&str; 9] =
    ["city", "lat", "lon", "time", "temp", "humidity", "wind", "wind_deg", "weather"];

/// How the output file was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Overwrite,
    Append,
}

/// Write samples as CSV rows.
///
/// Appends without a header when `append` is set and `path` already exists;
/// otherwise truncates the file and writes the header first.
pub fn write_rows(path: &Path, samples: &[WeatherSample], append: bool) -> Result<WriteMode> {
    let mode = if append && path.is_file() { WriteMode::Append } else { WriteMode::Overwrite };

    let file = match mode {
        WriteMode::Append => OpenOptions::new().append(true).open(path),
        WriteMode::Overwrite => {
            OpenOptions::new().write(true).create(true).truncate(true).open(path)
        }
    }
    .with_context(|| format!("Failed to open output file: {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    if mode == WriteMode::Overwrite {
        writer.write_record(HEADER).context("Failed to write CSV header")?;
    }

    for sample in samples {
        writer
            .serialize(sample)
            .with_context(|| format!("Failed to write row for {} at {}", sample.city, sample.time))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush output file: {}", path.display()))?;

    Ok(mode)
}
