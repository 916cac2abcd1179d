use chrono::{Days, NaiveDate};

use crate::Error;

/// Inclusive range of calendar days to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Resolve the range from explicit bounds and a lookback length.
    ///
    /// Without an explicit `end` the range stops at yesterday, since
    /// reanalysis data for the current day is usually incomplete. Without an
    /// explicit `start` it covers `days` days ending at `end`.
    pub fn resolve(
        days: u32,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, Error> {
        if let (Some(start), Some(end)) = (start, end) {
            return Ok(Self { start, end });
        }

        let end = match end {
            Some(end) => end,
            None => today.checked_sub_days(Days::new(1)).ok_or(Error::DateOutOfRange { days })?,
        };
        let start = match start {
            Some(start) => start,
            None => end
                .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
                .ok_or(Error::DateOutOfRange { days })?,
        };

        Ok(Self { start, end })
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|source| Error::InvalidDate { value: value.to_string(), source })
}
