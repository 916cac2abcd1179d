use std::path::PathBuf;

/// Failures callers may want to tell apart from plain I/O errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "No cities with coordinates found in {}.\n\
         Hint: the file needs a header with `city` (or `name`), `lat` and `lon` columns.",
        .path.display()
    )]
    NoCities { path: PathBuf },

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Looking back {days} days runs past the supported calendar range")]
    DateOutOfRange { days: u32 },

    #[error("Request failed with status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}
