use chrono::NaiveDate;
use thiserror::Error;

use crate::openmeteo::Metric;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build request: {0}")]
    Build(#[from] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("metric '{0}' missing from daily data")]
    MissingMetric(Metric),

    #[error("metric '{metric}' has {found} values but there are {expected} days")]
    LengthMismatch {
        metric: Metric,
        expected: usize,
        found: usize,
    },

    #[error("metric '{metric}' has no value for {date}")]
    MissingValue { metric: Metric, date: NaiveDate },

    #[error(transparent)]
    Beaufort(#[from] BeaufortError),
}

#[derive(Debug, Error, PartialEq)]
pub enum BeaufortError {
    #[error("wind speed {0} km/h cannot be classified")]
    InvalidSpeed(f64),
}
