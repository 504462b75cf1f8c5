use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GddError {
    #[error("Weather series is empty")]
    EmptySeries,

    #[error("Invalid temperature order on {date}: tmin {tmin} > tmax {tmax}")]
    InvalidTemperatureOrder {
        date: NaiveDate,
        tmin: f64,
        tmax: f64,
    },

    #[error("Non-finite temperature on {date}")]
    NonFiniteTemperature { date: NaiveDate },

    #[error("Weather series is not in ascending date order at {date}")]
    UnorderedSeries { date: NaiveDate },

    #[error("Unknown crop variant: {0}")]
    UnknownCropVariant(String),

    #[error("Invalid crop parameters: {0}")]
    InvalidCropParameters(String),

    #[error("No weather data on or before {0}")]
    NoDataForDate(NaiveDate),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),
}

pub type Result<T> = std::result::Result<T, GddError>;
