use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of observed or projected temperatures, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub tmin: f64,
    pub tmax: f64,
}

impl WeatherRecord {
    pub fn new(date: NaiveDate, tmin: f64, tmax: f64) -> Self {
        Self { date, tmin, tmax }
    }
}

/// A weather row augmented with its heat-unit contribution and running total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GddDay {
    /// Days since planting, starting at 1 on the planting date.
    pub day: u32,
    pub date: NaiveDate,
    pub tmin: f64,
    pub tmax: f64,
    pub daily_gdd: f64,
    pub cumulative_gdd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// A location known only by its coordinates.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::new(format!("{}, {}", latitude, longitude), latitude, longitude)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
