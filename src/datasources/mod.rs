pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

use crate::error::Result;
use crate::models::{Location, WeatherRecord};
use chrono::NaiveDate;

/// Source of daily min/max temperature series for a location.
///
/// Both methods return rows in ascending date order. An empty series is a
/// valid answer meaning "no data".
#[allow(async_fn_in_trait)]
pub trait WeatherProvider {
    /// Observed temperatures for `start..=end`.
    async fn fetch_historical(
        &self,
        location: &Location,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherRecord>>;

    /// Climate-model projected temperatures for `start..=end`.
    async fn fetch_projection(
        &self,
        location: &Location,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherRecord>>;
}
