use super::WeatherProvider;
use crate::config::OpenMeteoConfig;
use crate::error::{GddError, Result};
use crate::models::{Location, WeatherRecord};
use chrono::NaiveDate;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const DAILY_FIELDS: &str = "temperature_2m_min,temperature_2m_max";

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: OpenMeteoConfig,
}

// Open-Meteo API response structures
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    admin1: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(default)]
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<NaiveDate>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new(config: OpenMeteoConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Resolve a place name to coordinates.
    ///
    /// The geocoder matches single place names best, so a comma-separated
    /// query is retried with only its first part.
    pub async fn geocode(&self, place_name: &str) -> Result<Location> {
        let place_name = place_name.trim();
        if place_name.is_empty() {
            return Err(GddError::InvalidRequest("place name is empty".into()));
        }

        let mut queries = vec![place_name];
        if let Some((first, _)) = place_name.split_once(',') {
            let first = first.trim();
            if !first.is_empty() {
                queries.push(first);
            }
        }

        for query in queries {
            let url = self.build_url(
                &self.config.geocoding_url,
                &[
                    ("name", query.to_string()),
                    ("count", "1".into()),
                    ("language", "en".into()),
                    ("format", "json".into()),
                ],
            )?;

            let response: GeocodingResponse = self.get_json(url, "Open-Meteo geocoding").await?;
            if let Some(location) = convert_geocoding(response) {
                tracing::info!(
                    "Geocoded '{}' to {} ({:.4}, {:.4})",
                    query,
                    location.name,
                    location.latitude,
                    location.longitude
                );
                return Ok(location);
            }
            tracing::debug!("No geocoding results for '{}'", query);
        }

        Err(GddError::LocationNotFound(place_name.to_string()))
    }

    fn daily_params(
        &self,
        location: &Location,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("start_date", start.to_string()),
            ("end_date", end.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".into()),
        ]
    }

    fn build_url(&self, base: &str, params: &[(&str, String)]) -> Result<Url> {
        Url::parse_with_params(base, params)
            .map_err(|e| GddError::Config(format!("Invalid Open-Meteo URL '{}': {}", base, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, source: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GddError::DataSourceUnavailable(format!("{}: {}", source, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GddError::DataSourceUnavailable(format!(
                "{} returned {}: {}",
                source, status, body
            )));
        }

        response.json().await.map_err(|e| {
            GddError::DataSourceUnavailable(format!("Failed to parse {} response: {}", source, e))
        })
    }
}

impl WeatherProvider for OpenMeteoClient {
    async fn fetch_historical(
        &self,
        location: &Location,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherRecord>> {
        let params = self.daily_params(location, start, end);
        let url = self.build_url(&self.config.archive_url, &params)?;

        let response: DailyResponse = self.get_json(url, "Open-Meteo archive").await?;
        let records = convert_daily(response);
        tracing::info!(
            "Fetched {} historical days for {} ({} to {})",
            records.len(),
            location,
            start,
            end
        );
        Ok(records)
    }

    async fn fetch_projection(
        &self,
        location: &Location,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherRecord>> {
        let mut params = self.daily_params(location, start, end);
        params.push(("models", self.config.climate_model.clone()));
        let url = self.build_url(&self.config.climate_url, &params)?;

        let response: DailyResponse = self.get_json(url, "Open-Meteo climate").await?;
        let records = convert_daily(response);
        tracing::info!(
            "Fetched {} projected days for {} from {} ({} to {})",
            records.len(),
            location,
            self.config.climate_model,
            start,
            end
        );
        Ok(records)
    }
}

fn convert_geocoding(response: GeocodingResponse) -> Option<Location> {
    let top = response.results?.into_iter().next()?;

    let mut name_parts = vec![top.name];
    name_parts.extend(top.admin1.filter(|s| !s.is_empty()));
    name_parts.extend(top.country.filter(|s| !s.is_empty()));

    Some(Location::new(
        name_parts.join(", "),
        top.latitude,
        top.longitude,
    ))
}

/// Zip the parallel daily arrays into records. Days with a missing
/// temperature are dropped and become gaps in the series, so row counts
/// can be shorter than the calendar span requested.
fn convert_daily(response: DailyResponse) -> Vec<WeatherRecord> {
    let Some(daily) = response.daily else {
        return Vec::new();
    };

    let total = daily.time.len();
    let records: Vec<WeatherRecord> = daily
        .time
        .into_iter()
        .zip(daily.temperature_2m_min)
        .zip(daily.temperature_2m_max)
        .filter_map(|((date, tmin), tmax)| Some(WeatherRecord::new(date, tmin?, tmax?)))
        .collect();

    if records.len() < total {
        tracing::debug!(
            "Dropped {} of {} days with missing temperatures",
            total - records.len(),
            total
        );
    }

    records
}
