use super::calculations::{accumulate_gdd, ideal_gdd_curve};
use super::classifier::classify;
use super::projection::estimate_stage_dates;
use crate::catalog::CropCatalog;
use crate::error::{GddError, Result};
use crate::models::{
    CropParameters, GddDay, StageDateProjection, StageSummary, WeatherRecord,
};
use chrono::NaiveDate;

/// The inputs of one growing season: a crop variant, when it was planted,
/// where, and the daily weather since planting.
///
/// Rows are validated on construction. The derived series is produced by
/// [`CropSeason::compute_gdd_series`] as a separate [`ComputedSeason`].
#[derive(Debug, Clone)]
pub struct CropSeason {
    crop_id: String,
    params: CropParameters,
    planting_date: NaiveDate,
    location: String,
    weather: Vec<WeatherRecord>,
}

impl CropSeason {
    pub fn new(
        crop_id: impl Into<String>,
        params: CropParameters,
        planting_date: NaiveDate,
        weather: Vec<WeatherRecord>,
        location: impl Into<String>,
    ) -> Result<Self> {
        validate_weather(&weather)?;

        Ok(Self {
            crop_id: crop_id.into(),
            params,
            planting_date,
            location: location.into(),
            weather,
        })
    }

    /// Build a season for a variant looked up in `catalog`.
    pub fn from_catalog(
        catalog: &CropCatalog,
        crop_id: &str,
        planting_date: NaiveDate,
        weather: Vec<WeatherRecord>,
        location: impl Into<String>,
    ) -> Result<Self> {
        let params = *catalog.get(crop_id)?;
        Self::new(crop_id, params, planting_date, weather, location)
    }

    /// Run the single pass over the weather series.
    ///
    /// Calling this again yields an identical series.
    pub fn compute_gdd_series(&self) -> Result<ComputedSeason> {
        if self.weather.is_empty() {
            return Err(GddError::EmptySeries);
        }

        if let Some(first) = self.weather.first() {
            if first.date != self.planting_date {
                tracing::debug!(
                    "Weather for {} starts {} but planting date is {}",
                    self.crop_id,
                    first.date,
                    self.planting_date
                );
            }
        }

        let days = accumulate_gdd(&self.weather, &self.params);
        tracing::debug!(
            "Computed {} days of GDD for {} at {} ({:.1} total)",
            days.len(),
            self.crop_id,
            self.location,
            days.last().map(|d| d.cumulative_gdd).unwrap_or(0.0)
        );

        Ok(ComputedSeason {
            season: self.clone(),
            days,
        })
    }
}

fn validate_weather(weather: &[WeatherRecord]) -> Result<()> {
    for record in weather {
        if !record.tmin.is_finite() || !record.tmax.is_finite() {
            return Err(GddError::NonFiniteTemperature { date: record.date });
        }
        if record.tmin > record.tmax {
            return Err(GddError::InvalidTemperatureOrder {
                date: record.date,
                tmin: record.tmin,
                tmax: record.tmax,
            });
        }
    }

    for pair in weather.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(GddError::UnorderedSeries { date: pair[1].date });
        }
    }

    Ok(())
}

/// A season with its per-day and cumulative GDD series. Never empty.
#[derive(Debug, Clone)]
pub struct ComputedSeason {
    season: CropSeason,
    days: Vec<GddDay>,
}

impl ComputedSeason {
    pub fn params(&self) -> &CropParameters {
        &self.season.params
    }

    pub fn planting_date(&self) -> NaiveDate {
        self.season.planting_date
    }

    pub fn days(&self) -> &[GddDay] {
        &self.days
    }

    pub fn into_days(self) -> Vec<GddDay> {
        self.days
    }

    /// Summary for the last day of the series, taken to be "today".
    pub fn summary_today(&self) -> Result<StageSummary> {
        let day = self.days.last().ok_or(GddError::EmptySeries)?;
        Ok(self.summarize(day))
    }

    /// Summary for the last day on or before `as_of`.
    pub fn summary_as_of(&self, as_of: NaiveDate) -> Result<StageSummary> {
        let day = self
            .days
            .iter()
            .take_while(|d| d.date <= as_of)
            .last()
            .ok_or(GddError::NoDataForDate(as_of))?;
        Ok(self.summarize(day))
    }

    /// First date each stage threshold is reached within the series.
    pub fn stage_dates(&self) -> StageDateProjection {
        estimate_stage_dates(
            self.days.iter().map(|d| (d.date, d.cumulative_gdd)),
            self.season.params.stages(),
        )
    }

    pub fn ideal_gdd_curve(&self) -> Vec<f64> {
        ideal_gdd_curve(&self.season.params, self.days.len() as u32)
    }

    fn summarize(&self, day: &GddDay) -> StageSummary {
        let c = classify(day.cumulative_gdd, self.season.params.stages());
        StageSummary {
            date: day.date,
            day: day.day,
            cumulative_gdd: day.cumulative_gdd,
            stage: c.stage,
            stage_progress: c.stage_progress,
            overall_progress: c.overall_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GrowthStage, StageThresholds};

    fn params() -> CropParameters {
        let stages = StageThresholds::new(50.0, 150.0, 400.0, 600.0).unwrap();
        CropParameters::new(10.0, 30.0, stages).unwrap()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    fn weather(days: usize, tmin: f64, tmax: f64) -> Vec<WeatherRecord> {
        (0..days)
            .map(|i| WeatherRecord::new(start() + chrono::Duration::days(i as i64), tmin, tmax))
            .collect()
    }

    fn season(rows: Vec<WeatherRecord>) -> CropSeason {
        CropSeason::new("corn_wet", params(), start(), rows, "La Trinidad").unwrap()
    }

    #[test]
    fn five_mild_days_accumulate_linearly() {
        let computed = season(weather(5, 15.0, 25.0)).compute_gdd_series().unwrap();
        let cumulative: Vec<f64> = computed.days().iter().map(|d| d.cumulative_gdd).collect();
        assert_eq!(cumulative, vec![10.0, 20.0, 30.0, 40.0, 50.0]);

        let summary = computed.summary_today().unwrap();
        assert_eq!(summary.day, 5);
        assert_eq!(summary.date, start() + chrono::Duration::days(4));
        assert_eq!(summary.stage, GrowthStage::Initial);
        assert_eq!(summary.stage_progress, 1.0);
        assert!((summary.overall_progress - 50.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_is_rejected() {
        let result = season(Vec::new()).compute_gdd_series();
        assert!(matches!(result, Err(GddError::EmptySeries)));
    }

    #[test]
    fn inverted_temperatures_rejected_on_construction() {
        let mut rows = weather(3, 15.0, 25.0);
        rows[1].tmin = 30.0;
        let result = CropSeason::new("corn_wet", params(), start(), rows, "here");
        assert!(matches!(
            result,
            Err(GddError::InvalidTemperatureOrder { tmin, tmax, .. }) if tmin == 30.0 && tmax == 25.0
        ));
    }

    #[test]
    fn non_finite_temperatures_rejected() {
        let mut rows = weather(3, 15.0, 25.0);
        rows[2].tmax = f64::NAN;
        let result = CropSeason::new("corn_wet", params(), start(), rows, "here");
        assert!(matches!(result, Err(GddError::NonFiniteTemperature { .. })));
    }

    #[test]
    fn unordered_dates_rejected() {
        let mut rows = weather(3, 15.0, 25.0);
        rows.swap(0, 2);
        let result = CropSeason::new("corn_wet", params(), start(), rows, "here");
        assert!(matches!(result, Err(GddError::UnorderedSeries { .. })));

        let mut dup = weather(2, 15.0, 25.0);
        dup[1].date = dup[0].date;
        let result = CropSeason::new("corn_wet", params(), start(), dup, "here");
        assert!(matches!(result, Err(GddError::UnorderedSeries { .. })));
    }

    #[test]
    fn base_temperature_season_stays_initial() {
        let computed = season(weather(45, 10.0, 10.0)).compute_gdd_series().unwrap();
        assert!(computed.days().iter().all(|d| d.cumulative_gdd == 0.0));
        let summary = computed.summary_today().unwrap();
        assert_eq!(summary.stage, GrowthStage::Initial);
        assert_eq!(summary.overall_progress, 0.0);
    }

    #[test]
    fn recomputation_is_identical() {
        let s = season(weather(20, 12.0, 31.0));
        let a = s.compute_gdd_series().unwrap();
        let b = s.compute_gdd_series().unwrap();
        assert_eq!(a.days(), b.days());
    }

    #[test]
    fn summary_as_of_earlier_date() {
        let computed = season(weather(30, 15.0, 25.0)).compute_gdd_series().unwrap();

        let mid = computed
            .summary_as_of(start() + chrono::Duration::days(9))
            .unwrap();
        assert_eq!(mid.day, 10);
        assert_eq!(mid.cumulative_gdd, 100.0);
        assert_eq!(mid.stage, GrowthStage::Development);

        let late = computed
            .summary_as_of(start() + chrono::Duration::days(400))
            .unwrap();
        assert_eq!(late.day, 30);

        let before = computed.summary_as_of(start() - chrono::Duration::days(1));
        assert!(matches!(before, Err(GddError::NoDataForDate(_))));
    }

    #[test]
    fn stage_dates_from_computed_series() {
        // 10 GDD/day for 55 days ends at 550
        let computed = season(weather(55, 15.0, 25.0)).compute_gdd_series().unwrap();
        let projection = computed.stage_dates();
        assert_eq!(projection.reached_count(), 3);
        assert_eq!(
            projection.date_of(GrowthStage::Initial).date(),
            Some(start() + chrono::Duration::days(4))
        );
        assert!(!projection.date_of(GrowthStage::Harvest).is_reached());
    }

    #[test]
    fn from_catalog_uses_injected_parameters() {
        let catalog = CropCatalog::new().with_crop("test_crop", params());
        let s = CropSeason::from_catalog(&catalog, "test_crop", start(), weather(3, 15.0, 25.0), "x")
            .unwrap();
        let computed = s.compute_gdd_series().unwrap();
        assert_eq!(computed.params().t_upper(), 30.0);
        assert_eq!(computed.planting_date(), start());

        let missing = CropSeason::from_catalog(&catalog, "corn_wet", start(), Vec::new(), "x");
        assert!(matches!(missing, Err(GddError::UnknownCropVariant(_))));
    }

    #[test]
    fn ideal_curve_matches_series_length() {
        let computed = season(weather(4, 15.0, 25.0)).compute_gdd_series().unwrap();
        assert_eq!(computed.ideal_gdd_curve(), vec![20.0, 40.0, 60.0, 80.0]);
    }
}
