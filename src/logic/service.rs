use super::projection::HorizonPolicy;
use super::season::CropSeason;
use crate::catalog::{self, CropCatalog};
use crate::datasources::WeatherProvider;
use crate::error::{GddError, Result};
use crate::models::Location;
use crate::report::{CheckReport, PlanReport};
use chrono::NaiveDate;

/// What the user asked about: a crop variant planted at a place on a date.
#[derive(Debug, Clone)]
pub struct SeasonRequest {
    pub crop_id: String,
    pub planting_date: NaiveDate,
    pub location: Location,
}

/// Runs the check-progress and plan-harvest workflows against a weather
/// provider and an injected crop catalog.
pub struct PhenologyService<P> {
    provider: P,
    catalog: CropCatalog,
    horizon: HorizonPolicy,
}

impl<P: WeatherProvider> PhenologyService<P> {
    pub fn new(provider: P, catalog: CropCatalog, horizon: HorizonPolicy) -> Self {
        Self {
            provider,
            catalog,
            horizon,
        }
    }

    /// Progress of a season planted on or before `today`, summarized at
    /// `as_of` (or the latest available day).
    pub async fn check_progress(
        &self,
        request: &SeasonRequest,
        today: NaiveDate,
        as_of: Option<NaiveDate>,
    ) -> Result<CheckReport> {
        self.catalog.get(&request.crop_id)?;

        if request.planting_date > today {
            return Err(GddError::InvalidRequest(
                "check mode requires a planting date on or before today".into(),
            ));
        }

        let end = as_of.map(|d| d.min(today)).unwrap_or(today);
        if end < request.planting_date {
            return Err(GddError::InvalidRequest(format!(
                "summary date {} precedes planting date {}",
                end, request.planting_date
            )));
        }

        tracing::info!(
            "Checking {} planted {} at {}",
            request.crop_id,
            request.planting_date,
            request.location
        );

        let weather = self
            .provider
            .fetch_historical(&request.location, request.planting_date, end)
            .await?;
        if weather.is_empty() {
            tracing::warn!("No historical weather for {}", request.location);
            return Err(GddError::EmptySeries);
        }

        let season = CropSeason::from_catalog(
            &self.catalog,
            &request.crop_id,
            request.planting_date,
            weather,
            request.location.name.as_str(),
        )?
        .compute_gdd_series()?;

        let summary = match as_of {
            Some(date) => season.summary_as_of(date)?,
            None => season.summary_today()?,
        };

        tracing::info!(
            "{} at {:.1} GDD: {} ({:.0}% of season)",
            request.crop_id,
            summary.cumulative_gdd,
            summary.stage,
            summary.overall_progress * 100.0
        );

        Ok(CheckReport {
            location: request.location.clone(),
            crop_id: request.crop_id.clone(),
            crop_label: catalog::label(&request.crop_id),
            params: *season.params(),
            planting_date: season.planting_date(),
            summary,
            ideal_gdd: season.ideal_gdd_curve(),
            days: season.into_days(),
        })
    }

    /// Projected stage dates for a season to be planted after `today`.
    pub async fn plan_harvest(&self, request: &SeasonRequest, today: NaiveDate) -> Result<PlanReport> {
        let params = *self.catalog.get(&request.crop_id)?;

        if request.planting_date <= today {
            return Err(GddError::InvalidRequest(
                "plan mode requires a planting date after today".into(),
            ));
        }

        let end = self.horizon.end_date(request.planting_date, &params);
        if end <= request.planting_date {
            return Err(GddError::InvalidRequest(format!(
                "planting date {} is beyond the projection ceiling {}",
                request.planting_date, self.horizon.ceiling_date
            )));
        }

        tracing::info!(
            "Planning {} planted {} at {} (projection through {})",
            request.crop_id,
            request.planting_date,
            request.location,
            end
        );

        let weather = self
            .provider
            .fetch_projection(&request.location, request.planting_date, end)
            .await?;
        if weather.is_empty() {
            tracing::warn!("No projected weather for {}", request.location);
            return Err(GddError::EmptySeries);
        }

        let season = CropSeason::from_catalog(
            &self.catalog,
            &request.crop_id,
            request.planting_date,
            weather,
            request.location.name.as_str(),
        )?
        .compute_gdd_series()?;

        let projection = season.stage_dates();
        tracing::debug!(
            "Projection reaches {} of {} stages",
            projection.reached_count(),
            projection.stages.len()
        );
        if projection.harvest_date().is_none() {
            tracing::info!(
                "Harvest threshold not reached within {} projected days",
                projection.horizon_days
            );
        }

        Ok(PlanReport {
            location: request.location.clone(),
            crop_id: request.crop_id.clone(),
            crop_label: catalog::label(&request.crop_id),
            params: *season.params(),
            planting_date: season.planting_date(),
            horizon_end: end,
            projection,
            ideal_gdd: season.ideal_gdd_curve(),
            days: season.into_days(),
        })
    }
}
