use crate::models::{CropParameters, StageDate, StageDateProjection, StageEstimate, StageThresholds};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Find the first date on which each stage threshold is met or exceeded.
///
/// The series is scanned once in order. Thresholds the series never reaches
/// are reported as [`StageDate::NotReached`]; nothing is extrapolated past
/// the last entry.
pub fn estimate_stage_dates<I>(series: I, stages: &StageThresholds) -> StageDateProjection
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    let targets: Vec<_> = stages.iter().collect();
    let mut found = vec![StageDate::NotReached; targets.len()];
    let mut next = 0;
    let mut horizon_days = 0u32;
    let mut horizon_end = None;

    for (date, cumulative) in series {
        horizon_days += 1;
        horizon_end = Some(date);

        while next < targets.len() && cumulative >= targets[next].1 {
            found[next] = StageDate::Reached {
                date,
                day: horizon_days,
            };
            next += 1;
        }
    }

    let stages = targets
        .into_iter()
        .zip(found)
        .map(|((stage, threshold), estimate)| StageEstimate {
            stage,
            threshold,
            estimate,
        })
        .collect();

    StageDateProjection {
        horizon_days,
        horizon_end,
        stages,
    }
}

/// How far ahead to request projected weather when planning a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonPolicy {
    /// Days added on top of the fastest possible season.
    #[serde(default = "default_buffer_days")]
    pub buffer_days: u32,
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    /// Last date the climate provider can serve.
    #[serde(default = "default_ceiling_date")]
    pub ceiling_date: NaiveDate,
}

fn default_buffer_days() -> u32 {
    60
}

fn default_max_days() -> u32 {
    365
}

fn default_ceiling_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2050, 12, 31).unwrap_or(NaiveDate::MAX)
}

impl Default for HorizonPolicy {
    fn default() -> Self {
        Self {
            buffer_days: default_buffer_days(),
            max_days: default_max_days(),
            ceiling_date: default_ceiling_date(),
        }
    }
}

impl HorizonPolicy {
    /// Number of days to request: the fastest possible season plus a buffer,
    /// never more than `max_days`.
    pub fn horizon_days(&self, params: &CropParameters) -> u32 {
        let max_daily = params.max_daily_gdd();
        let estimated = if max_daily > 0.0 {
            ((params.stages().harvest() / max_daily) as u32).saturating_add(self.buffer_days)
        } else {
            self.max_days
        };
        estimated.min(self.max_days)
    }

    /// Last date of projected weather to request for a season planted on `planting_date`.
    pub fn end_date(&self, planting_date: NaiveDate, params: &CropParameters) -> NaiveDate {
        let end = planting_date + chrono::Duration::days(self.horizon_days(params) as i64);
        end.min(self.ceiling_date)
    }
}
