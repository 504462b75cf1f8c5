use super::crop::GrowthStage;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a cumulative GDD value sits within a crop's stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageClassification {
    pub stage: GrowthStage,
    /// Fraction (0..=1) of the current stage's heat-unit span accrued so far.
    pub stage_progress: f64,
    /// Fraction (0..=1) of the harvest requirement accrued so far.
    pub overall_progress: f64,
}

/// Point-in-time state of a season, as shown in "check progress" mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub date: NaiveDate,
    pub day: u32,
    pub cumulative_gdd: f64,
    pub stage: GrowthStage,
    pub stage_progress: f64,
    pub overall_progress: f64,
}

/// Outcome of searching a series for a stage threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageDate {
    /// `day` is the 1-based position of the crossing row in the series,
    /// which matches days since planting only when no days are missing.
    Reached { date: NaiveDate, day: u32 },
    /// The series ended before the threshold was crossed.
    NotReached,
}

impl StageDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            StageDate::Reached { date, .. } => Some(*date),
            StageDate::NotReached => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, StageDate::Reached { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageEstimate {
    pub stage: GrowthStage,
    pub threshold: f64,
    pub estimate: StageDate,
}

/// First crossing date of every stage threshold within a projected series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDateProjection {
    /// Number of rows (days with data) in the searched series.
    pub horizon_days: u32,
    pub horizon_end: Option<NaiveDate>,
    /// One entry per stage, in canonical order.
    pub stages: Vec<StageEstimate>,
}

impl StageDateProjection {
    pub fn get(&self, stage: GrowthStage) -> Option<&StageEstimate> {
        self.stages.iter().find(|e| e.stage == stage)
    }

    pub fn date_of(&self, stage: GrowthStage) -> StageDate {
        self.get(stage)
            .map(|e| e.estimate)
            .unwrap_or(StageDate::NotReached)
    }

    pub fn harvest_date(&self) -> Option<NaiveDate> {
        self.date_of(GrowthStage::Harvest).date()
    }

    pub fn reached_count(&self) -> usize {
        self.stages.iter().filter(|e| e.estimate.is_reached()).count()
    }
}
