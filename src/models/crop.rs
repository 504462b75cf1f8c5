use crate::error::{GddError, Result};
use serde::{Deserialize, Serialize};

/// Canonical phenological stages, in the order a crop passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Initial,
    Development,
    MidSeason,
    Harvest,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 4] = [
        GrowthStage::Initial,
        GrowthStage::Development,
        GrowthStage::MidSeason,
        GrowthStage::Harvest,
    ];

    pub fn index(&self) -> usize {
        match self {
            GrowthStage::Initial => 0,
            GrowthStage::Development => 1,
            GrowthStage::MidSeason => 2,
            GrowthStage::Harvest => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Initial => "initial",
            GrowthStage::Development => "development",
            GrowthStage::MidSeason => "mid_season",
            GrowthStage::Harvest => "harvest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrowthStage::Initial => "Initial",
            GrowthStage::Development => "Development",
            GrowthStage::MidSeason => "Mid Season",
            GrowthStage::Harvest => "Harvest",
        }
    }

}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Cumulative GDD thresholds for the four canonical stages.
///
/// Thresholds are positive and strictly increasing in stage order; the
/// harvest threshold is the season's total heat-unit requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStageThresholds", into = "RawStageThresholds")]
pub struct StageThresholds {
    values: [f64; 4],
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawStageThresholds {
    initial: f64,
    development: f64,
    mid_season: f64,
    harvest: f64,
}

impl StageThresholds {
    pub fn new(initial: f64, development: f64, mid_season: f64, harvest: f64) -> Result<Self> {
        let values = [initial, development, mid_season, harvest];

        for (stage, value) in GrowthStage::ALL.iter().zip(values.iter()) {
            if !value.is_finite() || *value <= 0.0 {
                return Err(GddError::InvalidCropParameters(format!(
                    "{} threshold must be a positive number, got {}",
                    stage.as_str(),
                    value
                )));
            }
        }

        for pair in GrowthStage::ALL.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if values[next.index()] <= values[prev.index()] {
                return Err(GddError::InvalidCropParameters(format!(
                    "{} threshold ({}) must exceed {} threshold ({})",
                    next.as_str(),
                    values[next.index()],
                    prev.as_str(),
                    values[prev.index()]
                )));
            }
        }

        Ok(Self { values })
    }

    pub fn threshold(&self, stage: GrowthStage) -> f64 {
        self.values[stage.index()]
    }

    /// Lower bound of a stage's span: the previous stage's threshold, or 0.
    pub fn span_start(&self, stage: GrowthStage) -> f64 {
        match stage.index() {
            0 => 0.0,
            i => self.values[i - 1],
        }
    }

    pub fn harvest(&self) -> f64 {
        self.values[GrowthStage::Harvest.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (GrowthStage, f64)> + '_ {
        GrowthStage::ALL.iter().map(|s| (*s, self.values[s.index()]))
    }
}

impl TryFrom<RawStageThresholds> for StageThresholds {
    type Error = GddError;

    fn try_from(raw: RawStageThresholds) -> Result<Self> {
        Self::new(raw.initial, raw.development, raw.mid_season, raw.harvest)
    }
}

impl From<StageThresholds> for RawStageThresholds {
    fn from(t: StageThresholds) -> Self {
        Self {
            initial: t.values[0],
            development: t.values[1],
            mid_season: t.values[2],
            harvest: t.values[3],
        }
    }
}

/// Temperature-response constants for one crop variant, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCropParameters", into = "RawCropParameters")]
pub struct CropParameters {
    t_base: f64,
    t_upper: f64,
    stages: StageThresholds,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCropParameters {
    t_base: f64,
    t_upper: f64,
    stages: StageThresholds,
}

impl CropParameters {
    pub fn new(t_base: f64, t_upper: f64, stages: StageThresholds) -> Result<Self> {
        if !t_base.is_finite() || !t_upper.is_finite() {
            return Err(GddError::InvalidCropParameters(format!(
                "temperatures must be finite (t_base {}, t_upper {})",
                t_base, t_upper
            )));
        }
        if t_upper < t_base {
            return Err(GddError::InvalidCropParameters(format!(
                "t_upper ({}) is below t_base ({})",
                t_upper, t_base
            )));
        }

        Ok(Self {
            t_base,
            t_upper,
            stages,
        })
    }

    pub fn t_base(&self) -> f64 {
        self.t_base
    }

    pub fn t_upper(&self) -> f64 {
        self.t_upper
    }

    pub fn stages(&self) -> &StageThresholds {
        &self.stages
    }

    /// Largest contribution a single day can make (a day spent at or above `t_upper`).
    pub fn max_daily_gdd(&self) -> f64 {
        self.t_upper - self.t_base
    }
}

impl TryFrom<RawCropParameters> for CropParameters {
    type Error = GddError;

    fn try_from(raw: RawCropParameters) -> Result<Self> {
        Self::new(raw.t_base, raw.t_upper, raw.stages)
    }
}

impl From<CropParameters> for RawCropParameters {
    fn from(p: CropParameters) -> Self {
        Self {
            t_base: p.t_base,
            t_upper: p.t_upper,
            stages: p.stages,
        }
    }
}
