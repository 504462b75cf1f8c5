pub mod calculations;
pub mod classifier;
pub mod projection;
pub mod season;
pub mod service;

pub use calculations::{accumulate_gdd, compute_daily_gdd, ideal_gdd_curve};
pub use classifier::classify;
pub use projection::{estimate_stage_dates, HorizonPolicy};
pub use season::{ComputedSeason, CropSeason};
pub use service::{PhenologyService, SeasonRequest};
