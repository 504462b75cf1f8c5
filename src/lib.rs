//! Crop phenology from daily temperatures using Growing Degree Days.
//!
//! Daily min/max temperatures are turned into a cumulative heat-unit series
//! for a planted crop ([`logic::CropSeason`]), which is then mapped to a
//! growth stage and progress ([`logic::classify`]) or searched for the dates
//! each stage threshold is crossed ([`logic::estimate_stage_dates`]).

pub mod catalog;
pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;
pub mod report;

pub use error::{GddError, Result};
