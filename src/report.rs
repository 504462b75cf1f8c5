//! Read-only report values handed to the presentation layer, with plain
//! text and JSON renderings.

use crate::catalog::{self, CropCatalog};
use crate::error::Result;
use crate::models::{
    CropParameters, GddDay, GrowthStage, Location, StageDate, StageDateProjection, StageSummary,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Result of "check progress" for a season already in the ground.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub location: Location,
    pub crop_id: String,
    pub crop_label: String,
    pub params: CropParameters,
    pub planting_date: NaiveDate,
    pub summary: StageSummary,
    pub days: Vec<GddDay>,
    pub ideal_gdd: Vec<f64>,
}

/// Result of "plan harvest" for a future planting.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub location: Location,
    pub crop_id: String,
    pub crop_label: String,
    pub params: CropParameters,
    pub planting_date: NaiveDate,
    pub horizon_end: NaiveDate,
    pub projection: StageDateProjection,
    pub days: Vec<GddDay>,
    pub ideal_gdd: Vec<f64>,
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn crop_header(out: &mut String, location: &Location, crop_label: &str, planting: NaiveDate) {
    out.push_str(&format!("Location: {}\n", location));
    out.push_str(&format!(
        "Coordinates: {:.4}, {:.4}\n",
        location.latitude, location.longitude
    ));
    out.push_str(&format!("Crop: {}\n", crop_label));
    out.push_str(&format!("Planting Date: {}\n", planting));
}

/// Cumulative GDD threshold per growth stage.
pub fn render_stage_table(crop_label: &str, params: &CropParameters) -> String {
    let mut out = format!("GDD Thresholds - {}\n", crop_label);
    out.push_str(&format!(
        "Tbase: {:.1} C | Tupper: {:.1} C\n",
        params.t_base(),
        params.t_upper()
    ));
    out.push_str(&format!("{:<16}{:>16}\n", "Growth Stage", "Cumulative GDD"));
    for (stage, threshold) in params.stages().iter() {
        out.push_str(&format!("{:<16}{:>16}\n", stage.label(), threshold));
    }
    out
}

pub fn render_catalog(catalog: &CropCatalog) -> String {
    let mut out = String::new();
    for (crop, variants) in catalog.variants_by_crop() {
        out.push_str(&format!(
            "{:<16}{}\n",
            catalog::label(&crop),
            variants.join(", ")
        ));
    }
    out
}

impl CheckReport {
    pub fn render_text(&self) -> String {
        let mut out = render_stage_table(&self.crop_label, &self.params);
        out.push('\n');
        crop_header(&mut out, &self.location, &self.crop_label, self.planting_date);
        out.push('\n');

        let s = &self.summary;
        out.push_str("Results\n");
        out.push_str(&format!("Date: {}\n", s.date));
        out.push_str(&format!("Days since planting: {}\n", s.day));
        out.push_str(&format!("Cumulative GDD: {:.2}\n", s.cumulative_gdd));
        out.push_str(&format!("Stage: {}\n", s.stage));
        out.push_str(&format!("Stage Progress: {}\n", percent(s.stage_progress)));
        out.push_str(&format!("Overall Progress: {}\n", percent(s.overall_progress)));
        out
    }
}

impl PlanReport {
    pub fn render_text(&self) -> String {
        let mut out = render_stage_table(&self.crop_label, &self.params);
        out.push('\n');
        crop_header(&mut out, &self.location, &self.crop_label, self.planting_date);
        out.push_str(&format!(
            "Projection: {} days through {}\n",
            self.projection.horizon_days, self.horizon_end
        ));
        out.push('\n');

        out.push_str("Estimated Stage Dates\n");
        for estimate in &self.projection.stages {
            out.push_str(&format!(
                "{}: {}\n",
                estimate.stage.label(),
                self.describe(estimate.estimate)
            ));
        }
        out
    }

    fn describe(&self, date: StageDate) -> String {
        match date {
            StageDate::Reached { date, day } => format!("{} (day {})", date, day),
            StageDate::NotReached => format!(
                "not reached within {} days of projected data (through {})",
                self.projection.horizon_days, self.horizon_end
            ),
        }
    }

    pub fn harvest(&self) -> StageDate {
        self.projection.date_of(GrowthStage::Harvest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{estimate_stage_dates, CropSeason};
    use crate::models::{StageThresholds, WeatherRecord};

    fn params() -> CropParameters {
        let stages = StageThresholds::new(50.0, 150.0, 400.0, 600.0).unwrap();
        CropParameters::new(10.0, 30.0, stages).unwrap()
    }

    fn computed(days: usize) -> crate::logic::ComputedSeason {
        let start = NaiveDate::from_ymd_opt(2030, 3, 1).unwrap();
        let rows = (0..days)
            .map(|i| WeatherRecord::new(start + chrono::Duration::days(i as i64), 15.0, 25.0))
            .collect();
        CropSeason::new("corn_wet", params(), start, rows, "Testville")
            .unwrap()
            .compute_gdd_series()
            .unwrap()
    }

    #[test]
    fn stage_table_lists_all_stages() {
        let table = render_stage_table("Corn Wet", &params());
        assert!(table.contains("GDD Thresholds - Corn Wet"));
        assert!(table.contains("Mid Season"));
        assert!(table.contains("600"));
        assert_eq!(table.lines().count(), 7);
    }

    #[test]
    fn check_report_formats_progress() {
        let season = computed(5);
        let report = CheckReport {
            location: Location::new("Testville", 1.0, 2.0),
            crop_id: "corn_wet".into(),
            crop_label: "Corn Wet".into(),
            params: params(),
            planting_date: season.planting_date(),
            summary: season.summary_today().unwrap(),
            ideal_gdd: season.ideal_gdd_curve(),
            days: season.into_days(),
        };
        let text = report.render_text();
        assert!(text.contains("Cumulative GDD: 50.00"));
        assert!(text.contains("Stage: Initial"));
        assert!(text.contains("Stage Progress: 100.0%"));
        assert!(text.contains("Overall Progress: 8.3%"));

        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert_eq!(json["summary"]["stage"], "initial");
        assert_eq!(json["days"].as_array().unwrap().len(), 5);
        assert_eq!(json["params"]["stages"]["harvest"], 600.0);
    }

    #[test]
    fn plan_report_marks_unreached_stages() {
        let season = computed(55);
        let projection = estimate_stage_dates(
            season.days().iter().map(|d| (d.date, d.cumulative_gdd)),
            params().stages(),
        );
        let report = PlanReport {
            location: Location::new("Testville", 1.0, 2.0),
            crop_id: "corn_wet".into(),
            crop_label: "Corn Wet".into(),
            params: params(),
            planting_date: season.planting_date(),
            horizon_end: NaiveDate::from_ymd_opt(2030, 4, 24).unwrap(),
            projection,
            ideal_gdd: season.ideal_gdd_curve(),
            days: season.into_days(),
        };
        let text = report.render_text();
        assert!(text.contains("Initial: 2030-03-05 (day 5)"));
        assert!(text.contains(
            "Harvest: not reached within 55 days of projected data (through 2030-04-24)"
        ));
        assert_eq!(report.harvest(), StageDate::NotReached);
    }

    #[test]
    fn catalog_listing_groups_variants() {
        let catalog = CropCatalog::builtin().unwrap();
        let listing = render_catalog(&catalog);
        assert!(listing.contains("Corn"));
        assert!(listing.contains("dry, wet"));
        assert!(listing.contains("Sweet Potato"));
    }
}
