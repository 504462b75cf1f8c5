use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gddtrack",
    version,
    about = "Crop phenology tracker based on Growing Degree Days"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check progress of a crop planted on or before today
    Check {
        #[command(flatten)]
        season: SeasonArgs,

        /// Summarize at this date instead of the latest available day
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Project stage dates for a future planting from climate-model data
    Plan {
        #[command(flatten)]
        season: SeasonArgs,
    },
    /// List crop variants in the catalog
    Crops,
    /// Show GDD thresholds for a crop variant
    Stages {
        /// Crop variant id, e.g. corn_wet
        crop: String,
    },
    /// Write a config file interactively
    Init,
}

#[derive(Args)]
pub struct SeasonArgs {
    /// Crop variant id, e.g. corn_wet
    #[arg(long)]
    pub crop: String,

    /// Planting date (YYYY-MM-DD)
    #[arg(long)]
    pub planting: NaiveDate,

    /// Place name to geocode
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub place: Option<String>,

    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_parses_without_config() {
        let cli = Cli::try_parse_from(["gddtrack", "init"]).unwrap();
        assert!(matches!(cli.command, Commands::Init));
        assert!(cli.config.is_none());
    }

    #[test]
    fn check_accepts_negative_longitude() {
        let cli = Cli::try_parse_from([
            "gddtrack", "check", "--crop", "corn_wet", "--planting", "2025-05-01", "--lat",
            "16.4", "--lon", "-120.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Check { season, as_of } => {
                assert_eq!(season.crop, "corn_wet");
                assert_eq!(season.planting, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
                assert_eq!(season.lat, Some(16.4));
                assert_eq!(season.lon, Some(-120.5));
                assert_eq!(season.format, OutputFormat::Text);
                assert!(as_of.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn place_conflicts_with_coordinates() {
        let result = Cli::try_parse_from([
            "gddtrack", "plan", "--crop", "corn_wet", "--planting", "2030-01-01", "--place",
            "Baguio", "--lat", "16.4", "--lon", "120.5",
        ]);
        assert!(result.is_err());
    }
}
