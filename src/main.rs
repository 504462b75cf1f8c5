mod cli;

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat, SeasonArgs};
use gddtrack::catalog::{self, CropCatalog};
use gddtrack::config::Config;
use gddtrack::datasources::OpenMeteoClient;
use gddtrack::logic::{PhenologyService, SeasonRequest};
use gddtrack::models::Location;
use gddtrack::report;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli).await
}

fn load(config_path: Option<PathBuf>) -> anyhow::Result<(Config, CropCatalog)> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let catalog = config
        .load_catalog()
        .context("Failed to load crop catalog")?;
    Ok((config, catalog))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
        }
        Commands::Crops => {
            let (_, catalog) = load(cli.config)?;
            print!("{}", report::render_catalog(&catalog));
        }
        Commands::Stages { crop } => {
            let (_, catalog) = load(cli.config)?;
            let params = catalog.get(&crop)?;
            print!(
                "{}",
                report::render_stage_table(&catalog::label(&crop), params)
            );
        }
        Commands::Check { season, as_of } => {
            let (config, catalog) = load(cli.config)?;
            let client = OpenMeteoClient::new(config.open_meteo.clone())?;
            let request = build_request(&client, &season, &config).await?;
            let service = PhenologyService::new(client, catalog, config.projection);

            let report = service
                .check_progress(&request, today, as_of)
                .await
                .with_context(|| format!("Could not check progress for {}", request.crop_id))?;
            emit(season.format, &report, report.render_text())?;
        }
        Commands::Plan { season } => {
            let (config, catalog) = load(cli.config)?;
            let client = OpenMeteoClient::new(config.open_meteo.clone())?;
            let request = build_request(&client, &season, &config).await?;
            let service = PhenologyService::new(client, catalog, config.projection);

            let report = service
                .plan_harvest(&request, today)
                .await
                .with_context(|| format!("Could not plan harvest for {}", request.crop_id))?;
            emit(season.format, &report, report.render_text())?;
        }
    }

    Ok(())
}

async fn build_request(
    client: &OpenMeteoClient,
    args: &SeasonArgs,
    config: &Config,
) -> anyhow::Result<SeasonRequest> {
    let location = match (&args.place, args.lat, args.lon) {
        (Some(place), _, _) => client
            .geocode(place)
            .await
            .with_context(|| format!("Could not resolve location '{}'", place))?,
        (None, Some(lat), Some(lon)) => Location::from_coordinates(lat, lon),
        _ => match &config.default_location {
            Some(location) => location.clone(),
            None => bail!("No location given: pass --place or --lat/--lon, or set default_location"),
        },
    };

    Ok(SeasonRequest {
        crop_id: args.crop.clone(),
        planting_date: args.planting,
        location,
    })
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text),
        OutputFormat::Json => println!("{}", report::to_json(value)?),
    }
    Ok(())
}
