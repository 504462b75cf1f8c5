use crate::catalog::CropCatalog;
use crate::error::{GddError, Result};
use crate::logic::HorizonPolicy;
use crate::models::Location;
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Crop catalog file; the bundled catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    #[serde(default)]
    pub open_meteo: OpenMeteoConfig,
    #[serde(default)]
    pub projection: HorizonPolicy,
    /// Used when neither a place name nor coordinates are given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OpenMeteoConfig {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
    #[serde(default = "default_climate_url")]
    pub climate_url: String,
    #[serde(default = "default_climate_model")]
    pub climate_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".into()
}

fn default_archive_url() -> String {
    "https://archive-api.open-meteo.com/v1/archive".into()
}

fn default_climate_url() -> String {
    "https://climate-api.open-meteo.com/v1/climate".into()
}

fn default_climate_model() -> String {
    "EC_Earth3P_HR".into()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            archive_url: default_archive_url(),
            climate_url: default_climate_url(),
            climate_model: default_climate_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from `config_override`, or from the first standard
    /// location that exists. Without either, defaults are used.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(GddError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| GddError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml_str(&config_str)?;
        tracing::info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    /// Parse YAML after substituting `${VAR}` placeholders from the environment.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        serde_yaml::from_str(&content)
            .map_err(|e| GddError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search config/config.yaml, then the XDG config directory.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("gddtrack").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/gddtrack/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GddError::Config("Cannot determine config directory".into()))?
            .join("gddtrack");
        Ok(config_dir.join("config.yaml"))
    }

    pub fn load_catalog(&self) -> Result<CropCatalog> {
        match &self.catalog_path {
            Some(path) => CropCatalog::load(path),
            None => CropCatalog::builtin(),
        }
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("GDD tracker setup");
        println!();

        println!("Default location (leave name blank to skip)");
        let name: String = Input::new()
            .with_prompt("  Place name")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| GddError::Config(format!("Input error: {}", e)))?;

        let default_location = if name.is_empty() {
            None
        } else {
            let latitude: f64 = Input::new()
                .with_prompt("  Latitude")
                .interact_text()
                .map_err(|e| GddError::Config(format!("Input error: {}", e)))?;

            let longitude: f64 = Input::new()
                .with_prompt("  Longitude")
                .interact_text()
                .map_err(|e| GddError::Config(format!("Input error: {}", e)))?;

            Some(Location::new(name, latitude, longitude))
        };

        println!();
        println!("Crop catalog (leave blank for the bundled catalog)");
        let catalog: String = Input::new()
            .with_prompt("  Catalog path")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| GddError::Config(format!("Input error: {}", e)))?;

        let catalog_path = if catalog.is_empty() {
            None
        } else {
            Some(PathBuf::from(catalog))
        };

        let config = Config {
            catalog_path,
            default_location,
            ..Config::default()
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| GddError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# gddtrack configuration\n# Generated by `gddtrack init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| GddError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}
