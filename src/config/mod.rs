pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::domain::model::RouteForm;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "route-mapper")]
#[command(about = "Fetch a driving route between two points and save it as an HTML map")]
pub struct CliConfig {
    #[arg(long, help = "Start location name")]
    pub start_name: String,

    #[arg(long, allow_hyphen_values = true, help = "Start latitude")]
    pub start_lat: String,

    #[arg(long, allow_hyphen_values = true, help = "Start longitude")]
    pub start_lon: String,

    #[arg(long, help = "End location name")]
    pub end_name: String,

    #[arg(long, allow_hyphen_values = true, help = "End latitude")]
    pub end_lat: String,

    #[arg(long, allow_hyphen_values = true, help = "End longitude")]
    pub end_lon: String,

    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Base URL of the OSRM routing service")]
    pub base_url: Option<String>,

    #[arg(long, help = "Routing profile, e.g. driving")]
    pub profile: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub zoom: Option<u8>,

    #[arg(long, help = "Directory the map is written to")]
    pub output_dir: Option<String>,

    #[arg(long, help = "File name of the map (default route_map.html)")]
    pub output_file: Option<String>,

    #[arg(long, help = "Give every map a unique, timestamped file name")]
    pub unique_filenames: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn form(&self) -> RouteForm {
        RouteForm::new(
            &self.start_name,
            &self.start_lat,
            &self.start_lon,
            &self.end_name,
            &self.end_lat,
            &self.end_lon,
        )
    }

    /// Loads the configuration file, if any, and applies command-line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(base_url) = &self.base_url {
            config.routing.base_url = Some(base_url.clone());
        }
        if let Some(profile) = &self.profile {
            config.routing.profile = Some(profile.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.routing.timeout_seconds = Some(timeout);
        }
        if let Some(zoom) = self.zoom {
            config.map.zoom = Some(zoom);
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = Some(dir.clone());
        }
        if let Some(file) = &self.output_file {
            config.output.filename = Some(file.clone());
        }
        if self.unique_filenames {
            config.output.unique_filenames = Some(true);
        }
    }
}
