use crate::adapters::osrm::{DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_TIMEOUT_SECS};
use crate::core::composer::DEFAULT_ZOOM;
use crate::core::planner::DEFAULT_OUTPUT_FILENAME;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, RouteMapError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_ZOOM: u8 = 19;

/// Settings file. Every section and key is optional.
///
/// ```toml
/// [routing]
/// base_url = "${OSRM_URL}"
/// profile = "driving"
/// timeout_seconds = 30
///
/// [map]
/// zoom = 12
///
/// [output]
/// directory = "./maps"
/// filename = "route_map.html"
/// unique_filenames = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub routing: RoutingConfig,
    pub map: MapConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub base_url: Option<String>,
    pub profile: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub zoom: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub filename: Option<String>,
    pub unique_filenames: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RouteMapError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RouteMapError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RouteMapError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("routing.base_url", self.routing_base_url())?;
        validation::validate_non_empty_string("routing.profile", self.routing_profile())?;
        validation::validate_positive_number("routing.timeout_seconds", self.timeout_seconds(), 1)?;
        validation::validate_range("map.zoom", self.zoom(), 0, MAX_ZOOM)?;
        validation::validate_path("output.directory", self.output_dir())?;
        validation::validate_file_name("output.filename", self.output_filename())?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn routing_base_url(&self) -> &str {
        self.routing.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn routing_profile(&self) -> &str {
        self.routing.profile.as_deref().unwrap_or(DEFAULT_PROFILE)
    }

    fn timeout_seconds(&self) -> u64 {
        self.routing.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn zoom(&self) -> u8 {
        self.map.zoom.unwrap_or(DEFAULT_ZOOM)
    }

    fn output_dir(&self) -> &str {
        self.output.directory.as_deref().unwrap_or(".")
    }

    fn output_filename(&self) -> &str {
        self.output
            .filename
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_FILENAME)
    }

    fn unique_filenames(&self) -> bool {
        self.output.unique_filenames.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.routing_base_url(), "http://router.project-osrm.org");
        assert_eq!(config.routing_profile(), "driving");
        assert_eq!(config.timeout_seconds(), 30);
        assert_eq!(config.zoom(), 12);
        assert_eq!(config.output_dir(), ".");
        assert_eq!(config.output_filename(), "route_map.html");
        assert!(!config.unique_filenames());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[routing]
base_url = "https://osrm.example.com"
profile = "car"
timeout_seconds = 5

[map]
zoom = 9

[output]
directory = "./maps"
filename = "paris_london.html"
unique_filenames = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.routing_base_url(), "https://osrm.example.com");
        assert_eq!(config.routing_profile(), "car");
        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.zoom(), 9);
        assert_eq!(config.output_dir(), "./maps");
        assert_eq!(config.output_filename(), "paris_london.html");
        assert!(config.unique_filenames());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROUTE_MAPPER_TEST_OSRM", "https://test.osrm.com");

        let toml_content = r#"
[routing]
base_url = "${ROUTE_MAPPER_TEST_OSRM}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.routing_base_url(), "https://test.osrm.com");

        std::env::remove_var("ROUTE_MAPPER_TEST_OSRM");
    }

    #[test]
    fn test_config_validation() {
        let invalid = [
            "[routing]\nbase_url = \"invalid-url\"\n",
            "[routing]\ntimeout_seconds = 0\n",
            "[map]\nzoom = 25\n",
            "[output]\nfilename = \"out/route.html\"\n",
            "[output]\nfilename = \"route.png\"\n",
        ];

        for content in invalid {
            let config = TomlConfig::from_toml_str(content).unwrap();
            assert!(config.validate().is_err(), "should reject: {}", content);
        }
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[routing\nbase_url ="),
            Err(RouteMapError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[map]\nzoom = 14\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.zoom(), 14);
    }
}
