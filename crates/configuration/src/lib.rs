use crate::error::ConfigError;
use crate::settings::Config;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DashboardSettings, DatasetSettings, LoggingSettings};

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of the environment variables that override file values,
/// e.g. `MARQUEE__DATASET__SOURCE`.
pub const ENV_PREFIX: &str = "MARQUEE";

/// Command-line overrides layered on top of the file and environment.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct CliOverrides {
    /// Path to a TOML configuration file (defaults to ./config.toml when present).
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub config: Option<PathBuf>,

    /// Dataset location: a local CSV path or an http(s) URL.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub source: Option<String>,
}

/// Loads the application configuration from the `config.toml` file.
///
/// The file is optional; environment variables prefixed with `MARQUEE__`
/// take precedence over it.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(None)
}

/// Loads the configuration from an explicit file, which must then exist.
pub fn load_config_from(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("dashboard.default_countries")
                .with_list_parse_key("dataset.unknown_country_aliases")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(source = %config.dataset.source, "Configuration loaded.");
    Ok(config)
}

/// Loads the configuration and applies the command-line overrides.
pub fn load_with_overrides(overrides: &CliOverrides) -> Result<Config, ConfigError> {
    let mut config = load_config_from(overrides.config.as_deref())?;
    if let Some(source) = &overrides.source {
        config.dataset.source = source.clone();
    }
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Rejects values the dashboard cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.source.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "dataset.source must not be empty".to_string(),
            ));
        }
        if self.dashboard.max_selections == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.max_selections must be at least 1".to_string(),
            ));
        }
        if self.dashboard.search_limit == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.search_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Metric;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_sections_use_defaults() {
        let file = write_config("[dataset]\nsource = \"movies.csv\"\n");
        let config = load_config_from(Some(file.path())).unwrap();

        assert_eq!(config.dataset.source, "movies.csv");
        assert_eq!(config.dataset.unknown_country_aliases, vec!["Inconnu"]);
        assert_eq!(config.dashboard.max_selections, 5);
        assert_eq!(config.dashboard.default_metric, Metric::Budget);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn dashboard_section_is_deserialized() {
        let file = write_config(
            r#"
[dashboard]
max_selections = 3
default_countries = ["Japon", "Italie"]
default_metric = "Profit"
"#,
        );
        let config = load_config_from(Some(file.path())).unwrap();

        assert_eq!(config.dashboard.max_selections, 3);
        assert_eq!(config.dashboard.default_countries, vec!["Japon", "Italie"]);
        assert_eq!(config.dashboard.default_metric, Metric::Profit);
    }

    #[test]
    fn zero_selections_fail_validation() {
        let file = write_config("[dashboard]\nmax_selections = 0\n");
        let err = load_config_from(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/marquee.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn bad_values_report_a_load_failure() {
        let file = write_config("[dashboard]\ndefault_metric = \"Box office\"\n");
        let err = load_config_from(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
        assert!(err.to_string().starts_with("Failed to load configuration: "));
    }

    #[test]
    fn source_override_wins() {
        let file = write_config("[dataset]\nsource = \"movies.csv\"\n");
        let overrides = CliOverrides {
            config: Some(file.path().to_path_buf()),
            source: Some("https://example.org/movies.csv".to_string()),
        };
        let config = load_with_overrides(&overrides).unwrap();
        assert_eq!(config.dataset.source, "https://example.org/movies.csv");
    }
}
