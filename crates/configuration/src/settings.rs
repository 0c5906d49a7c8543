use core_types::Metric;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetSettings,
    pub dashboard: DashboardSettings,
    pub logging: LoggingSettings,
}

/// Where the movie table comes from and how its labels are cleaned up.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// A local path or an `http(s)://` URL to the cleaned CSV export.
    pub source: String,
    /// Country labels that are read as the `Unknown` sentinel.
    pub unknown_country_aliases: Vec<String>,
    /// Timeout applied when `source` is a remote URL.
    pub request_timeout_secs: u64,
}

/// Parameters of the interactive pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Maximum number of countries selectable on a chart page.
    pub max_selections: usize,
    /// Countries preselected on the budget evolution page.
    pub default_countries: Vec<String>,
    pub default_metric: Metric,
    /// Prefix joined with a cast member's `profile_path`.
    pub image_base_url: String,
    /// Maximum number of actors listed for a search.
    pub search_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            source: "./data/TMDb_Dataset_clean.csv".to_string(),
            unknown_country_aliases: vec!["Inconnu".to_string()],
            request_timeout_secs: 60,
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            max_selections: 5,
            default_countries: vec![
                "Allemagne".to_string(),
                "France".to_string(),
                "Etats-Unis".to_string(),
            ],
            default_metric: Metric::Budget,
            image_base_url: "https://image.tmdb.org/t/p/w185/".to_string(),
            search_limit: 50,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}
