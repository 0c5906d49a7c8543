use analytics::AnalyticsError;
use core_types::Metric;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("At most {max} countries can be selected, got {selected}")]
    TooManySelections { selected: usize, max: usize },

    #[error("Unknown country '{0}'")]
    UnknownCountry(String),

    #[error("The {page} page cannot chart {metric}; choose one of {allowed}")]
    MetricNotAllowed {
        page: &'static str,
        metric: Metric,
        allowed: String,
    },

    #[error("The dataset has no dated movies")]
    NoYears,

    #[error("Interactive prompt failed: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("Failed to serialize the page: {0}")]
    Json(#[from] serde_json::Error),
}
