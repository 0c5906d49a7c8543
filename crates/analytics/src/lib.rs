//! # Marquee Analytics
//!
//! Pure reporting over the loaded movie records: averages per country or per
//! country and year, actor and title lookups, and the numbers shown on the
//! details and home pages.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** nothing here performs I/O. Every function takes the
//!   records by reference and returns fresh values; derived columns such as
//!   profit, year and folded country labels are computed per call and never
//!   written back.
//! - **Stateless calculation:** the `ReportingEngine` holds no state, so
//!   calling it twice with the same inputs yields the same rows.

// Declare the modules that constitute this crate.
pub mod actors;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod format;
pub mod normalize;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use actors::{actor_index, actor_profile, films_for_actor, search_actors};
pub use catalog::{countries, movie_details, search_titles, summarize, unique_titles, years};
pub use engine::{AggregationFilter, ReportingEngine, metric_value};
pub use error::AnalyticsError;
pub use format::{format_amount, image_url};
pub use normalize::{normalize_label, search_key};
pub use report::{
    ActorProfile, AggregateRow, DatasetSummary, GroupKey, MovieDetails, ProfitTone,
    series_by_country,
};
