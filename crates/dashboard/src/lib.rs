//! # Marquee Dashboard
//!
//! The five pages of the movie dashboard, computed from a loaded `Dataset`
//! and rendered as terminal tables, plus the menu navigation that ties them
//! together in the interactive `browse` mode.
//!
//! Page values (`HomePage`, `AveragesPage`, ...) are plain serializable data,
//! so the same page can be printed as a table or emitted as JSON.

pub mod error;
pub mod interactive;
pub mod navigation;
pub mod pages;
pub mod render;

pub use error::DashboardError;
pub use interactive::browse;
pub use navigation::{NavEvent, Navigation, View, next};
pub use pages::{
    ActorListing, AveragesPage, Dashboard, EvolutionPage, EvolutionRequest, HomePage, YearSpan,
};
