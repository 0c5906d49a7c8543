//! # Marquee Dataset Ingestion
//!
//! Reads the cleaned movie table from a local file or a URL and decodes it,
//! once, into typed `MovieRecord`s. The serialized `Cast` and `Actor_Set`
//! columns are decoded here so that no page ever re-parses them.

pub mod cast;
pub mod error;
pub mod handle;
pub mod literal;
pub mod loader;
pub mod reader;

pub use cast::{parse_actor_set, parse_cast};
pub use error::DatasetError;
pub use handle::Dataset;
pub use loader::{DatasetLoader, DatasetSource};
pub use reader::RowDecoder;
