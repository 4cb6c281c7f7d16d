pub mod catalog;
pub mod mood;
pub mod profile;
pub mod ranking;
pub mod recommendations;
pub mod scoring;
pub mod social;

pub use catalog::{Catalog, CatalogSource, CsvFileSource};
pub use mood::MoodTable;
pub use recommendations::{EngineSettings, Recommender};
pub use social::SocialMatcher;
