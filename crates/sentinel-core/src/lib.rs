pub mod classify;
pub mod config;
pub mod error;
pub mod noise;
pub mod persist;
pub mod search;
pub mod strategy;
pub mod types;

pub use classify::classify;
pub use config::{ClassifierConfig, StrategySet, Thresholds};
pub use error::{Error, Result};
pub use persist::ArtifactPersist;
pub use search::{RepositorySearch, SearchConfig, SearchQuery};
pub use types::*;
