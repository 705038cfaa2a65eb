pub mod config;
pub mod error;
pub mod types;

pub use config::ProgressionConfig;
pub use error::{CatalogError, ConfigError, ProgressionError, Result};
pub use types::{CharacterId, Lumens, SkillId, Stat};
