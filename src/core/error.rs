use thiserror::Error;

use crate::core::types::{Lumens, SkillId, Stat};

/// Recoverable failures returned by ledger and planner operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    #[error("Prerequisites not met for skill: {0}")]
    PrerequisitesNotMet(SkillId),

    #[error("Insufficient lumens: need {needed}, have {available}")]
    InsufficientFunds { needed: Lumens, available: Lumens },

    #[error("Skill already unlocked: {0}")]
    AlreadyUnlocked(SkillId),

    #[error("Skill not unlocked: {0}")]
    NotUnlocked(SkillId),

    #[error("{stat} is already at its maximum ({max})")]
    AtMaximum { stat: Stat, max: u32 },

    #[error("{stat} cannot drop below {minimum}")]
    BelowMinimum { stat: Stat, minimum: u32 },

    #[error("Skill not found: {0}")]
    SkillNotFound(SkillId),

    #[error("Skill {skill} references missing skill {missing}")]
    InvalidCatalogReference { skill: SkillId, missing: SkillId },

    #[error("Skill is not a toggle: {0}")]
    NotAToggle(SkillId),
}

pub type Result<T> = std::result::Result<T, ProgressionError>;

/// Load-time catalog failures. These are fatal: no ledger is built on a bad catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Duplicate skill id: {0}")]
    DuplicateSkill(SkillId),

    #[error("Malformed category '{0}': mixes flat and nested skill lists")]
    MalformedCategory(String),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::ParseError(e.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(e: toml::de::Error) -> Self {
        CatalogError::ParseError(e.to_string())
    }
}

/// Configuration loading and validation failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
