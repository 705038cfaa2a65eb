//! Load skill catalogs from TOML or JSON
//!
//! Document shape: `category -> subcategory -> [skill]`, or
//! `category -> [skill]` for flat categories such as `monster`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::{Catalog, Skill};
use crate::core::error::CatalogError;

/// A category as it appears in the document
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Flat(Vec<Skill>),
    Nested(BTreeMap<String, Vec<Skill>>),
}

type RawCatalog = BTreeMap<String, RawCategory>;

/// Load a catalog file, picking the format from its extension
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    let catalog = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content)?,
        Some("json") => parse_json(&content)?,
        other => {
            return Err(CatalogError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            ))
        }
    };
    tracing::info!("Loaded {} skills from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Parse a catalog from TOML text
pub fn parse_toml(content: &str) -> Result<Catalog, CatalogError> {
    let raw: RawCatalog = toml::from_str(content)?;
    build(raw)
}

/// Parse a catalog from JSON text
pub fn parse_json(content: &str) -> Result<Catalog, CatalogError> {
    let raw: RawCatalog = serde_json::from_str(content)?;
    build(raw)
}

fn build(raw: RawCatalog) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    for (category, group) in raw {
        match group {
            RawCategory::Flat(skills) => {
                for skill in skills {
                    catalog.add(&category, None, skill)?;
                }
            }
            RawCategory::Nested(subs) => {
                for (sub, skills) in subs {
                    for skill in skills {
                        catalog.add(&category, Some(&sub), skill)?;
                    }
                }
            }
        }
    }

    // Missing ids are reported, not rejected: the engine treats them as unsatisfiable
    for dangling in catalog.dangling_references() {
        tracing::warn!(
            "Skill {} references unknown skill {}",
            dangling.skill,
            dangling.missing
        );
    }

    Ok(catalog)
}
