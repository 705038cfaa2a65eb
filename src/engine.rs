//! Read-only engine context
//!
//! Bundles the catalog with everything derived from it (dependency index,
//! upgrade chains, bonus extractor and cache) plus the tunable config.
//! Build one per catalog and pass it by reference to ledger operations;
//! it is `Sync`, so an `Arc<EngineContext>` can back many ledgers.

use std::sync::Arc;

use crate::bonuses::{BonusCache, BonusExtractor, SkillBonus};
use crate::catalog::{Catalog, DanglingReference};
use crate::core::config::ProgressionConfig;
use crate::graph::{DependencyIndex, UpgradeChainIndex};

#[derive(Debug)]
pub struct EngineContext {
    config: ProgressionConfig,
    catalog: Catalog,
    dependents: DependencyIndex,
    upgrades: UpgradeChainIndex,
    extractor: BonusExtractor,
    cache: BonusCache,
}

impl EngineContext {
    pub fn new(catalog: Catalog, config: ProgressionConfig) -> Self {
        let dependents = DependencyIndex::build(&catalog);
        let upgrades = UpgradeChainIndex::build(&catalog);
        for base in upgrades.cycles() {
            tracing::warn!("Upgrade chain through {} is cyclic; walks are bounded", base);
        }
        tracing::debug!("Engine context built over {} skills", catalog.len());
        Self {
            config,
            catalog,
            dependents,
            upgrades,
            extractor: BonusExtractor::new(),
            cache: BonusCache::new(),
        }
    }

    /// Context over `catalog` with default tuning
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::new(catalog, ProgressionConfig::default())
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn dependents(&self) -> &DependencyIndex {
        &self.dependents
    }

    pub fn upgrades(&self) -> &UpgradeChainIndex {
        &self.upgrades
    }

    pub fn extractor(&self) -> &BonusExtractor {
        &self.extractor
    }

    pub fn cache(&self) -> &BonusCache {
        &self.cache
    }

    /// Parsed bonus of a catalog skill (memoized); `None` if the id is unknown
    pub fn skill_bonus(&self, id: &str) -> Option<Arc<SkillBonus>> {
        let skill = self.catalog.get(id)?;
        Some(self.cache.get_or_extract(&skill.id, &skill.desc, &self.extractor))
    }

    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        self.catalog.dangling_references()
    }

    /// Swap in a new catalog, rebuilding derived indexes and dropping cached bonuses
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.dependents = DependencyIndex::build(&catalog);
        self.upgrades = UpgradeChainIndex::build(&catalog);
        self.catalog = catalog;
        self.cache.invalidate();
        tracing::info!("Catalog replaced ({} skills)", self.catalog.len());
    }
}
