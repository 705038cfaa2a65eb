//! Per-skill memo of extracted bonuses
//!
//! Entries derive only from catalog text, so one cache can serve every
//! ledger built on the same catalog. Replace the catalog, clear the cache.

use ahash::AHashMap;
use std::sync::{Arc, RwLock};

use crate::bonuses::extract::{BonusExtractor, SkillBonus};
use crate::core::types::SkillId;

#[derive(Debug, Default)]
pub struct BonusCache {
    entries: RwLock<AHashMap<SkillId, Arc<SkillBonus>>>,
}

impl BonusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached bonus for `id`, parsing `desc` on first use
    pub fn get_or_extract(&self, id: &SkillId, desc: &str, extractor: &BonusExtractor) -> Arc<SkillBonus> {
        {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            if let Some(bonus) = entries.get(id) {
                return Arc::clone(bonus);
            }
        }

        let parsed = Arc::new(extractor.extract(desc));
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(entries.entry(id.clone()).or_insert(parsed))
    }

    pub fn invalidate(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        tracing::debug!("Clearing {} cached skill bonuses", entries.len());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
