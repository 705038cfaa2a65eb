//! Character persistence seam
//!
//! The engine never saves on its own. Callers persist `Ledger::snapshot()`
//! through whatever store they use.

use ahash::AHashMap;

use crate::character::record::CharacterRecord;
use crate::core::types::CharacterId;

/// Load/save of character records keyed by id
pub trait CharacterStore {
    type Error: std::error::Error;

    fn load(&self, id: CharacterId) -> Result<Option<CharacterRecord>, Self::Error>;
    fn save(&mut self, record: &CharacterRecord) -> Result<(), Self::Error>;
    fn delete(&mut self, id: CharacterId) -> Result<bool, Self::Error>;
}

/// In-process store, mostly for tests and tooling
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: AHashMap<CharacterId, CharacterRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CharacterStore for MemoryStore {
    type Error = std::convert::Infallible;

    fn load(&self, id: CharacterId) -> Result<Option<CharacterRecord>, Self::Error> {
        Ok(self.records.get(&id).cloned())
    }

    fn save(&mut self, record: &CharacterRecord) -> Result<(), Self::Error> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    fn delete(&mut self, id: CharacterId) -> Result<bool, Self::Error> {
        Ok(self.records.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProgressionConfig;

    #[test]
    fn test_memory_store_roundtrip() {
        let config = ProgressionConfig::default();
        let record = CharacterRecord::new("Brannoc", 40, &config);
        let mut store = MemoryStore::new();

        store.save(&record).unwrap();
        assert_eq!(store.load(record.id).unwrap(), Some(record.clone()));
        assert!(store.delete(record.id).unwrap());
        assert_eq!(store.load(record.id).unwrap(), None);
    }
}
