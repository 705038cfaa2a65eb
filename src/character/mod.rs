//! Character state: stats, owned skills, equipment and the persisted record

pub mod equipment;
pub mod record;
pub mod stats;
pub mod store;
pub mod unlocked;

pub use equipment::{Equipment, Weapon, WeaponCategory};
pub use record::{CharacterRecord, Purse};
pub use stats::StatBlock;
pub use store::{CharacterStore, MemoryStore};
pub use unlocked::{UnlockedCategory, UnlockedSkills};
