//! Boss registry
//!
//! All supported encounters, keyed by id. Configurations are built once at
//! load time so matcher compilation errors surface before any line is
//! processed.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::boss::{solak, BossConfig};
use crate::matching::PatternError;

/// Encounter selected when the requested id is unknown.
pub const DEFAULT_BOSS_ID: &str = "solak";

#[derive(Debug, Clone)]
pub struct BossRegistry {
    bosses: HashMap<String, Arc<BossConfig>>,
}

impl BossRegistry {
    /// Build every known boss configuration.
    pub fn load() -> Result<Self, PatternError> {
        let mut bosses = HashMap::new();
        for config in [solak::config()?] {
            bosses.insert(config.id.clone(), Arc::new(config));
        }
        tracing::debug!(count = bosses.len(), "boss registry loaded");
        Ok(Self { bosses })
    }

    pub fn get(&self, id: &str) -> Option<Arc<BossConfig>> {
        self.bosses.get(id).cloned()
    }

    /// Look up a boss, falling back to [`DEFAULT_BOSS_ID`] for unknown ids.
    pub fn get_or_default(&self, id: &str) -> Arc<BossConfig> {
        self.get(id).unwrap_or_else(|| {
            tracing::warn!(boss = %id, "unknown boss id, using default");
            self.bosses[DEFAULT_BOSS_ID].clone()
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.bosses.keys().map(String::as_str)
    }
}
