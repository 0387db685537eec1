//! Settings snapshot model
//!
//! Settings are supplied by the embedding application and treated as
//! read-only snapshots here: a timer keeps the duration computed from the
//! settings in force when it was created. Persistence and validation are the
//! embedder's concern; everything derives serde so it can round-trip through
//! whatever store the embedder uses.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::boss::BossConfig;

/// A boss-specific setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl SettingValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        SettingValue::Int(n)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

/// Per-mechanic notification configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Surface the timer to the visual consumer.
    pub visual: bool,

    /// Play countdown cues for the timer.
    pub audio: bool,

    /// Remaining-tick threshold at which the timer becomes visible; also
    /// caps the beep window.
    pub duration: u32,
}

/// Cue configuration for one timer category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioCategoryConfig {
    /// Category volume, 0-100.
    #[serde(default = "default_category_volume")]
    pub volume: u32,

    /// Tone frequency for lead-up ticks, Hz.
    #[serde(default = "default_lead_up_frequency")]
    pub lead_up_frequency: f32,

    /// Tone frequency for the final "act now" tick, Hz.
    #[serde(default = "default_action_frequency")]
    pub action_frequency: f32,

    /// How many ticks before the final one get a lead-up cue.
    #[serde(default = "default_lead_up_count")]
    pub lead_up_count: u32,
}

impl Default for AudioCategoryConfig {
    fn default() -> Self {
        Self {
            volume: default_category_volume(),
            lead_up_frequency: default_lead_up_frequency(),
            action_frequency: default_action_frequency(),
            lead_up_count: default_lead_up_count(),
        }
    }
}

/// Global audio configuration. Tag and mechanic timers carry independent
/// frequency, volume and lead-up settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    #[serde(default = "default_master_volume")]
    pub master_volume: u32,

    #[serde(default)]
    pub tags: AudioCategoryConfig,

    #[serde(default)]
    pub mechanics: AudioCategoryConfig,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: default_master_volume(),
            tags: AudioCategoryConfig::default(),
            mechanics: AudioCategoryConfig::default(),
        }
    }
}

/// How the visual consumer labels timer magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerUnits {
    #[default]
    Seconds,
    Ticks,
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Line-ingest cadence in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default)]
    pub timer_units: TimerUnits,

    #[serde(default)]
    pub audio: AudioSettings,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            timer_units: TimerUnits::default(),
            audio: AudioSettings::default(),
        }
    }
}

/// Per-boss settings: specific parameter values plus the notification
/// config per mechanic id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BossSettings {
    #[serde(default)]
    pub specific: HashMap<String, SettingValue>,

    #[serde(default)]
    pub notifications: HashMap<String, NotificationConfig>,
}

/// The full settings snapshot handed to this core.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub global: GlobalSettings,

    #[serde(default)]
    pub bosses: HashMap<String, BossSettings>,

    #[serde(default)]
    pub active_boss: String,
}

impl Settings {
    /// Settings for one boss, if the user has any.
    pub fn boss(&self, boss_id: &str) -> Option<&BossSettings> {
        self.bosses.get(boss_id)
    }

    /// Default settings for a single boss configuration.
    pub fn defaults_for(config: &BossConfig) -> Self {
        let mut bosses = HashMap::new();
        bosses.insert(config.id.clone(), extract_defaults(config));
        Self {
            global: GlobalSettings::default(),
            bosses,
            active_boss: config.id.clone(),
        }
    }
}

/// Lift the per-mechanic notification defaults out of a boss configuration.
///
/// Every mechanic carries its own defaults; collecting them here means a
/// mechanic that fires always has a notification config even before the user
/// has touched the settings UI.
pub fn extract_defaults(config: &BossConfig) -> BossSettings {
    let notifications = config
        .mechanics
        .iter()
        .map(|mech| (mech.id.clone(), mech.default_notification))
        .collect();

    BossSettings {
        specific: config.default_specific.clone(),
        notifications,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Serde Defaults
// ═══════════════════════════════════════════════════════════════════════════

fn default_tick_rate_ms() -> u64 {
    50
}

fn default_master_volume() -> u32 {
    50
}

fn default_category_volume() -> u32 {
    100
}

fn default_lead_up_frequency() -> f32 {
    440.0
}

fn default_action_frequency() -> f32 {
    880.0
}

fn default_lead_up_count() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::registry::BossRegistry;

    #[test]
    fn defaults_cover_every_mechanic() {
        let registry = BossRegistry::load().unwrap();
        let config = registry.get_or_default("solak");
        let defaults = extract_defaults(&config);

        for mech in &config.mechanics {
            assert!(
                defaults.notifications.contains_key(&mech.id),
                "mechanic {} missing notification defaults",
                mech.id
            );
        }
        assert_eq!(
            defaults.specific.get("p1_strategy").and_then(|v| v.as_str()),
            Some("rootling")
        );
    }

    #[test]
    fn specific_map_feeds_template_resolution_directly() {
        let registry = BossRegistry::load().unwrap();
        let config = registry.get_or_default("solak");
        let defaults = extract_defaults(&config);

        // The tracker hands this exact map to every duration rule; the two
        // sides must agree on the map type.
        for mech in &config.mechanics {
            for template in &mech.timers {
                assert!(template.resolve(&defaults.specific).is_ok());
            }
        }
    }

    #[test]
    fn global_defaults_are_usable() {
        let global = GlobalSettings::default();
        assert_eq!(global.tick_rate_ms, 50);
        assert_eq!(global.audio.master_volume, 50);
        assert_eq!(global.audio.tags.lead_up_count, 3);
        assert!((global.audio.mechanics.action_frequency - 880.0).abs() < f32::EPSILON);
    }
}
