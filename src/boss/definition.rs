//! Boss configuration model
//!
//! A [`BossConfig`] describes one scripted encounter: the lifecycle lines
//! that bound an attempt, the ordered mechanic list with its compiled
//! matchers and timer templates, and the schema for the boss-specific
//! settings an embedding UI can expose.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::matching::FuzzyMatcher;
use crate::settings::{NotificationConfig, SettingValue};
use crate::timers::TimerTemplate;

/// Which cue/volume configuration a mechanic's timers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MechanicCategory {
    /// Informational phase tags.
    Tag,
    /// Mechanics the player must act on.
    Mechanic,
}

/// Compiled matchers for the three encounter-lifecycle lines.
#[derive(Debug, Clone)]
pub struct LifecycleMatchers {
    pub join: FuzzyMatcher,
    pub start: FuzzyMatcher,
    pub end: FuzzyMatcher,
}

/// One detectable mechanic within an encounter.
#[derive(Debug, Clone)]
pub struct MechanicDefinition {
    /// Identifier, unique within the boss (keys the notification config).
    pub id: String,

    pub category: MechanicCategory,

    /// Rank in the phase order. Must be >= 2; the mechanic only fires while
    /// the current phase rank is strictly below this.
    pub phase: u8,

    /// Matcher for the scripted line announcing this mechanic.
    pub matcher: FuzzyMatcher,

    /// Timers to instantiate when the mechanic fires.
    pub timers: Vec<TimerTemplate>,

    /// Notification defaults applied when the user has not configured this
    /// mechanic yet.
    pub default_notification: NotificationConfig,
}

/// Full configuration for one boss encounter.
#[derive(Debug, Clone)]
pub struct BossConfig {
    pub id: String,
    pub name: String,

    pub lifecycle: LifecycleMatchers,

    /// Mechanics in detection order. Evaluation order matters: once an
    /// earlier match advances the phase, later mechanics at or below the new
    /// rank are skipped for the rest of the pass.
    pub mechanics: Vec<MechanicDefinition>,

    /// Schema for the boss-specific settings UI.
    pub custom_settings: Vec<CustomSetting>,

    /// Default values for the boss-specific settings map.
    pub default_specific: HashMap<String, SettingValue>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Custom Setting Schema
// ═══════════════════════════════════════════════════════════════════════════

/// Control type for a boss-specific setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    Select,
    Number,
    Checkbox,
}

/// One option of a select-type setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingOption {
    pub label: String,
    pub value: SettingValue,
}

/// Schema entry for one boss-specific setting.
///
/// Rendering is the embedding application's concern; this core only carries
/// the schema alongside the defaults so both stay in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomSetting {
    pub key: String,
    pub kind: SettingKind,
    pub label: String,
    pub default: SettingValue,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SettingOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,

    /// Small helper text shown below the setting row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tooltip text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}
