//! Boss encounter model
//!
//! This module provides:
//! - **Phase**: the monotonic encounter-progress order
//! - **Definitions**: boss configuration, mechanics and setting schemas
//! - **Registry**: all supported encounters, keyed by id
//! - **Solak**: the first configured encounter

mod definition;
mod phase;
pub mod registry;
pub mod solak;

pub use definition::{
    BossConfig, CustomSetting, LifecycleMatchers, MechanicCategory, MechanicDefinition,
    SettingKind, SettingOption,
};
pub use phase::Phase;
pub use registry::{BossRegistry, DEFAULT_BOSS_ID};
