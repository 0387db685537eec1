//! Boss-encounter phase inference from screen-read chat lines.
//!
//! The game exposes no API; everything this crate knows arrives as OCR'd
//! chat text. Scripted boss lines are matched with confusion-tolerant
//! patterns, lifecycle lines anchor a monotonic phase state machine, and
//! detected mechanics drive countdown timers with status events and audio
//! cues.

pub mod audio;
pub mod boss;
pub mod lines;
pub mod matching;
pub mod session;
pub mod settings;
pub mod timers;
pub mod tracker;


// Re-exports for convenience
pub use audio::{CueEvent, CueScheduler, TonePlayer};
pub use boss::{BossConfig, BossRegistry, MechanicCategory, MechanicDefinition, Phase};
pub use lines::ChatLine;
pub use matching::{FuzzyMatcher, PatternError};
pub use session::TrackerSession;
pub use settings::{
    AudioSettings, BossSettings, GlobalSettings, NotificationConfig, SettingValue, Settings,
};
pub use timers::{ActiveTimer, TimerManager, TimerTemplate, TICK_MS};
pub use tracker::EncounterTracker;
