//! Error types for timer template evaluation

use thiserror::Error;

/// Errors while resolving a timer template against the boss-specific
/// settings. These abort the one template's creation request; other
/// templates on the same mechanic still proceed.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("setting `{key}` is missing")]
    MissingSetting { key: String },

    #[error("setting `{key}` has the wrong type")]
    WrongSettingType { key: String },

    #[error("timer `{id}` resolved to an invalid duration")]
    InvalidDuration { id: String },
}
