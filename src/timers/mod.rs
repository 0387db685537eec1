//! Timer system
//!
//! This module provides:
//! - **Templates**: static per-mechanic timer descriptions with
//!   settings-driven duration and status-event rules
//! - **Active instances**: runtime state of currently running countdowns
//! - **Manager**: creation dedup, status-event firing and expiry

mod active;
mod error;
mod manager;
mod template;

pub use active::{ActiveTimer, TICK_MS};
pub use error::TimerError;
pub use manager::TimerManager;
pub use template::{
    ColorPhase, DurationRule, StatusEvent, StatusEventRule, TickRule, TimerTemplate,
};
