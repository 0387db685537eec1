//! Countdown audio cues
//!
//! This module provides:
//! - **Scheduler**: decides which beeps are due for the active timers
//! - **Player**: a dedicated output thread that renders cues with rodio
//!
//! The scheduler is pure bookkeeping over explicit `Instant`s; everything
//! device-related lives on the player thread.

mod player;

use std::time::Instant;

use hashbrown::HashMap;

use crate::boss::MechanicCategory;
use crate::settings::AudioSettings;
use crate::timers::ActiveTimer;

pub use player::TonePlayer;

/// One beep to render: a sine tone at `frequency` Hz, `volume` in 0-100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueEvent {
    pub frequency: f32,
    pub volume: f32,
}

/// Decides when each active timer gets a countdown beep.
///
/// A timer beeps once per remaining-tick value inside its beep window: the
/// final `lead_up_count` ticks before expiry plus the expiry tick itself,
/// never wider than the timer's visibility threshold. Polling cadence does
/// not matter; the per-timer history keeps a slow poller from missing the
/// dedup and a fast poller from doubling cues.
#[derive(Debug, Default)]
pub struct CueScheduler {
    /// Remaining-tick value each timer last beeped at.
    last_beep: HashMap<String, u32>,
}

impl CueScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the cues due right now for the given timers.
    pub fn poll(
        &mut self,
        timers: &[ActiveTimer],
        audio: &AudioSettings,
        now: Instant,
    ) -> Vec<CueEvent> {
        let mut cues = Vec::new();

        for timer in timers {
            if !timer.audio_enabled {
                continue;
            }

            let category = match timer.category {
                MechanicCategory::Tag => &audio.tags,
                MechanicCategory::Mechanic => &audio.mechanics,
            };

            let window = (category.lead_up_count + 1).min(timer.visibility_threshold);
            let remaining = timer.remaining_ticks(now);
            if remaining == 0 || remaining > window {
                continue;
            }
            if self.last_beep.get(&timer.id) == Some(&remaining) {
                continue;
            }

            let frequency = if remaining == 1 {
                category.action_frequency
            } else {
                category.lead_up_frequency
            };
            cues.push(CueEvent {
                frequency,
                volume: effective_volume(audio.master_volume, category.volume),
            });
            self.last_beep.insert(timer.id.clone(), remaining);
        }

        cues
    }

    /// Forget all beep history (join/start lifecycle resets).
    pub fn reset(&mut self) {
        self.last_beep.clear();
    }
}

fn effective_volume(master: u32, category: u32) -> f32 {
    ((master as f32) * (category as f32) / 100.0).clamp(0.0, 100.0)
}
