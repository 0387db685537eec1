//! Active timer instances (runtime state)
//!
//! An [`ActiveTimer`] is one running countdown created when a mechanic
//! fired. All time arithmetic is in fixed game ticks against a wall-clock
//! `Instant` supplied by the caller, so maintenance and tests drive time
//! explicitly.

use std::time::Instant;

use crate::boss::MechanicCategory;
use crate::timers::{ColorPhase, StatusEvent};

/// Fixed game-tick duration in milliseconds.
pub const TICK_MS: u64 = 600;

/// A currently running countdown timer.
#[derive(Debug, Clone)]
pub struct ActiveTimer {
    /// Template id this timer came from. At most one active timer per id.
    pub id: String,

    /// Display label (cached from the template).
    pub label: String,

    /// Cue category of the owning mechanic.
    pub category: MechanicCategory,

    /// When the mechanic fired.
    pub started_at: Instant,

    /// Total lifetime in game ticks.
    pub total_ticks: u32,

    /// Color ramp (cached from the template).
    pub color_phases: Vec<ColorPhase>,

    /// Remaining-tick threshold below which the timer is surfaced visually;
    /// also caps the beep window.
    pub visibility_threshold: u32,

    pub visual_enabled: bool,
    pub audio_enabled: bool,

    /// Resolved status events, ordered by tick.
    pub status_events: Vec<StatusEvent>,
}

impl ActiveTimer {
    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started_at).as_millis() as u64
    }

    pub fn total_ms(&self) -> u64 {
        u64::from(self.total_ticks) * TICK_MS
    }

    /// Whole ticks elapsed since start (floor).
    pub fn elapsed_ticks(&self, now: Instant) -> u32 {
        (self.elapsed_ms(now) / TICK_MS) as u32
    }

    /// Ticks left until expiry (ceiling; 0 once expired).
    pub fn remaining_ticks(&self, now: Instant) -> u32 {
        self.total_ms()
            .saturating_sub(self.elapsed_ms(now))
            .div_ceil(TICK_MS) as u32
    }

    /// A timer lives for exactly `total_ticks * 600` ms.
    pub fn has_expired(&self, now: Instant) -> bool {
        self.elapsed_ms(now) >= self.total_ms()
    }

    /// Whether a visual consumer should render this timer right now.
    pub fn is_visible(&self, now: Instant) -> bool {
        self.visual_enabled && self.remaining_ticks(now) <= self.visibility_threshold
    }

    /// Color for the current remaining-tick count: the ramp stop with the
    /// smallest threshold that still covers it.
    pub fn current_color(&self, now: Instant) -> Option<&str> {
        let remaining = self.remaining_ticks(now);
        self.color_phases
            .iter()
            .filter(|phase| phase.remaining >= remaining)
            .min_by_key(|phase| phase.remaining)
            .or_else(|| self.color_phases.first())
            .map(|phase| phase.color.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn timer(total_ticks: u32) -> (ActiveTimer, Instant) {
        let start = Instant::now();
        let timer = ActiveTimer {
            id: "t".into(),
            label: "T".into(),
            category: MechanicCategory::Tag,
            started_at: start,
            total_ticks,
            color_phases: vec![
                ColorPhase { remaining: 999, color: "#29d8e6".into() },
                ColorPhase { remaining: 1, color: "#4ade80".into() },
            ],
            visibility_threshold: 10,
            visual_enabled: true,
            audio_enabled: true,
            status_events: Vec::new(),
        };
        (timer, start)
    }

    #[test]
    fn expiry_is_exact_at_the_tick_boundary() {
        let (timer, start) = timer(5);
        assert!(!timer.has_expired(start + Duration::from_millis(5 * 600 - 1)));
        assert!(timer.has_expired(start + Duration::from_millis(5 * 600)));
    }

    #[test]
    fn remaining_ticks_step_down_every_600ms() {
        let (timer, start) = timer(5);
        assert_eq!(timer.remaining_ticks(start), 5);
        assert_eq!(timer.remaining_ticks(start + Duration::from_millis(599)), 5);
        assert_eq!(timer.remaining_ticks(start + Duration::from_millis(600)), 4);
        assert_eq!(timer.remaining_ticks(start + Duration::from_millis(2999)), 1);
        assert_eq!(timer.remaining_ticks(start + Duration::from_millis(3000)), 0);
    }

    #[test]
    fn elapsed_ticks_floor() {
        let (timer, start) = timer(5);
        assert_eq!(timer.elapsed_ticks(start), 0);
        assert_eq!(timer.elapsed_ticks(start + Duration::from_millis(599)), 0);
        assert_eq!(timer.elapsed_ticks(start + Duration::from_millis(600)), 1);
    }

    #[test]
    fn visibility_follows_the_threshold() {
        let (mut timer, start) = timer(20);
        // 20 ticks remaining, threshold 10: hidden until half way through.
        assert!(!timer.is_visible(start));
        assert!(timer.is_visible(start + Duration::from_millis(10 * 600)));

        timer.visual_enabled = false;
        assert!(!timer.is_visible(start + Duration::from_millis(10 * 600)));
    }

    #[test]
    fn color_ramp_tightens_near_expiry() {
        let (timer, start) = timer(5);
        assert_eq!(timer.current_color(start), Some("#29d8e6"));
        assert_eq!(
            timer.current_color(start + Duration::from_millis(4 * 600)),
            Some("#4ade80")
        );
    }
}
