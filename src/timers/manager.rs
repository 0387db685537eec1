//! Timer lifecycle management
//!
//! The manager owns the set of currently active timers. Creation is
//! deduplicated by template id, expiry removes a timer exactly at
//! `total_ticks * 600` ms, and status events fire once per `(timer, tick)`
//! pair no matter how often a maintenance pass observes the same tick.

use std::time::Instant;

use hashbrown::HashSet;

use super::ActiveTimer;

#[derive(Debug, Default)]
pub struct TimerManager {
    active: Vec<ActiveTimer>,

    /// `(timer id, tick)` pairs whose status event already fired. Entries
    /// for retired timers are orphaned and ignored; ids are not reused
    /// within an attempt.
    processed_events: HashSet<(String, u32)>,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[ActiveTimer] {
        &self.active
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|t| t.id == id)
    }

    /// Add a timer unless one with the same id is already running.
    ///
    /// Returns `false` on the duplicate no-op; the original timer's start
    /// time is untouched.
    pub fn spawn(&mut self, timer: ActiveTimer) -> bool {
        if self.is_active(&timer.id) {
            tracing::debug!(timer = %timer.id, "timer already active, ignoring request");
            return false;
        }
        tracing::debug!(timer = %timer.id, ticks = timer.total_ticks, "timer started");
        self.active.push(timer);
        true
    }

    /// Fire any status events whose tick the clock has reached.
    ///
    /// Returns the text to publish as the current status, if any event fired
    /// this pass. Later timers in the active list win when several fire at
    /// once, matching their creation order.
    pub fn process_status_events(&mut self, now: Instant) -> Option<String> {
        let mut status = None;

        for timer in &self.active {
            let current_tick = timer.elapsed_ticks(now);
            for event in &timer.status_events {
                if event.tick != current_tick {
                    continue;
                }
                let key = (timer.id.clone(), event.tick);
                if self.processed_events.insert(key) {
                    status = Some(event.text.clone());
                }
            }
        }

        status
    }

    /// Drop timers that have lived out their full tick count.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        self.active.retain(|t| !t.has_expired(now));
        before - self.active.len()
    }

    /// Clear active timers only (kill-ended lifecycle event).
    pub fn clear_active(&mut self) {
        self.active.clear();
    }

    /// Clear active timers and the processed-event record (join/start
    /// lifecycle resets).
    pub fn reset(&mut self) {
        self.active.clear();
        self.processed_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::MechanicCategory;
    use crate::timers::StatusEvent;
    use std::time::Duration;

    fn make_timer(id: &str, total_ticks: u32, started_at: Instant) -> ActiveTimer {
        ActiveTimer {
            id: id.into(),
            label: id.into(),
            category: MechanicCategory::Mechanic,
            started_at,
            total_ticks,
            color_phases: Vec::new(),
            visibility_threshold: total_ticks,
            visual_enabled: true,
            audio_enabled: true,
            status_events: vec![
                StatusEvent { tick: 0, text: "begin".into() },
                StatusEvent { tick: total_ticks, text: "end".into() },
            ],
        }
    }

    #[test]
    fn duplicate_spawn_is_a_noop() {
        let start = Instant::now();
        let mut manager = TimerManager::new();

        assert!(manager.spawn(make_timer("t", 5, start)));
        let later = start + Duration::from_millis(300);
        assert!(!manager.spawn(make_timer("t", 5, later)));

        assert_eq!(manager.active().len(), 1);
        assert_eq!(manager.active()[0].started_at, start);
    }

    #[test]
    fn sweep_removes_exactly_at_expiry() {
        let start = Instant::now();
        let mut manager = TimerManager::new();
        manager.spawn(make_timer("t", 5, start));

        assert_eq!(manager.sweep_expired(start + Duration::from_millis(5 * 600 - 1)), 0);
        assert_eq!(manager.active().len(), 1);

        assert_eq!(manager.sweep_expired(start + Duration::from_millis(5 * 600)), 1);
        assert!(manager.active().is_empty());
    }

    #[test]
    fn status_events_fire_once_per_tick() {
        let start = Instant::now();
        let mut manager = TimerManager::new();
        manager.spawn(make_timer("t", 5, start));

        // Two maintenance passes inside tick 0: one update only.
        assert_eq!(manager.process_status_events(start), Some("begin".into()));
        assert_eq!(
            manager.process_status_events(start + Duration::from_millis(100)),
            None
        );
    }

    #[test]
    fn at_expiry_event_lands_before_the_sweep() {
        let start = Instant::now();
        let mut manager = TimerManager::new();
        manager.spawn(make_timer("t", 5, start));
        manager.process_status_events(start);

        // Same maintenance pass: events first, then the sweep.
        let now = start + Duration::from_millis(5 * 600);
        assert_eq!(manager.process_status_events(now), Some("end".into()));
        assert_eq!(manager.sweep_expired(now), 1);
    }

    #[test]
    fn reset_allows_events_to_fire_again() {
        let start = Instant::now();
        let mut manager = TimerManager::new();
        manager.spawn(make_timer("t", 5, start));
        assert_eq!(manager.process_status_events(start), Some("begin".into()));

        manager.reset();
        manager.spawn(make_timer("t", 5, start));
        assert_eq!(manager.process_status_events(start), Some("begin".into()));
    }

    #[test]
    fn clear_active_keeps_the_processed_record() {
        let start = Instant::now();
        let mut manager = TimerManager::new();
        manager.spawn(make_timer("t", 5, start));
        assert_eq!(manager.process_status_events(start), Some("begin".into()));

        manager.clear_active();
        assert!(manager.active().is_empty());

        // Same attempt: the already-processed pair stays deduplicated.
        manager.spawn(make_timer("t", 5, start));
        assert_eq!(manager.process_status_events(start), None);
    }
}
