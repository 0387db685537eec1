//! Encounter tracker
//!
//! The tracker is the single place lifecycle anchors, the phase order,
//! timers and cues come together. It is driven by three explicit calls so
//! the caller (the session loops, or a test) controls both cadence and the
//! clock:
//!
//! - [`EncounterTracker::ingest`]: evaluate a fresh line buffer
//! - [`EncounterTracker::maintain`]: fire status events and expire timers
//! - [`EncounterTracker::poll_cues`]: collect due countdown beeps

use std::sync::Arc;
use std::time::Instant;

use hashbrown::HashMap;

use crate::audio::{CueEvent, CueScheduler};
use crate::boss::{BossConfig, MechanicDefinition, Phase};
use crate::lines::{context_window, ChatLine};
use crate::settings::{
    extract_defaults, AudioSettings, NotificationConfig, Settings, SettingValue,
};
use crate::timers::{ActiveTimer, TimerManager};

const STATUS_READY: &str = "Ready";
const STATUS_JOINED: &str = "Joined Instance";
const STATUS_STARTED: &str = "Phase 1";
const STATUS_ENDED: &str = "Kill Ended";

/// Which lifecycle line a buffer scan anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorKind {
    Join,
    Start,
    End,
}

/// Inference state for one boss encounter.
pub struct EncounterTracker {
    config: Arc<BossConfig>,

    /// Boss-specific parameter values in force for this tracker.
    specific: HashMap<String, SettingValue>,

    /// Notification config per mechanic id.
    notifications: HashMap<String, NotificationConfig>,

    phase: Phase,
    status: String,
    timers: TimerManager,
    scheduler: CueScheduler,
}

impl EncounterTracker {
    pub fn new(config: Arc<BossConfig>, settings: &Settings) -> Self {
        let boss_settings = settings
            .boss(&config.id)
            .cloned()
            .unwrap_or_else(|| extract_defaults(&config));

        Self {
            config,
            specific: boss_settings.specific,
            notifications: boss_settings.notifications,
            phase: Phase::Ready,
            status: STATUS_READY.to_string(),
            timers: TimerManager::new(),
            scheduler: CueScheduler::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn active_timers(&self) -> &[ActiveTimer] {
        self.timers.active()
    }

    /// Evaluate a full line buffer: resolve the most recent lifecycle
    /// anchor, apply its transition, then scan the lines after it for
    /// mechanics.
    pub fn ingest(&mut self, lines: &[ChatLine], now: Instant) {
        let anchor = self.resolve_anchor(lines);

        let scan_from = match anchor {
            Some((index, kind)) => {
                self.apply_anchor(kind);
                index + 1
            }
            None => 0,
        };

        self.scan_mechanics(lines, scan_from, now);
    }

    /// Fire due status events, then drop expired timers. Event processing
    /// runs first so an at-expiry event lands in the same pass that retires
    /// its timer.
    pub fn maintain(&mut self, now: Instant) {
        if let Some(text) = self.timers.process_status_events(now) {
            tracing::debug!(status = %text, "status updated");
            self.status = text;
        }
        self.timers.sweep_expired(now);
    }

    /// Collect the countdown beeps due right now.
    pub fn poll_cues(&mut self, audio: &AudioSettings, now: Instant) -> Vec<CueEvent> {
        self.scheduler.poll(self.timers.active(), audio, now)
    }

    /// Find the most recent lifecycle line in the buffer.
    ///
    /// Lines are scanned newest-first; within one line, join outranks start
    /// outranks end, so a reconnect line glued to stale fight text resolves
    /// as the reconnect.
    fn resolve_anchor(&self, lines: &[ChatLine]) -> Option<(usize, AnchorKind)> {
        for (index, line) in lines.iter().enumerate().rev() {
            let kind = if self.config.lifecycle.join.matches(&line.text) {
                AnchorKind::Join
            } else if self.config.lifecycle.start.matches(&line.text) {
                AnchorKind::Start
            } else if self.config.lifecycle.end.matches(&line.text) {
                AnchorKind::End
            } else {
                continue;
            };
            return Some((index, kind));
        }
        None
    }

    fn apply_anchor(&mut self, kind: AnchorKind) {
        match kind {
            AnchorKind::Join => {
                if self.phase != Phase::Lobby {
                    tracing::info!(boss = %self.config.id, "joined instance");
                    self.phase = Phase::Lobby;
                    self.status = STATUS_JOINED.to_string();
                    self.timers.reset();
                    self.scheduler.reset();
                }
            }
            AnchorKind::Start => {
                let can_start = matches!(self.phase, Phase::Ready | Phase::Lobby | Phase::Dead);
                if can_start {
                    tracing::info!(boss = %self.config.id, "fight started");
                    self.phase = Phase::Start;
                    self.status = STATUS_STARTED.to_string();
                    self.timers.reset();
                    self.scheduler.reset();
                }
            }
            AnchorKind::End => {
                if !self.phase.is_terminal() {
                    tracing::info!(boss = %self.config.id, "fight ended");
                    self.phase = Phase::Dead;
                    self.status = STATUS_ENDED.to_string();
                    // Processed-event history survives so a re-scan of the
                    // same buffer cannot replay old status lines.
                    self.timers.clear_active();
                }
            }
        }
    }

    /// Scan lines at and after `from` for mechanic announcements.
    ///
    /// Each line is widened to a three-line context window before matching.
    /// Mechanics are tried in declaration order and only fire while the
    /// current phase is strictly before theirs, so a stale buffer can never
    /// move the phase backwards.
    fn scan_mechanics(&mut self, lines: &[ChatLine], from: usize, now: Instant) {
        let config = Arc::clone(&self.config);

        for index in from..lines.len() {
            let window = context_window(lines, index);
            if window.is_empty() {
                continue;
            }

            for mech in &config.mechanics {
                if !self.phase.is_before(mech.phase) {
                    continue;
                }
                if !mech.matcher.matches(&window) {
                    continue;
                }

                tracing::info!(mechanic = %mech.id, rank = mech.phase, "mechanic detected");
                self.phase = Phase::Mechanic(mech.phase);
                self.request_timers(mech, now);
            }
        }
    }

    /// Instantiate a mechanic's timers.
    ///
    /// A mechanic with no notification config is dropped whole; a template
    /// that fails to resolve against the current settings is skipped on its
    /// own while the mechanic's other timers still start.
    fn request_timers(&mut self, mech: &MechanicDefinition, now: Instant) {
        let Some(notification) = self.notifications.get(&mech.id).copied() else {
            tracing::warn!(mechanic = %mech.id, "no notification config, dropping timers");
            return;
        };

        for template in &mech.timers {
            let (total_ticks, status_events) = match template.resolve(&self.specific) {
                Ok(resolved) => resolved,
                Err(err) => {
                    tracing::warn!(timer = %template.id, error = %err, "skipping timer");
                    continue;
                }
            };

            self.timers.spawn(ActiveTimer {
                id: template.id.clone(),
                label: template.label.clone(),
                category: mech.category,
                started_at: now,
                total_ticks,
                color_phases: template.color_phases.clone(),
                visibility_threshold: notification.duration,
                visual_enabled: notification.visual,
                audio_enabled: notification.audio,
                status_events,
            });
        }
    }
}
