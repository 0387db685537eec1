//! Tracking session
//!
//! Wires an [`EncounterTracker`] to its three cadences: line ingest at the
//! configured tick rate, maintenance, and cue polling. Lines arrive on a
//! watch channel holding the latest full buffer; cues leave on an unbounded
//! channel, typically feeding a [`TonePlayer`](crate::audio::TonePlayer).

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::audio::CueEvent;
use crate::boss::BossConfig;
use crate::lines::ChatLine;
use crate::settings::Settings;
use crate::tracker::EncounterTracker;

const MAINTENANCE_INTERVAL: Duration = Duration::from_millis(100);
const CUE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A running tracking session for one boss.
pub struct TrackerSession {
    tracker: Arc<RwLock<EncounterTracker>>,
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl TrackerSession {
    /// Start the session loops.
    ///
    /// `lines_rx` must always hold the latest full line buffer; the ingest
    /// loop samples it rather than consuming deltas. Returns the session and
    /// the cue stream.
    pub fn spawn(
        config: Arc<BossConfig>,
        settings: Arc<Settings>,
        lines_rx: watch::Receiver<Vec<ChatLine>>,
    ) -> (Self, mpsc::UnboundedReceiver<CueEvent>) {
        let tracker = Arc::new(RwLock::new(EncounterTracker::new(config, &settings)));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (cue_tx, cue_rx) = mpsc::unbounded_channel();

        let handles = vec![
            tokio::spawn(ingest_loop(
                Arc::clone(&tracker),
                lines_rx,
                settings.global.tick_rate_ms,
                shutdown_rx.clone(),
            )),
            tokio::spawn(maintenance_loop(Arc::clone(&tracker), shutdown_rx.clone())),
            tokio::spawn(audio_loop(
                Arc::clone(&tracker),
                Arc::clone(&settings),
                cue_tx,
                shutdown_rx,
            )),
        ];

        (Self { tracker, shutdown_tx, handles }, cue_rx)
    }

    /// Shared handle to the tracker for state inspection.
    pub fn tracker(&self) -> Arc<RwLock<EncounterTracker>> {
        Arc::clone(&self.tracker)
    }

    /// Stop the loops and wait for them to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        for handle in self.handles {
            let _ = handle.await;
        }
        tracing::debug!("tracking session stopped");
    }
}

async fn ingest_loop(
    tracker: Arc<RwLock<EncounterTracker>>,
    lines_rx: watch::Receiver<Vec<ChatLine>>,
    tick_rate_ms: u64,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(Duration::from_millis(tick_rate_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let lines = lines_rx.borrow().clone();
                if lines.is_empty() {
                    continue;
                }
                tracker.write().await.ingest(&lines, Instant::now());
            }
            _ = shutdown_rx.changed() => break,
        }
    }
}

async fn maintenance_loop(
    tracker: Arc<RwLock<EncounterTracker>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                tracker.write().await.maintain(Instant::now());
            }
            _ = shutdown_rx.changed() => break,
        }
    }
}

async fn audio_loop(
    tracker: Arc<RwLock<EncounterTracker>>,
    settings: Arc<Settings>,
    cue_tx: mpsc::UnboundedSender<CueEvent>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(CUE_POLL_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let cues = tracker
                    .write()
                    .await
                    .poll_cues(&settings.global.audio, Instant::now());
                for cue in cues {
                    if cue_tx.send(cue).is_err() {
                        // Cue consumer is gone; keep tracking regardless.
                        return;
                    }
                }
            }
            _ = shutdown_rx.changed() => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::{BossRegistry, Phase};

    fn fast_settings(config: &BossConfig) -> Settings {
        let mut settings = Settings::defaults_for(config);
        settings.global.tick_rate_ms = 10;
        settings
    }

    // Timers run on the wall clock, so these tests use short real sleeps
    // rather than tokio's paused time.
    #[tokio::test(flavor = "multi_thread")]
    async fn session_tracks_lines_from_the_watch_channel() {
        let config = BossRegistry::load().unwrap().get_or_default("solak");
        let settings = Arc::new(fast_settings(&config));
        let (lines_tx, lines_rx) = watch::channel(Vec::new());

        let (session, _cues) = TrackerSession::spawn(config, settings, lines_rx);

        lines_tx
            .send(vec![ChatLine::new(
                "Welcome to your session against: Solak, Guardian of the Grove.",
            )])
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        {
            let tracker = session.tracker();
            let tracker = tracker.read().await;
            assert_eq!(tracker.phase(), Phase::Lobby);
            assert_eq!(tracker.status(), "Joined Instance");
        }

        session.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn maintenance_publishes_timer_status_events() {
        let config = BossRegistry::load().unwrap().get_or_default("solak");
        let settings = Arc::new(fast_settings(&config));
        let (lines_tx, lines_rx) = watch::channel(Vec::new());

        let (session, _cues) = TrackerSession::spawn(config, settings, lines_rx);

        lines_tx
            .send(vec![
                ChatLine::new("Merethiel! The betrayer! You'd lead these mortals against me?"),
                ChatLine::new("I will replenish the earth with your bones."),
            ])
            .unwrap();
        // Long enough for an ingest pass and a maintenance pass.
        tokio::time::sleep(Duration::from_millis(250)).await;

        {
            let tracker = session.tracker();
            let tracker = tracker.read().await;
            assert_eq!(tracker.phase(), Phase::Mechanic(2));
            assert_eq!(tracker.active_timers().len(), 1);
            assert_eq!(tracker.status(), "Phase 1");
        }

        session.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn shutdown_stops_all_loops() {
        let config = BossRegistry::load().unwrap().get_or_default("solak");
        let settings = Arc::new(fast_settings(&config));
        let (_lines_tx, lines_rx) = watch::channel(Vec::new());

        let (session, mut cues) = TrackerSession::spawn(config, settings, lines_rx);
        session.shutdown().await;

        // The audio loop dropped its sender.
        assert!(cues.recv().await.is_none());
    }
}
