//! Tone output thread
//!
//! rodio's output stream is not `Send`, so the player owns it on a dedicated
//! OS thread and receives cues over a channel. Device failures are logged and
//! otherwise ignored; a missing sound card must never stall tracking.

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::OutputStream;
use tokio::sync::mpsc;

use super::CueEvent;

const TONE_DURATION: Duration = Duration::from_millis(150);

/// Amplitude at 100 volume. Raw sine waves at full amplitude are unpleasant.
const MAX_GAIN: f32 = 0.25;

pub struct TonePlayer;

impl TonePlayer {
    /// Spawn the output thread. It runs until the sending side closes.
    pub fn spawn(mut rx: mpsc::UnboundedReceiver<CueEvent>) -> std::thread::JoinHandle<()> {
        std::thread::Builder::new()
            .name("tone-player".into())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(err) => {
                        tracing::warn!(error = %err, "no audio output device, cues disabled");
                        // Keep draining so senders never block or error.
                        while rx.blocking_recv().is_some() {}
                        return;
                    }
                };

                while let Some(cue) = rx.blocking_recv() {
                    let gain = (cue.volume / 100.0).clamp(0.0, 1.0) * MAX_GAIN;
                    let source = SineWave::new(cue.frequency)
                        .take_duration(TONE_DURATION)
                        .amplify(gain);
                    if let Err(err) = handle.play_raw(source.convert_samples()) {
                        tracing::warn!(error = %err, "failed to play cue");
                    }
                }
            })
            .expect("spawning the tone player thread")
    }
}
