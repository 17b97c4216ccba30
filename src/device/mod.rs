//! Audio output devices
//!
//! The engine never touches an audio subsystem directly; it drives one
//! `Device` bound to at most one clip at a time. Devices are created on the
//! playback thread and stay there — the real backend's output stream is not
//! `Send`.

pub mod mock;
pub mod rodio;

use crate::synth::AudioClip;
use crate::Result;
use log::info;
use std::time::{Duration, Instant};

/// Playback device primitives the engine depends on
///
/// All calls are synchronous and fast; none may block anywhere near a tick.
pub trait Device {
    /// Bind a clip to the device
    fn load(&mut self, clip: &AudioClip) -> Result<()>;

    /// Start playing the loaded clip from an offset in seconds
    fn play(&mut self, from_secs: f64) -> Result<()>;

    /// Suspend output; `position_ms` freezes until `unpause`
    fn pause(&mut self);

    /// Resume output after a pause
    fn unpause(&mut self);

    /// Halt output and discard the playing source
    fn stop(&mut self);

    /// Release the bound clip
    fn unload(&mut self);

    /// True while the clip still has audio to play (paused counts as busy)
    fn is_busy(&self) -> bool;

    /// Milliseconds actually played since the last `play` call,
    /// excluding paused time
    fn position_ms(&self) -> i64;
}

/// Create the real audio output device
pub fn create_device() -> Result<Box<dyn Device>> {
    info!("Opening default audio output");
    let device = rodio::RodioDevice::new()?;
    Ok(Box::new(device))
}

/// Pause-aware playback clock
///
/// Counts wall time from `start`, excluding the spans between `pause` and
/// `resume`. Backends use it to report position the way the engine expects.
#[derive(Debug, Default)]
pub(crate) struct PlaybackClock {
    started: Option<Instant>,
    accumulated: Duration,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the clock from zero
    pub fn start(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started = Some(Instant::now());
    }

    /// Freeze the clock
    pub fn pause(&mut self) {
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
    }

    /// Unfreeze the clock (no-op while running)
    pub fn resume(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// Stop and reset to zero
    pub fn stop(&mut self) {
        self.started = None;
        self.accumulated = Duration::ZERO;
    }

    /// Time accumulated while running
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => self.accumulated + started.elapsed(),
            None => self.accumulated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_counts_while_running() {
        let mut clock = PlaybackClock::new();
        clock.start();
        thread::sleep(Duration::from_millis(30));
        assert!(clock.elapsed() >= Duration::from_millis(25));
    }

    #[test]
    fn test_clock_freezes_on_pause() {
        let mut clock = PlaybackClock::new();
        clock.start();
        thread::sleep(Duration::from_millis(20));
        clock.pause();
        let frozen = clock.elapsed();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(clock.elapsed(), frozen);

        clock.resume();
        thread::sleep(Duration::from_millis(20));
        assert!(clock.elapsed() > frozen);
    }

    #[test]
    fn test_clock_stop_resets() {
        let mut clock = PlaybackClock::new();
        clock.start();
        thread::sleep(Duration::from_millis(10));
        clock.stop();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }
}
