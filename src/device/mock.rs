//! Simulated playback device
//!
//! Plays nothing and instead walks a pause-aware clock across the loaded
//! clip's duration. Used by the integration tests and by `--mock` runs on
//! machines without audio output. Timing behaves exactly like the real
//! device: position freezes while paused and never passes the clip end.

use crate::device::{Device, PlaybackClock};
use crate::synth::AudioClip;
use crate::Result;

/// Clock-driven stand-in for a real audio output
#[derive(Debug, Default)]
pub struct MockDevice {
    loaded: bool,
    clip_duration: f64,

    /// True between `play` and `stop`/`unload`
    active: bool,
    play_offset: f64,
    clock: PlaybackClock,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Device for MockDevice {
    fn load(&mut self, clip: &AudioClip) -> Result<()> {
        self.loaded = true;
        self.clip_duration = clip.duration_secs();
        self.active = false;
        self.play_offset = 0.0;
        self.clock.stop();
        Ok(())
    }

    fn play(&mut self, from_secs: f64) -> Result<()> {
        if !self.loaded {
            return Err(crate::LectorError::Device("no clip loaded".to_string()));
        }
        self.active = true;
        self.play_offset = from_secs;
        self.clock.start();
        Ok(())
    }

    fn pause(&mut self) {
        self.clock.pause();
    }

    fn unpause(&mut self) {
        self.clock.resume();
    }

    fn stop(&mut self) {
        self.active = false;
        self.clock.stop();
    }

    fn unload(&mut self) {
        self.loaded = false;
        self.clip_duration = 0.0;
        self.active = false;
        self.play_offset = 0.0;
        self.clock.stop();
    }

    fn is_busy(&self) -> bool {
        if !self.active {
            return false;
        }
        let remaining = (self.clip_duration - self.play_offset).max(0.0);
        self.clock.elapsed().as_secs_f64() < remaining
    }

    fn position_ms(&self) -> i64 {
        let remaining = (self.clip_duration - self.play_offset).max(0.0);
        let elapsed = self.clock.elapsed().as_secs_f64().min(remaining);
        (elapsed * 1000.0) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::thread;
    use std::time::Duration;

    fn clip(duration_secs: f64) -> AudioClip {
        AudioClip::from_path(PathBuf::from("mock.wav"), duration_secs)
    }

    #[test]
    fn test_busy_until_clip_ends() {
        let mut device = MockDevice::new();
        device.load(&clip(0.05)).unwrap();
        device.play(0.0).unwrap();
        assert!(device.is_busy());

        thread::sleep(Duration::from_millis(80));
        assert!(!device.is_busy());
    }

    #[test]
    fn test_position_freezes_while_paused() {
        let mut device = MockDevice::new();
        device.load(&clip(1.0)).unwrap();
        device.play(0.0).unwrap();
        thread::sleep(Duration::from_millis(30));

        device.pause();
        let frozen = device.position_ms();
        thread::sleep(Duration::from_millis(40));
        assert_eq!(device.position_ms(), frozen);
        // Pausing keeps the clip busy so playback can resume
        assert!(device.is_busy());
    }

    #[test]
    fn test_play_from_offset_shortens_remaining() {
        let mut device = MockDevice::new();
        device.load(&clip(0.1)).unwrap();
        device.play(0.08).unwrap();
        thread::sleep(Duration::from_millis(50));
        assert!(!device.is_busy());
        // Reported position is elapsed since play, capped at the remainder
        assert!(device.position_ms() <= 20);
    }

    #[test]
    fn test_play_without_load_fails() {
        let mut device = MockDevice::new();
        assert!(device.play(0.0).is_err());
    }

    #[test]
    fn test_stop_clears_busy() {
        let mut device = MockDevice::new();
        device.load(&clip(1.0)).unwrap();
        device.play(0.0).unwrap();
        device.stop();
        assert!(!device.is_busy());
        assert_eq!(device.position_ms(), 0);
    }
}
