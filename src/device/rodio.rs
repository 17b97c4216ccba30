//! rodio output backend
//!
//! Decodes the rendered WAV through a rodio sink on the default output
//! device. Seeking is done by rebuilding the sink with the source skipped
//! forward, which is why `play` takes an offset. Position is tracked with a
//! pause-aware clock; the engine adds the seek offset on top.

use crate::device::{Device, PlaybackClock};
use crate::synth::AudioClip;
use crate::{LectorError, Result};
use log::debug;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

/// Audio output device backed by rodio
pub struct RodioDevice {
    /// Keeps the output stream alive; dropping it silences the sink
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,

    /// Currently bound clip
    clip_path: Option<PathBuf>,
    clip_duration: f64,

    /// Offset the current `play` started from
    play_offset: f64,
    clock: PlaybackClock,
}

impl RodioDevice {
    /// Open the default audio output
    pub fn new() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| LectorError::Device(format!("Failed to open audio output: {}", e)))?;

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            clip_path: None,
            clip_duration: 0.0,
            play_offset: 0.0,
            clock: PlaybackClock::new(),
        })
    }

    fn drop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

impl Device for RodioDevice {
    fn load(&mut self, clip: &AudioClip) -> Result<()> {
        self.drop_sink();
        self.clock.stop();

        if !clip.path().exists() {
            return Err(LectorError::Device(format!(
                "clip file missing: {:?}",
                clip.path()
            )));
        }

        debug!("Loaded clip {:?} ({:.1}s)", clip.path(), clip.duration_secs());
        self.clip_path = Some(clip.path().to_path_buf());
        self.clip_duration = clip.duration_secs();
        self.play_offset = 0.0;
        Ok(())
    }

    fn play(&mut self, from_secs: f64) -> Result<()> {
        let path = self
            .clip_path
            .clone()
            .ok_or_else(|| LectorError::Device("no clip loaded".to_string()))?;

        self.drop_sink();

        let file = File::open(&path)
            .map_err(|e| LectorError::Device(format!("Failed to open clip: {}", e)))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| LectorError::Device(format!("Failed to decode clip: {}", e)))?;
        let sink = Sink::try_new(&self.handle)
            .map_err(|e| LectorError::Device(format!("Failed to create sink: {}", e)))?;

        if from_secs > 0.0 {
            sink.append(source.skip_duration(Duration::from_secs_f64(from_secs)));
        } else {
            sink.append(source);
        }

        self.sink = Some(sink);
        self.play_offset = from_secs;
        self.clock.start();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.clock.pause();
    }

    fn unpause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
        self.clock.resume();
    }

    fn stop(&mut self) {
        self.drop_sink();
        self.clock.stop();
    }

    fn unload(&mut self) {
        self.drop_sink();
        self.clock.stop();
        self.clip_path = None;
        self.clip_duration = 0.0;
        self.play_offset = 0.0;
    }

    fn is_busy(&self) -> bool {
        self.sink.as_ref().map(|s| !s.empty()).unwrap_or(false)
    }

    fn position_ms(&self) -> i64 {
        // The clip cannot have played further than its own remaining length.
        let remaining = (self.clip_duration - self.play_offset).max(0.0);
        let elapsed = self.clock.elapsed().as_secs_f64().min(remaining);
        (elapsed * 1000.0) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_device() {
        // May fail in CI or headless environments without audio
        match RodioDevice::new() {
            Ok(_) => println!("audio output available"),
            Err(e) => println!("audio output not available: {}", e),
        }
    }
}
