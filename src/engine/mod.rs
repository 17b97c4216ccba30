//! Playback engine
//!
//! The engine drives one document's audio to completion on a fixed-period
//! polling loop. Each tick it reports position, then drains every pending
//! control command before it is allowed to decide the track is finished —
//! a `Stop` racing the end of the clip must always win, and a burst of
//! commands arriving between ticks is applied in arrival order.
//!
//! The engine exclusively owns the device and the one live session; the
//! controller reaches both only through the command channel.

use crate::device::Device;
use crate::protocol::{Command, ProgressEvent};
use crate::synth::AudioClip;
use crate::{LectorError, Result};
use log::{debug, warn};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Default polling period
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

/// How one document's playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The device played the clip to the end
    Ended,
    /// A `Stop` command cut the session short
    Stopped,
}

/// Mutable state of the currently playing document
///
/// Exactly one session is live at a time; it is created once synthesis has
/// produced a clip and destroyed when the playback loop exits.
struct PlaybackSession {
    clip: AudioClip,
    seek_offset_secs: f64,
    paused: bool,
}

impl PlaybackSession {
    fn new(clip: AudioClip) -> Self {
        Self {
            clip,
            seek_offset_secs: 0.0,
            paused: false,
        }
    }

    fn duration_secs(&self) -> f64 {
        self.clip.duration_secs()
    }
}

/// Result of draining the command channel
enum Drained {
    Continue,
    Stop,
}

/// Single-document playback loop over an injected device
pub struct PlaybackEngine {
    device: Box<dyn Device>,
    commands: Receiver<Command>,
    progress: Sender<ProgressEvent>,
    tick: Duration,
}

impl PlaybackEngine {
    pub fn new(
        device: Box<dyn Device>,
        commands: Receiver<Command>,
        progress: Sender<ProgressEvent>,
    ) -> Self {
        Self {
            device,
            commands,
            progress,
            tick: DEFAULT_TICK,
        }
    }

    /// Override the polling period (tests run on a faster clock)
    pub fn with_tick(self, tick: Duration) -> Self {
        Self { tick, ..self }
    }

    /// Play one clip to completion
    ///
    /// Returns when the device finishes the clip (`Ended`) or a `Stop`
    /// command arrives (`Stopped`). The device is stopped and unloaded on
    /// every exit path, and dropping the session's clip deletes the temp
    /// artifact.
    pub fn play(&mut self, clip: AudioClip) -> Result<Outcome> {
        self.device.load(&clip)?;
        self.device.play(0.0)?;

        let mut session = PlaybackSession::new(clip);
        debug!("Session started, duration {:.1}s", session.duration_secs());

        let outcome = self.run_session(&mut session);

        self.device.stop();
        self.device.unload();
        debug!("Session torn down");

        outcome
    }

    /// The fixed-tick polling loop
    fn run_session(&mut self, session: &mut PlaybackSession) -> Result<Outcome> {
        loop {
            let tick_start = Instant::now();

            // Position report first, frozen entirely while paused.
            if !session.paused {
                let elapsed =
                    session.seek_offset_secs + self.device.position_ms() as f64 / 1000.0;
                self.emit(ProgressEvent::Tick {
                    elapsed,
                    duration: session.duration_secs(),
                })?;
            }

            // Commands take priority over the completion check so a Stop
            // issued the instant the track ends is never lost.
            if let Drained::Stop = self.drain_commands(session)? {
                self.device.stop();
                self.emit(ProgressEvent::Log("Audio stopped.".to_string()))?;
                return Ok(Outcome::Stopped);
            }

            // Pausing suppresses end-of-track detection.
            if session.paused {
                thread::sleep(self.tick);
                continue;
            }

            if !self.device.is_busy() {
                self.emit(ProgressEvent::Ended)?;
                return Ok(Outcome::Ended);
            }

            let spent = tick_start.elapsed();
            if spent < self.tick {
                thread::sleep(self.tick - spent);
            }
        }
    }

    /// Apply every pending command in arrival order
    ///
    /// Returns `Drained::Stop` as soon as a `Stop` is seen; commands queued
    /// behind it are left untouched.
    fn drain_commands(&mut self, session: &mut PlaybackSession) -> Result<Drained> {
        loop {
            match self.commands.try_recv() {
                Ok(Command::Pause) => {
                    if !session.paused {
                        self.device.pause();
                        session.paused = true;
                        self.emit(ProgressEvent::Log("Audio paused.".to_string()))?;
                    }
                }
                Ok(Command::Resume) => {
                    if session.paused {
                        self.device.unpause();
                        session.paused = false;
                        self.emit(ProgressEvent::Log("Audio resumed.".to_string()))?;
                    }
                }
                Ok(Command::Stop) => return Ok(Drained::Stop),
                Ok(Command::SeekTo(seconds)) => self.apply_seek(session, seconds)?,
                Err(TryRecvError::Empty) => return Ok(Drained::Continue),
                Err(TryRecvError::Disconnected) => {
                    return Err(LectorError::Channel(
                        "command channel closed".to_string(),
                    ));
                }
            }
        }
    }

    /// Restart playback at an absolute position
    ///
    /// Seeking always resumes: the device starts a fresh run from the
    /// target, so a paused session comes back unpaused.
    fn apply_seek(&mut self, session: &mut PlaybackSession, seconds: f64) -> Result<()> {
        if !seconds.is_finite() || seconds < 0.0 {
            warn!("Ignoring invalid seek to {}", seconds);
            return Ok(());
        }

        let target = seconds.min(session.duration_secs());
        self.device.stop();
        self.device.play(target)?;
        session.seek_offset_secs = target;
        session.paused = false;
        debug!("Seeked to {:.1}s", target);
        Ok(())
    }

    fn emit(&self, event: ProgressEvent) -> Result<()> {
        self.progress
            .send(event)
            .map_err(|_| LectorError::Channel("progress channel closed".to_string()))
    }
}
