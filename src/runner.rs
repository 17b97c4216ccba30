//! Playlist runner
//!
//! Sequences the engine across a playlist: synthesize one document, play it
//! to completion, wait the inter-document gap, move on. A `Stop` only ends
//! the current document — the runner proceeds to the next one regardless of
//! how the previous run came out.

use crate::engine::PlaybackEngine;
use crate::playlist::Document;
use crate::protocol::ProgressEvent;
use crate::synth::Synthesizer;
use crate::{LectorError, Result};
use log::{debug, warn};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

/// Drives the engine through a playlist, one document at a time
pub struct PlaylistRunner {
    engine: PlaybackEngine,
    synth: Box<dyn Synthesizer>,
    progress: Sender<ProgressEvent>,
    gap: Duration,
}

impl PlaylistRunner {
    pub fn new(
        engine: PlaybackEngine,
        synth: Box<dyn Synthesizer>,
        progress: Sender<ProgressEvent>,
        gap: Duration,
    ) -> Self {
        Self {
            engine,
            synth,
            progress,
            gap,
        }
    }

    /// Read the whole playlist aloud
    ///
    /// Synthesis and device failures are fatal to their document only: the
    /// error is reported on the progress channel and the runner moves on.
    /// A dead channel aborts the run. `WorkflowDone` is emitted exactly
    /// once, after the last document.
    pub fn run(&mut self, playlist: &[Document], voice: &str) -> Result<()> {
        for document in playlist {
            self.log(format!("Playing: {}", document.title))?;

            let clip = match self.synth.synthesize(&document.spoken_text(), voice) {
                Ok(clip) => clip,
                Err(e) => {
                    warn!("Synthesis failed for {:?}: {}", document.title, e);
                    self.log(format!("Skipping {}: {}", document.title, e))?;
                    continue;
                }
            };

            match self.engine.play(clip) {
                Ok(outcome) => debug!("Document finished: {:?}", outcome),
                Err(e @ LectorError::Channel(_)) => return Err(e),
                Err(e) => {
                    warn!("Playback failed for {:?}: {}", document.title, e);
                    self.log(format!("Playback failed for {}: {}", document.title, e))?;
                }
            }

            thread::sleep(self.gap);
        }

        self.progress
            .send(ProgressEvent::WorkflowDone)
            .map_err(|_| LectorError::Channel("progress channel closed".to_string()))?;
        Ok(())
    }

    fn log(&self, message: String) -> Result<()> {
        self.progress
            .send(ProgressEvent::Log(message))
            .map_err(|_| LectorError::Channel("progress channel closed".to_string()))
    }
}
