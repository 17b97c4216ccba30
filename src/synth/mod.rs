//! Speech synthesis system
//!
//! Turns document text into a playable audio artifact plus its duration.
//! Synthesis is a blocking one-shot call made once per document, before the
//! playback loop starts.

pub mod backends;

use crate::{LectorError, Result};
use log::info;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A synthesized audio artifact and its duration
///
/// Clips produced by a real backend own their temp file, so dropping the
/// clip after playback deletes the artifact. Tests build clips over bare
/// paths instead.
#[derive(Debug)]
pub struct AudioClip {
    storage: ClipStorage,
    duration_secs: f64,
}

#[derive(Debug)]
enum ClipStorage {
    Temp(NamedTempFile),
    Path(PathBuf),
}

impl AudioClip {
    /// Wrap a freshly rendered temp file; the file lives as long as the clip
    pub fn from_temp(file: NamedTempFile, duration_secs: f64) -> Self {
        Self {
            storage: ClipStorage::Temp(file),
            duration_secs,
        }
    }

    /// Wrap an existing file that the clip does not own
    pub fn from_path(path: PathBuf, duration_secs: f64) -> Self {
        Self {
            storage: ClipStorage::Path(path),
            duration_secs,
        }
    }

    pub fn path(&self) -> &Path {
        match &self.storage {
            ClipStorage::Temp(file) => file.path(),
            ClipStorage::Path(path) => path,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}

/// Speech synthesizer trait
///
/// Backends render text to a WAV artifact. Failure is fatal to the current
/// document only; the playlist runner decides what happens next.
pub trait Synthesizer: Send {
    /// Render text with the given voice into an audio clip
    fn synthesize(&mut self, text: &str, voice: &str) -> Result<AudioClip>;

    /// Set speech rate (0-100, where 50 is normal)
    fn set_rate(&mut self, rate: u8) -> Result<()>;
}

/// Create a platform-appropriate speech synthesizer
///
/// Probes backends in order:
/// 1. espeak-ng (broad voice coverage, fast rendering)
/// 2. flite (small fallback, limited voices)
///
/// Both render to WAV files, which the device backend can decode anywhere.
pub fn create_synthesizer() -> Result<Box<dyn Synthesizer>> {
    info!("Trying espeak-ng backend...");
    match backends::espeak::EspeakSynth::new() {
        Ok(synth) => {
            info!("Successfully initialized espeak-ng backend");
            return Ok(Box::new(synth));
        }
        Err(e) => {
            info!("espeak-ng backend unavailable: {}", e);
        }
    }

    info!("Trying flite backend...");
    match backends::flite::FliteSynth::new() {
        Ok(synth) => {
            info!("Successfully initialized flite backend");
            Ok(Box::new(synth))
        }
        Err(e) => Err(LectorError::Synthesis(format!(
            "No synthesis backend available. Tried:\n\
             1. espeak-ng (install: sudo apt install espeak-ng)\n\
             2. flite (install: sudo apt install flite)\n\
             Error: {}",
            e
        ))),
    }
}

/// Read the duration of a rendered WAV file
pub(crate) fn wav_duration(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| LectorError::Synthesis(format!("Failed to read WAV {:?}: {}", path, e)))?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(LectorError::Synthesis(format!(
            "WAV {:?} has zero sample rate",
            path
        )));
    }
    Ok(reader.duration() as f64 / spec.sample_rate as f64)
}
