//! espeak-ng backend
//!
//! Renders document text to a temporary WAV file with the espeak-ng
//! command-line synthesizer. Text is piped through the child's stdin so
//! document length never hits argv limits.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng)

use crate::synth::{wav_duration, AudioClip, Synthesizer};
use crate::{LectorError, Result};
use log::debug;
use std::io::Write;
use std::process::{Command, Stdio};

/// Synthesizer backend driving the espeak-ng binary
pub struct EspeakSynth {
    /// Path to espeak-ng
    espeak_path: String,

    /// Cached rate setting (0-100)
    rate: u8,
}

impl EspeakSynth {
    /// Create a new espeak-ng synthesizer
    ///
    /// Verifies that espeak-ng is available
    pub fn new() -> Result<Self> {
        let espeak_path = Self::find_espeak()?;
        debug!("Found espeak-ng at: {}", espeak_path);

        Ok(Self {
            espeak_path,
            rate: 50,
        })
    }

    /// Find espeak-ng executable
    fn find_espeak() -> Result<String> {
        let paths = vec!["espeak-ng", "/usr/bin/espeak-ng"];

        for path in paths {
            if let Ok(output) = Command::new(path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                if output.success() {
                    return Ok(path.to_string());
                }
            }
        }

        Err(LectorError::Synthesis(
            "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
        ))
    }

    /// Convert rate (0-100) to espeak speed (80-450 wpm)
    fn rate_to_wpm(rate: u8) -> u16 {
        // 0 = 80 wpm (very slow), 50 = 265 wpm, 100 = 450 wpm
        80 + ((rate as u16) * 370 / 100)
    }
}

impl Synthesizer for EspeakSynth {
    fn synthesize(&mut self, text: &str, voice: &str) -> Result<AudioClip> {
        let out_file = tempfile::Builder::new()
            .prefix("lector-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| LectorError::Synthesis(format!("Failed to create temp file: {}", e)))?;

        let wpm = Self::rate_to_wpm(self.rate);
        debug!(
            "Synthesizing {} chars with voice {} at {} wpm",
            text.len(),
            voice,
            wpm
        );

        let mut child = Command::new(&self.espeak_path)
            .arg("-v")
            .arg(voice)
            .arg("-s")
            .arg(wpm.to_string())
            .arg("-w")
            .arg(out_file.path())
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| LectorError::Synthesis(format!("Failed to start espeak-ng: {}", e)))?;

        // Feed the text, then close stdin so espeak-ng finishes the render.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| LectorError::Synthesis(format!("Failed to write text: {}", e)))?;
        }

        let status = child
            .wait()
            .map_err(|e| LectorError::Synthesis(format!("espeak-ng did not exit: {}", e)))?;
        if !status.success() {
            return Err(LectorError::Synthesis(format!(
                "espeak-ng failed with {}",
                status
            )));
        }

        let duration = wav_duration(out_file.path())?;
        debug!("Rendered {:.1}s of audio", duration);

        Ok(AudioClip::from_temp(out_file, duration))
    }

    fn set_rate(&mut self, rate: u8) -> Result<()> {
        debug!("Setting rate to {}", rate);
        self.rate = rate;
        Ok(())
    }
}
