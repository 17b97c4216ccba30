//! flite backend
//!
//! Fallback synthesizer using the flite binary. Voice selection is limited
//! to flite's built-in voices, so the requested voice id is only honored
//! when flite knows it; everything else falls back to the default voice.
//!
//! Dependencies:
//! - flite (install with: sudo apt install flite)

use crate::synth::{wav_duration, AudioClip, Synthesizer};
use crate::{LectorError, Result};
use log::{debug, warn};
use std::io::Write;
use std::process::{Command, Stdio};

/// Voices shipped with a stock flite build
const FLITE_VOICES: &[&str] = &["kal", "kal16", "awb", "rms", "slt"];

/// Synthesizer backend driving the flite binary
pub struct FliteSynth {
    /// Path to flite
    flite_path: String,

    /// Cached rate setting (0-100)
    rate: u8,
}

impl FliteSynth {
    /// Create a new flite synthesizer
    ///
    /// Verifies that flite is available
    pub fn new() -> Result<Self> {
        let flite_path = Self::find_flite()?;
        debug!("Found flite at: {}", flite_path);

        Ok(Self {
            flite_path,
            rate: 50,
        })
    }

    /// Find flite executable
    fn find_flite() -> Result<String> {
        let paths = vec!["flite", "/usr/bin/flite"];

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
            "flite not found. Install with: sudo apt install flite".to_string(),
        ))
    }

    /// Convert rate (0-100) to flite's duration_stretch factor
    ///
    /// Stretch > 1 slows speech down, < 1 speeds it up.
    fn rate_to_stretch(rate: u8) -> f32 {
        // 0 -> 2.2 (very slow), 50 -> 1.0, 100 -> 0.6 (fast)
        match rate {
            r if r < 50 => 1.0 + (50 - r) as f32 * 0.024,
            r => 1.0 - (r - 50) as f32 * 0.008,
        }
    }
}

impl Synthesizer for FliteSynth {
    fn synthesize(&mut self, text: &str, voice: &str) -> Result<AudioClip> {
        let out_file = tempfile::Builder::new()
            .prefix("lector-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| LectorError::Synthesis(format!("Failed to create temp file: {}", e)))?;

        // flite reads the input text from a file; "-" means stdin.
        let mut cmd = Command::new(&self.flite_path);
        if FLITE_VOICES.contains(&voice) {
            cmd.arg("-voice").arg(voice);
        } else {
            warn!("flite has no voice {:?}, using default", voice);
        }
        let stretch = Self::rate_to_stretch(self.rate);
        cmd.arg("--setf")
            .arg(format!("duration_stretch={:.3}", stretch))
            .arg("-f")
            .arg("-")
            .arg("-o")
            .arg(out_file.path());

        debug!(
            "Synthesizing {} chars with flite, stretch {:.2}",
            text.len(),
            stretch
        );

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| LectorError::Synthesis(format!("Failed to start flite: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| LectorError::Synthesis(format!("Failed to write text: {}", e)))?;
        }

        let status = child
            .wait()
            .map_err(|e| LectorError::Synthesis(format!("flite did not exit: {}", e)))?;
        if !status.success() {
            return Err(LectorError::Synthesis(format!(
                "flite failed with {}",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_conversion() {
        assert!((FliteSynth::rate_to_stretch(50) - 1.0).abs() < 1e-6);
        assert!(FliteSynth::rate_to_stretch(0) > 2.0);
        assert!(FliteSynth::rate_to_stretch(100) < 0.7);
    }

    #[test]
    fn test_create_flite_synth() {
        match FliteSynth::new() {
            Ok(_) => println!("flite backend available"),
            Err(e) => println!("flite backend not available: {}", e),
        }
    }
}
