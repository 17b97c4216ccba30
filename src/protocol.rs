//! Playback control protocol
//!
//! The two message sets crossing the engine boundary: `Command` flows from
//! the controller to the engine, `ProgressEvent` flows back. The controller
//! side speaks a line-oriented text format on stdin and a JSON-object-per-
//! line format on stdout; the parsing and encoding for both live here so the
//! engine itself only ever sees typed values.

use crate::{LectorError, Result};
use serde_json::json;

/// Control commands, controller -> engine
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Pause playback (no-op while already paused)
    Pause,
    /// Resume playback (no-op while already playing)
    Resume,
    /// End the current document's session immediately
    Stop,
    /// Jump to an absolute position in seconds; always resumes playback
    SeekTo(f64),
}

impl Command {
    /// Parse a wire-format command line
    ///
    /// Accepted forms: `pause`, `resume`, `stop`, `seek:<float-seconds>`.
    /// The seek payload must be a finite, non-negative number.
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.trim();
        match line {
            "pause" => Ok(Command::Pause),
            "resume" => Ok(Command::Resume),
            "stop" => Ok(Command::Stop),
            _ => {
                if let Some(payload) = line.strip_prefix("seek:") {
                    let seconds: f64 = payload.trim().parse().map_err(|_| {
                        LectorError::CommandParse(format!("invalid seek payload: {:?}", payload))
                    })?;
                    if !seconds.is_finite() || seconds < 0.0 {
                        return Err(LectorError::CommandParse(format!(
                            "seek seconds must be finite and >= 0, got {}",
                            seconds
                        )));
                    }
                    Ok(Command::SeekTo(seconds))
                } else {
                    Err(LectorError::CommandParse(format!(
                        "unknown command: {:?}",
                        line
                    )))
                }
            }
        }
    }
}

/// Status events, engine -> controller
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Periodic position report while playing
    Tick { elapsed: f64, duration: f64 },
    /// The device finished the current document
    Ended,
    /// The whole playlist has been played
    WorkflowDone,
    /// Free-text observability line
    Log(String),
}

impl ProgressEvent {
    /// Render the event as one stdout line
    ///
    /// Status events become JSON objects; `Log` lines pass through as text.
    pub fn to_line(&self) -> String {
        match self {
            ProgressEvent::Tick { elapsed, duration } => {
                json!({ "progress": elapsed, "duration": duration }).to_string()
            }
            ProgressEvent::Ended => json!({ "ended": true }).to_string(),
            ProgressEvent::WorkflowDone => json!({ "workflow_done": true }).to_string(),
            ProgressEvent::Log(text) => text.clone(),
        }
    }
}
