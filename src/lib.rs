//! Lector - console document read-aloud player
//!
//! Synthesizes each document of a playlist into audio and plays it back
//! under remote control (pause/resume/seek/stop), streaming progress events
//! to an observer.

pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod playlist;
pub mod protocol;
pub mod runner;
pub mod synth;
pub mod voices;

pub use error::{LectorError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "lector";
