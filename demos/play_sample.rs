//! Demo run on the mock device
//!
//! Run with: cargo run --example play_sample
//!
//! Plays a tiny in-memory playlist on the simulated device while a scripted
//! controller pauses, seeks and resumes, printing every progress event.
//! No audio hardware or synthesizer binary is required.

use anyhow::Result;
use lector::device::mock::MockDevice;
use lector::engine::PlaybackEngine;
use lector::playlist::Document;
use lector::protocol::Command;
use lector::runner::PlaylistRunner;
use lector::synth::{AudioClip, Synthesizer};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Pretends every document renders to a three second clip
struct FixedSynth;

impl Synthesizer for FixedSynth {
    fn synthesize(&mut self, text: &str, _voice: &str) -> lector::Result<AudioClip> {
        println!("(synthesizing {} chars)", text.len());
        Ok(AudioClip::from_path(PathBuf::from("demo.wav"), 3.0))
    }

    fn set_rate(&mut self, _rate: u8) -> lector::Result<()> {
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let playlist = vec![
        Document::new("Welcome", "This is the first demo document."),
        Document::new("Second thoughts", "And this is the second."),
    ];

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (progress_tx, progress_rx) = mpsc::channel();

    let worker = thread::spawn(move || -> lector::Result<()> {
        let engine = PlaybackEngine::new(Box::new(MockDevice::new()), cmd_rx, progress_tx.clone());
        let mut runner = PlaylistRunner::new(
            engine,
            Box::new(FixedSynth),
            progress_tx,
            Duration::from_millis(500),
        );
        runner.run(&playlist, "en-us")
    });

    // Scripted controller: pause a second in, resume, then skip ahead.
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(1000));
        let _ = cmd_tx.send(Command::Pause);
        thread::sleep(Duration::from_millis(800));
        let _ = cmd_tx.send(Command::Resume);
        thread::sleep(Duration::from_millis(400));
        let _ = cmd_tx.send(Command::SeekTo(2.5));
    });

    for event in progress_rx.iter() {
        println!("{}", event.to_line());
    }

    worker.join().expect("playback thread panicked")?;
    println!("Demo complete");
    Ok(())
}
