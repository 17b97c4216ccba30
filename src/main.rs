//! Lector main entry point
//!
//! The controller process around the playback engine:
//! 1. stdin (control commands) - parsed and forwarded to the engine
//! 2. progress channel (engine events) - printed to stdout as JSON lines
//! 3. a worker thread running the playlist through the engine

use lector::config::Config;
use lector::device::{self, mock::MockDevice, Device};
use lector::engine::PlaybackEngine;
use lector::playlist;
use lector::protocol::Command;
use lector::runner::PlaylistRunner;
use lector::synth::create_synthesizer;
use lector::voices;
use lector::{LectorError, Result};
use log::{error, info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::thread;

/// Parsed command line
struct Args {
    playlist: PathBuf,
    voice: Option<String>,
    language: Option<String>,
    mock: bool,
}

fn usage() -> ! {
    eprintln!("Usage: lector [--debug] [--mock] [--voice VOICE | --language LANG] PLAYLIST.json");
    eprintln!();
    eprintln!("Reads the documents of PLAYLIST.json aloud. Control playback by");
    eprintln!("writing commands to stdin: pause, resume, stop, seek:<seconds>");
    process::exit(2);
}

fn parse_args() -> Args {
    let mut playlist = None;
    let mut voice = None;
    let mut language = None;
    let mut mock = false;

    let mut args = std::env::args()
        .skip(1)
        .filter(|arg| arg != "--debug" && arg != "-d");
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mock" => mock = true,
            "--voice" => voice = Some(args.next().unwrap_or_else(|| usage())),
            "--language" => language = Some(args.next().unwrap_or_else(|| usage())),
            "--help" | "-h" => usage(),
            _ if arg.starts_with('-') => usage(),
            _ => {
                if playlist.replace(PathBuf::from(arg)).is_some() {
                    usage();
                }
            }
        }
    }

    Args {
        playlist: playlist.unwrap_or_else(|| usage()),
        voice,
        language,
        mock,
    }
}

fn main() {
    let debug_mode = std::env::args().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to lector.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("lector.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open lector.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "Lector version {} starting (debug mode, logging to lector.log)",
            lector::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run(parse_args()) {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    info!("Config loaded from {:?}", config.path());

    let playlist = playlist::load(&args.playlist)?;
    if playlist.is_empty() {
        warn!("Playlist {:?} is empty", args.playlist);
    }

    // Voice resolution: explicit flag, then config, then language lookup.
    let language = args.language.unwrap_or_else(|| config.language());
    let voice = args
        .voice
        .or_else(|| config.voice())
        .or_else(|| voices::voice_for_language(&language).map(str::to_string))
        .ok_or_else(|| {
            LectorError::Config(format!("No voice known for language {:?}", language))
        })?;
    info!("Using voice {} for {} documents", voice, playlist.len());

    let mut synth = create_synthesizer()?;
    synth.set_rate(config.rate())?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    let (progress_tx, progress_rx) = mpsc::channel();

    // The worker owns device, engine and runner for the whole run. The
    // device has to be created inside the worker; the real backend's output
    // stream cannot move between threads.
    let tick = config.tick();
    let gap = config.gap();
    let use_mock = args.mock;
    let worker = thread::Builder::new()
        .name("playback".to_string())
        .spawn(move || -> Result<()> {
            let device: Box<dyn Device> = if use_mock {
                info!("Using mock audio device");
                Box::new(MockDevice::new())
            } else {
                device::create_device()?
            };
            let engine = PlaybackEngine::new(device, cmd_rx, progress_tx.clone()).with_tick(tick);
            let mut runner = PlaylistRunner::new(engine, synth, progress_tx, gap);
            runner.run(&playlist, &voice)
        })?;

    // Forward stdin lines as commands until the run ends. The thread dies
    // with the process once the worker is done.
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            match Command::parse(&line) {
                Ok(command) => {
                    if cmd_tx.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }
    });

    // Progress stream: one line per event on stdout.
    let stdout = io::stdout();
    for event in progress_rx.iter() {
        let mut out = stdout.lock();
        writeln!(out, "{}", event.to_line())?;
        out.flush()?;
    }

    match worker.join() {
        Ok(result) => result,
        Err(_) => Err(LectorError::Other("playback thread panicked".to_string())),
    }
}
