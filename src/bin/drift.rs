//! drift CLI - Listen to the places around you
//!
//! Reads a set of nearby points of interest (a JSON file or stdin), takes a
//! position and an optional compass heading, and prints one whisper.
//!
//! # Design Philosophy
//!
//! - **Library-first**: every decision is made by `drift::core`
//! - **Always answers**: empty or odd input still yields a sentence
//! - **Quiet by default**: diagnostics go to stderr through `RUST_LOG`

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use drift::core::{
    load_points, read_points, within_radius, CharacterSink, Coordinate, DriftConfig, DriftEntry,
    Pacer, Technique, WhisperGenerator, WhisperStream,
};

/// 📡 Drift: whispers from the places around you.
#[derive(Parser, Debug)]
#[command(name = "drift")]
#[command(version = drift::VERSION)]
#[command(about = "📡 Drift: whispers from the places around you")]
#[command(after_help = "EXAMPLES:
  # Whisper from a saved geosearch reply, facing north-east
  drift --points nearby.json --lat 41.3114 --lng -105.5911 --heading 45

  # Pipe points in and let the whisper type itself out
  cat nearby.json | drift --lat 41.3114 --lng -105.5911 --stream

  # Reproducible output as a log entry
  drift --points nearby.json --lat 41.3 --lng -105.6 --seed 7 --json
")]
struct Cli {
    // ═══════════════════════════════════════════════════════════════════════════
    // 📍 POSITION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Points of interest as JSON (default: stdin)
    #[arg(short = 'p', long = "points", value_name = "FILE", help_heading = "📍 POSITION")]
    points: Option<PathBuf>,

    /// Latitude of the listener in degrees
    #[arg(long = "lat", allow_negative_numbers = true, help_heading = "📍 POSITION")]
    lat: f64,

    /// Longitude of the listener in degrees
    #[arg(long = "lng", allow_negative_numbers = true, help_heading = "📍 POSITION")]
    lng: f64,

    /// Compass heading in degrees, clockwise from north
    #[arg(long = "heading", allow_negative_numbers = true, help_heading = "📍 POSITION")]
    heading: Option<f64>,

    /// Ignore points farther than this many meters
    #[arg(long = "radius", value_name = "METERS", help_heading = "📍 POSITION")]
    radius: Option<f64>,

    // ═══════════════════════════════════════════════════════════════════════════
    // 🎛️ GENERATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Force a technique [template-fill, markov-blend, cut-up, phonetic-bridge, skip-gram]
    #[arg(long = "technique", value_name = "NAME", value_parser = parse_technique, help_heading = "🎛️ GENERATION")]
    technique: Option<Technique>,

    /// Seed the random source for reproducible whispers
    #[arg(long = "seed", value_name = "N", help_heading = "🎛️ GENERATION")]
    seed: Option<u64>,

    /// Config file path (default: .drift_config.json, then user config)
    #[arg(short = 'c', long = "config", value_name = "FILE", help_heading = "🎛️ GENERATION")]
    config: Option<PathBuf>,

    // ═══════════════════════════════════════════════════════════════════════════
    // 🔊 OUTPUT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Type the whisper out character by character
    #[arg(long = "stream", conflicts_with = "json", help_heading = "🔊 OUTPUT")]
    stream: bool,

    /// Print a timestamped log entry as JSON
    #[arg(long = "json", help_heading = "🔊 OUTPUT")]
    json: bool,
}

fn parse_technique(s: &str) -> std::result::Result<Technique, String> {
    Technique::parse(s).ok_or_else(|| {
        let names: Vec<&str> = Technique::ALL.iter().map(|t| t.name()).collect();
        format!("unknown technique '{}' (expected one of: {})", s, names.join(", "))
    })
}

/// Writes streamed characters, flushing each one.
///
/// A sink cannot fail mid-stream, so the first write error is held and
/// reported by `finish`; later characters are dropped.
struct WriterSink<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<W: Write> CharacterSink for WriterSink<W> {
    fn emit(&mut self, ch: char, _so_far: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = write!(self.out, "{}", ch).and_then(|_| self.out.flush()) {
            self.error = Some(e);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("drift=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    // Fix broken pipe panic when piping to head/tail/etc.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DriftConfig::load_from_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("resolving working directory")?;
            DriftConfig::load(&cwd)?
        }
    };

    let mut points = match &cli.points {
        Some(path) => load_points(path)?,
        None => read_points(io::stdin().lock()).context("reading points from stdin")?,
    };

    let user = Coordinate::new(cli.lat, cli.lng);
    if let Some(radius) = cli.radius {
        points = within_radius(&points, user, radius);
    }
    debug!(points = points.len(), %user, heading = ?cli.heading, "listening");

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let generator = WhisperGenerator::new(config);
    let result = match cli.technique {
        Some(technique) => {
            generator.generate_with_technique(&points, user, cli.heading, technique, &mut rng)
        }
        None => generator.generate_with_rng(&points, user, cli.heading, &mut rng),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        let entry = DriftEntry::record(&result, user, generator.config(), &mut rng);
        writeln!(out, "{}", serde_json::to_string_pretty(&entry)?)?;
    } else if cli.stream {
        let pacer = Pacer::from_config(generator.config());
        let mut sink = WriterSink::new(&mut out);
        pacer.drive(WhisperStream::new(result), &mut sink, &mut rng);
        sink.finish().context("writing streamed whisper")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", result.text)?;
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift::WhisperResult;

    /// Accepts `budget` writes, then fails every call.
    struct FailingWriter {
        written: Vec<u8>,
        budget: usize,
        attempts: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            self.budget -= 1;
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_sink_streams_every_char() {
        let mut buf = Vec::new();
        let mut sink = WriterSink::new(&mut buf);
        let stream = WhisperStream::new(WhisperResult::fixed("Echo", vec![]));
        Pacer::instant().drive(stream, &mut sink, &mut rand::thread_rng());
        assert!(sink.finish().is_ok());
        assert_eq!(buf, b"Echo");
    }

    #[test]
    fn test_writer_sink_keeps_first_error() {
        let mut writer = FailingWriter {
            written: Vec::new(),
            budget: 2,
            attempts: 0,
        };
        let mut sink = WriterSink::new(&mut writer);
        let stream = WhisperStream::new(WhisperResult::fixed("Quarry", vec![]));
        Pacer::instant().drive(stream, &mut sink, &mut rand::thread_rng());

        let err = sink.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(writer.written, b"Qu");
        // No further writes after the failure
        assert_eq!(writer.attempts, 3);
    }
}
