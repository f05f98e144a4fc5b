// klv-inspect - MISB KLV packet inspector
// Copyright (c) 2025 MISB KLV contributors
//
// Licensed under the Mozilla Public License 2.0.
// See LICENSE file for details.

//! # klv-inspect
//!
//! Decodes a file of concatenated KLV packets and prints one JSON object per
//! packet on standard output.
//!
//! ## Usage
//!
//! ```bash
//! # Decode a raw KLV dump
//! klv-inspect flight.klv
//!
//! # Read from stdin, replay time stamps on wall-clock time, print metrics
//! cat flight.klv | klv-inspect - --loop-playback --metrics
//! ```

use clap::Parser;
use misb_klv::{PacketReader, PipelineConfig, TagRegistry, TelemetryPipeline};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// MISB KLV packet inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// KLV file to decode, `-` for standard input
    input: String,

    /// JSON pipeline configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Rewrite precision time stamps onto wall-clock time
    #[arg(long)]
    loop_playback: bool,

    /// Skip checksum verification
    #[arg(long)]
    no_checksum: bool,

    /// Nominal packet rate in Hz, used as container time
    #[arg(long, default_value = "30.0")]
    packet_rate: f64,

    /// Pretty-print JSON
    #[arg(short, long)]
    pretty: bool,

    /// Print a metrics report on standard error when done
    #[arg(short, long)]
    metrics: bool,

    /// Stop at the first packet that fails to decode
    #[arg(long)]
    strict: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!("klv-inspect v{} (misb-klv v{})", env!("CARGO_PKG_VERSION"), misb_klv::VERSION);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns false when some packets failed to decode
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if args.loop_playback {
        config.loop_playback = true;
    }
    if args.no_checksum {
        config.verify_checksum = false;
    }
    if args.packet_rate.is_nan() || args.packet_rate <= 0.0 {
        return Err(format!("packet rate must be positive, got {}", args.packet_rate).into());
    }

    let registry = Arc::new(TagRegistry::with_standard_catalog());
    info!("{} tags registered", registry.len());
    let pipeline = TelemetryPipeline::new(config, registry)?;

    let input: Box<dyn Read> = if args.input == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(&args.input)?))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut reader = PacketReader::new(input);
    let mut failures = 0u64;
    let mut index = 0u64;

    for packet in reader.by_ref() {
        let packet = packet?;
        let stream_time = index as f64 / args.packet_rate;
        index += 1;

        match pipeline.process_packet(stream_time, &packet) {
            Ok(output) => {
                let line = if args.pretty {
                    serde_json::to_string_pretty(&output.packet)?
                } else {
                    serde_json::to_string(&output.packet)?
                };
                writeln!(out, "{}", line)?;
            }
            Err(e) if args.strict => return Err(e.into()),
            Err(e) => {
                warn!("packet {}: {}", index - 1, e);
                failures += 1;
            }
        }
    }
    out.flush()?;

    if reader.skipped_bytes() > 0 {
        warn!("{} bytes outside packets skipped", reader.skipped_bytes());
    }
    info!("{} packets read, {} failed", index, failures);
    if args.metrics {
        eprint!("{}", pipeline.metrics().report());
    }

    Ok(failures == 0)
}
