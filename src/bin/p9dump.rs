//! p9dump
//!
//! Decodes a captured stream of 9P2000 frames and prints one line per
//! message.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use clap::Parser;
use p9wire::{Config, FrameReader, Message};
use tracing_subscriber::{fmt, EnvFilter};

/// 9P2000 frame dumper
#[derive(Parser, Debug)]
#[command(name = "p9dump")]
#[command(about = "Decode and print a stream of 9P2000 messages")]
#[command(version)]
struct Args {
    /// Capture file to read (stdin if omitted)
    input: Option<PathBuf>,

    /// Largest frame to accept, in bytes
    #[arg(short, long, default_value_t = p9wire::protocol::MSIZE)]
    max_message_size: u32,

    /// Expected protocol version; other Tversion/Rversion strings are flagged
    #[arg(long, default_value = p9wire::protocol::DEFAULT_VERSION)]
    protocol_version: String,

    /// Check stat length prefixes against the record contents
    #[arg(short, long)]
    strict_stat: bool,

    /// Stop after this many frames
    #[arg(short, long)]
    limit: Option<usize>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,p9wire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .max_message_size(args.max_message_size)
        .version(args.protocol_version.clone())
        .strict_stat_length(args.strict_stat)
        .build();

    let source: Box<dyn Read> = match &args.input {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                tracing::error!("Failed to open {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let limit = args.limit.unwrap_or(usize::MAX);
    let mut count = 0;

    for frame in FrameReader::with_config(source, config.clone()).frames().take(limit) {
        match frame {
            Ok(frame) => {
                if let Message::Tversion { version, .. } | Message::Rversion { version, .. } =
                    &frame.message
                {
                    if *version != config.version.as_str() {
                        tracing::warn!(
                            "Frame {} negotiates version '{}', expected '{}'",
                            count,
                            version,
                            config.version
                        );
                    }
                }
                println!("{}", frame);
                count += 1;
            }
            Err(e) => {
                tracing::error!("Decode failed after {} frames: {}", count, e);
                std::process::exit(1);
            }
        }
    }

    tracing::info!("Decoded {} frames", count);
}
