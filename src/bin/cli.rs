//! respwire CLI
//!
//! Inspect RESP byte streams and build request frames.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use respwire::format::format_value;
use respwire::protocol::Arg;
use respwire::stream::{ValueReader, DEFAULT_CHUNK_SIZE};
use respwire::{BulkMode, Decoder, DecoderConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// respwire CLI
#[derive(Parser, Debug)]
#[command(name = "respwire")]
#[command(about = "Decode and encode RESP wire data")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a RESP stream and print each value
    Decode {
        /// Input file (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Keep bulk payloads as raw bytes instead of UTF-8 text
        #[arg(short, long)]
        raw: bool,

        /// Bytes read per chunk
        #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Maximum array nesting depth
        #[arg(long, default_value_t = respwire::config::DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Maximum bulk length in bytes
        #[arg(long, default_value_t = respwire::config::DEFAULT_MAX_BULK_LEN)]
        max_bulk_len: i64,
    },

    /// Encode arguments as a request (array of bulks) and write it to stdout
    Encode {
        /// Request arguments, e.g. `set key 123`
        #[arg(required = true)]
        args: Vec<String>,

        /// Print with escapes instead of raw bytes
        #[arg(short, long)]
        escape: bool,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging; stdout carries the decoded output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Decode {
            file,
            raw,
            chunk_size,
            max_depth,
            max_bulk_len,
        } => {
            let config = DecoderConfig::builder()
                .mode(if raw { BulkMode::Raw } else { BulkMode::Text })
                .max_depth(max_depth)
                .max_bulk_len(max_bulk_len)
                .build();
            run_decode(file, config, chunk_size)
        }
        Commands::Encode { args, escape } => run_encode(args, escape),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_decode(file: Option<PathBuf>, config: DecoderConfig, chunk_size: usize) -> respwire::Result<()> {
    let input: Box<dyn Read> = match &file {
        Some(path) => {
            tracing::info!("Decoding {}", path.display());
            Box::new(File::open(path)?)
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reader = ValueReader::with_decoder(input, Decoder::new(config), chunk_size);
    for value in reader {
        writeln!(out, "{}", format_value(&value?))?;
    }
    Ok(())
}

fn run_encode(args: Vec<String>, escape: bool) -> respwire::Result<()> {
    let args: Vec<Arg> = args.into_iter().map(Arg::from).collect();
    let bytes = respwire::encode_request(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if escape {
        writeln!(out, "{}", bytes.escape_ascii())?;
    } else {
        out.write_all(&bytes)?;
    }
    out.flush()?;
    Ok(())
}
