//! resp-inspect
//!
//! Decodes RESP frames from a file or stdin, renders commands, and probes
//! servers with PING.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::net::TcpStream;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use resp_codec::protocol::{read_value_with_config, write_value};
use resp_codec::{Config, Result, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// RESP inspection tool
#[derive(Parser, Debug)]
#[command(name = "resp-inspect")]
#[command(about = "Decode, render and probe RESP traffic")]
#[command(version)]
struct Args {
    /// Largest bulk string accepted, in MB
    #[arg(long, default_value = "512")]
    max_bulk_mb: usize,

    /// Largest array accepted, in elements
    #[arg(long, default_value = "1048576")]
    max_array_len: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode every frame in a capture and print it
    Decode {
        /// Capture file (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Render a command as wire bytes
    Encode {
        /// Command name followed by its arguments
        #[arg(required = true)]
        args: Vec<String>,
    },

    /// Send PING to a server and print the reply
    Ping {
        /// Server address
        #[arg(short, long, default_value = "127.0.0.1:6379")]
        server: String,

        /// Read/write timeout in milliseconds
        #[arg(short, long, default_value = "5000")]
        timeout_ms: u64,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,resp_codec=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .max_bulk_len(args.max_bulk_mb.saturating_mul(1024 * 1024))
        .max_array_len(args.max_array_len)
        .build();

    let outcome = match args.command {
        Commands::Decode { file } => decode(file, &config),
        Commands::Encode { args } => encode(args),
        Commands::Ping { server, timeout_ms } => ping(&server, timeout_ms, &config),
    };

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// Decode frames until the input ends
fn decode(file: Option<PathBuf>, config: &Config) -> Result<()> {
    match file {
        Some(path) => {
            tracing::info!("Decoding {}", path.display());
            decode_stream(&mut BufReader::new(File::open(path)?), config)
        }
        None => decode_stream(&mut io::stdin().lock(), config),
    }
}

fn decode_stream<R: io::BufRead>(reader: &mut R, config: &Config) -> Result<()> {
    let mut frames = 0usize;

    loop {
        let value = match read_value_with_config(reader, config) {
            Ok(value) => value,
            Err(e) if e.is_disconnect() => break,
            Err(e) => {
                tracing::warn!("Stopped after {} frames", frames);
                return Err(e);
            }
        };

        println!("{:>6} {:<6} {}", frames, value.kind(), value);
        frames += 1;
    }

    tracing::info!("Decoded {} frames", frames);
    Ok(())
}

/// Print the wire form of a command with control bytes escaped
fn encode(args: Vec<String>) -> Result<()> {
    let value = Value::command(args);
    println!("{}", value.encode().escape_ascii());
    Ok(())
}

fn ping(server: &str, timeout_ms: u64, config: &Config) -> Result<()> {
    let stream = TcpStream::connect(server)?;
    stream.set_nodelay(true)?;

    let timeout = Some(Duration::from_millis(timeout_ms));
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;

    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = BufWriter::new(stream);

    write_value(&mut writer, &Value::command(["PING"]))?;
    let reply = read_value_with_config(&mut reader, config)?;

    tracing::debug!("Reply from {}: {:?}", server, reply);
    println!("{}", reply);

    Ok(())
}
