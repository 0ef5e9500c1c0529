//! `stdmsg` CLI: encode, decode, and measure standard messages from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to binary (stdin → stdout)
//! echo '["a",42,null,true]' | stdmsg encode > msg.bin
//!
//! # Encode from file, print as hex
//! stdmsg encode -i data.json --hex
//!
//! # Decode binary back to pretty-printed JSON
//! stdmsg decode -i msg.bin
//!
//! # Decode hex text captured from a channel trace
//! echo '0c 04 07 01 61 03 2a 00 00 00 00 01' | stdmsg decode --hex
//!
//! # Show encoding statistics
//! stdmsg stats -i data.json
//! ```

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use stdmsg_core::{CodecConfig, MessageCodec, StandardMessageCodec, DEFAULT_MAX_DEPTH};

use crate::logging::LogArgs;

#[derive(Parser)]
#[command(name = "stdmsg", version, about = "Standard message codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    log: LogArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to a standard message
    Encode {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Write lowercase hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },
    /// Decode a standard message to pretty-printed JSON
    Decode {
        /// Input message file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Treat the input as hex text (whitespace ignored)
        #[arg(long)]
        hex: bool,
        /// Maximum nesting of lists and maps
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Show encoding statistics (JSON size vs. encoded size)
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.log.init();

    match cli.command {
        Commands::Encode { input, output, hex } => {
            let json = read_input(input.as_deref())?;
            let bytes = encode_json(&json, &StandardMessageCodec::new())?;
            tracing::info!(json_bytes = json.len(), encoded_bytes = bytes.len(), "encoded");
            if hex {
                write_output(output.as_deref(), to_hex(&bytes).as_bytes())?;
            } else {
                write_output(output.as_deref(), &bytes)?;
            }
        }
        Commands::Decode {
            input,
            output,
            hex,
            max_depth,
        } => {
            let raw = read_input_bytes(input.as_deref())?;
            let bytes = if hex {
                let text = String::from_utf8(raw).context("Hex input is not valid UTF-8")?;
                from_hex(&text)?
            } else {
                raw
            };
            let codec =
                StandardMessageCodec::with_config(CodecConfig::default().with_max_depth(max_depth));
            let value = codec
                .decode_message(&bytes)
                .context("Failed to decode standard message")?;
            tracing::info!(bytes = bytes.len(), category = value.category(), "decoded");
            let pretty = serde_json::to_string_pretty(&stdmsg_core::to_json(&value))?;
            write_output(output.as_deref(), pretty.as_bytes())?;
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let bytes = encode_json(&json, &StandardMessageCodec::new())?;
            let json_bytes = json.trim_end().len();
            let encoded_bytes = bytes.len();
            let ratio = if json_bytes > 0 {
                (1.0 - (encoded_bytes as f64 / json_bytes as f64)) * 100.0
            } else {
                0.0
            };
            println!("JSON size:     {} bytes", json_bytes);
            println!("Encoded size:  {} bytes", encoded_bytes);
            println!("Reduction:     {:.1}%", ratio);
        }
    }

    Ok(())
}

fn encode_json(json: &str, codec: &impl MessageCodec) -> Result<Vec<u8>> {
    let parsed: serde_json::Value =
        serde_json::from_str(json).context("Failed to parse JSON input")?;
    let value = stdmsg_core::from_json(&parsed);
    let bytes = codec
        .encode_message(&value)
        .context("Failed to encode JSON to standard message")?;
    Ok(bytes.to_vec())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn from_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        anyhow::bail!("Hex input has an odd number of digits ({})", digits.len());
    }
    digits
        .chunks(2)
        .map(|pair| {
            let s = std::str::from_utf8(pair).context("Hex input is not ASCII")?;
            u8::from_str_radix(s, 16).with_context(|| format!("Invalid hex byte: '{}'", s))
        })
        .collect()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn read_input_bytes(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content)
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
