//! Pack a G-code file and replay it through a byte-at-a-time receiver
//!
//! Usage: `cargo run --example pack_gcode -- path/to/file.gcode`
//! Without a path a short built-in sample is used.

use gcode_pack::{Command, Packer, Unpacker};
use tracing_subscriber::{EnvFilter, fmt};

const SAMPLE: &str = "G28\nG1 Z0.2 F3000\nG1 X10.5 Y20.25 E0.0421 F1800\nM104 S210\n";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gcode_pack=trace"));
    fmt().with_env_filter(filter).init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read(path)?,
        None => SAMPLE.as_bytes().to_vec(),
    };

    // Sender: negotiate packing, then pack
    let mut packer = Packer::new();
    let mut wire = Command::EnablePacking.sequence().to_vec();
    wire.extend_from_slice(&packer.encode(&text)?);
    wire.extend_from_slice(&Command::QueryState.sequence());

    let stats = packer.stats();
    println!(
        "Packed {} bytes into {} ({:.1}%)",
        stats.bytes_in,
        stats.bytes_out,
        stats.ratio().unwrap_or(0.0) * 100.0
    );

    // Receiver: the way a serial interrupt would see it
    let mut unpacker = Unpacker::new();
    let mut received = Vec::with_capacity(text.len());
    for byte in wire {
        let decoded = unpacker.handle_byte(byte)?;
        if decoded.command() == Some(Command::QueryState) {
            println!("Receiver reports: {}", unpacker.report());
        }
        received.extend(decoded);
    }

    if received != text {
        return Err("decoded text differs from input".into());
    }
    println!("Decoded {} bytes, identical to input", received.len());

    Ok(())
}
