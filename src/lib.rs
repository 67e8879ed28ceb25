//! Streaming nibble packing for G-code over slow serial links
//!
//! Most slicer output uses a handful of characters: digits, `.`, space,
//! newline, `G` and `X`. This crate packs two such characters into one byte
//! using 4-bit alphabet indices and escapes anything else as a literal byte,
//! which roughly halves the bytes a printer has to receive.
//!
//! # Quick Start
//!
//! ```rust
//! use gcode_pack::{Command, Packer, Unpacker};
//!
//! // Sender: switch the receiver to packed mode, then pack a line
//! let mut wire = Command::EnablePacking.sequence().to_vec();
//! wire.extend_from_slice(&Packer::new().encode(b"G1 X10.5 Y3\n")?);
//!
//! // Receiver: one byte at a time, zero to two characters out
//! let mut unpacker = Unpacker::new();
//! let mut line = Vec::new();
//! for byte in wire {
//!     line.extend(unpacker.handle_byte(byte)?);
//! }
//! assert_eq!(line, b"G1 X10.5 Y3\n");
//! # Ok::<(), gcode_pack::Error>(())
//! ```
//!
//! # Command channel
//!
//! Two consecutive `0xFF` bytes never occur in packed data, so `0xFF 0xFF`
//! followed by a [`Command`] code toggles the receiver's behaviour in band.
//! The packer refuses `0xFF` in its input to keep that guarantee.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod codec;
pub mod protocol;

pub use codec::{
    CodecConfig, CodecState, CodecStats, DecodeState, Decoded, PackerConfig, Packed, Packer,
    PassThrough, RxFilter, TailPolicy, Unpacker, decode, encode,
};
pub use protocol::{ALPHABET_LEN, Alphabet, COMMAND_BYTE, Command, Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
