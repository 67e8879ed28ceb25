//! Send-side encoder
//!
//! The packer mirrors the unpacker: characters are taken in pairs, alphabet
//! members become nibbles and everything else follows the packed byte as a
//! literal. Input may never contain `0xFF`, which keeps two consecutive `0xFF`
//! bytes out of ordinary output: a `0xFF` packed byte is always followed by a
//! literal.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use super::{CodecStats, PackerConfig, TailPolicy};
use crate::protocol::{
    Alphabet, COMMAND_BYTE, Command, ESCAPE_NIBBLE, Error, Result, pack_nibbles,
};

/// Longest output of a single call: the lossless tail flush.
const MAX_PACKED: usize = 7;

/// Bytes produced by one packer call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Packed {
    bytes: [u8; MAX_PACKED],
    len: u8,
}

impl Packed {
    const EMPTY: Self = Self {
        bytes: [0; MAX_PACKED],
        len: 0,
    };

    fn push(&mut self, byte: u8) {
        self.bytes[self.len as usize] = byte;
        self.len += 1;
    }

    fn extend(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }

    /// Wire bytes, in order.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Nothing to send yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for Packed {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

/// Encoder for one outgoing stream.
#[derive(Debug, Clone, Default)]
pub struct Packer {
    alphabet: Alphabet,
    config: PackerConfig,
    pending: Option<u8>,
    position: usize,
    stats: CodecStats,
}

impl Packer {
    /// G-code alphabet, lossless tail flush.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// G-code alphabet with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedPad`] if the tail pad is `0xFF`.
    pub fn with_config(config: PackerConfig) -> Result<Self> {
        Self::with_alphabet(Alphabet::GCODE, config)
    }

    /// Custom alphabet; must match the receiver's.
    pub fn with_alphabet(alphabet: Alphabet, config: PackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            alphabet,
            config,
            pending: None,
            position: 0,
            stats: CodecStats::default(),
        })
    }

    /// Add one character. Emits a packed pair on every second call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedByte`] for `0xFF`; the packer state is left
    /// unchanged.
    pub fn push(&mut self, c: u8) -> Result<Packed> {
        if c == COMMAND_BYTE {
            debug!(position = self.position, "reserved byte in packer input");
            return Err(Error::ReservedByte {
                position: self.position,
            });
        }
        self.position += 1;
        self.stats.record_in(1);

        let packed = match self.pending.take() {
            None => {
                self.pending = Some(c);
                Packed::EMPTY
            }
            Some(first) => self.pack_pair(first, c),
        };
        self.stats.record_out(packed.len());
        Ok(packed)
    }

    fn pack_pair(&self, first: u8, second: u8) -> Packed {
        let first_nibble = self.alphabet.nibble_of(first);
        let second_nibble = self.alphabet.nibble_of(second);

        let mut packed = Packed::EMPTY;
        packed.push(pack_nibbles(first_nibble, second_nibble));
        if first_nibble == ESCAPE_NIBBLE {
            packed.push(first);
        }
        if second_nibble == ESCAPE_NIBBLE {
            packed.push(second);
        }
        packed
    }

    /// Flush a trailing unpaired character using the configured [`TailPolicy`].
    ///
    /// The packer is ready for a new stream afterwards.
    pub fn finish(&mut self) -> Packed {
        let Some(last) = self.pending.take() else {
            return Packed::EMPTY;
        };

        let packed = match self.config.tail {
            TailPolicy::Pad(pad) => self.pack_pair(last, pad),
            TailPolicy::Unpacked => {
                let mut packed = Packed::EMPTY;
                packed.extend(&Command::DisablePacking.sequence());
                packed.push(last);
                packed.extend(&Command::EnablePacking.sequence());
                self.stats.record_command();
                self.stats.record_command();
                packed
            }
        };
        trace!(tail = ?self.config.tail, len = packed.len(), "flushed unpaired character");
        self.stats.record_out(packed.len());
        packed
    }

    /// Pack a whole buffer and flush, appending to `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedByte`] if `src` contains `0xFF`. Nothing is
    /// written in that case.
    pub fn encode_into(&mut self, src: &[u8], dst: &mut BytesMut) -> Result<()> {
        if let Some(offset) = src.iter().position(|&c| c == COMMAND_BYTE) {
            return Err(Error::ReservedByte {
                position: self.position + offset,
            });
        }

        dst.reserve(src.len() + MAX_PACKED);
        for &c in src {
            dst.put_slice(self.push(c)?.as_slice());
        }
        dst.put_slice(self.finish().as_slice());
        Ok(())
    }

    /// Pack a whole buffer into a fresh [`Bytes`].
    pub fn encode(&mut self, src: &[u8]) -> Result<Bytes> {
        let mut dst = BytesMut::new();
        self.encode_into(src, &mut dst)?;
        Ok(dst.freeze())
    }

    /// Character waiting for its pair partner.
    #[must_use]
    pub const fn pending(&self) -> Option<u8> {
        self.pending
    }

    /// Alphabet in use
    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Traffic counters
    #[must_use]
    pub const fn stats(&self) -> CodecStats {
        self.stats
    }
}
