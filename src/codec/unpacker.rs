//! Receive-side state machine
//!
//! [`Unpacker::handle_byte`] consumes one wire byte per call and yields zero,
//! one or two characters. Command detection shares the same dispatch: a single
//! `0xFF` parks the decoder in [`DecodeState::PendingPrefix`] until the next
//! byte tells a fully escaped pair apart from a command prefix.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use super::{CodecConfig, CodecState, CodecStats};
use crate::protocol::{
    Alphabet, COMMAND_BYTE, Command, Error, Result, first_nibble, second_nibble,
};

/// Progress through the current pair or command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeState {
    /// Ready for a packed byte or the start of a command prefix
    #[default]
    Idle,
    /// One `0xFF` seen: fully escaped pair, or first half of a command prefix
    PendingPrefix,
    /// First character emitted, next byte is the literal second character
    AwaitLiteral2,
    /// Next byte is the literal first character, second already decoded
    AwaitLiteral1ThenBuffered2 {
        /// Decoded second character held back until the first arrives
        second: u8,
    },
    /// Command prefix complete, next byte is a command code
    AwaitCommandByte,
}

/// Characters produced by one received byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoded {
    chars: [u8; 2],
    len: u8,
    command: Option<Command>,
}

impl Decoded {
    const EMPTY: Self = Self {
        chars: [0; 2],
        len: 0,
        command: None,
    };

    pub(crate) const fn one(c: u8) -> Self {
        Self {
            chars: [c, 0],
            len: 1,
            command: None,
        }
    }

    const fn two(first: u8, second: u8) -> Self {
        Self {
            chars: [first, second],
            len: 2,
            command: None,
        }
    }

    const fn applied(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Self::EMPTY
        }
    }

    /// Decoded characters, in stream order.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.chars[..self.len as usize]
    }

    /// Number of characters (0 to 2).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// No characters were produced.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Command completed by this byte.
    ///
    /// [`Command::QueryState`] is the transport's cue to send
    /// [`Unpacker::report`] upstream.
    #[must_use]
    pub const fn command(&self) -> Option<Command> {
        self.command
    }
}

impl AsRef<[u8]> for Decoded {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl IntoIterator for Decoded {
    type Item = u8;
    type IntoIter = std::iter::Take<std::array::IntoIter<u8, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars.into_iter().take(self.len as usize)
    }
}

/// Decoder for one packed stream.
#[derive(Debug, Clone, Default)]
pub struct Unpacker {
    alphabet: Alphabet,
    config: CodecConfig,
    state: DecodeState,
    stats: CodecStats,
}

impl Unpacker {
    /// G-code alphabet, packing off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// G-code alphabet with an explicit starting configuration.
    #[must_use]
    pub fn with_config(config: CodecConfig) -> Self {
        Self::with_alphabet(Alphabet::GCODE, config)
    }

    /// Custom alphabet; must match the sender's.
    #[must_use]
    pub fn with_alphabet(alphabet: Alphabet, config: CodecConfig) -> Self {
        Self {
            alphabet,
            config,
            state: DecodeState::Idle,
            stats: CodecStats::default(),
        }
    }

    /// Feed one received byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] or [`Error::ReservedLiteral`] when the
    /// stream is out of sync. Any partial pair is discarded. After an unknown
    /// command the decoder is [`DecodeState::Idle`]; a `0xFF` in place of a
    /// literal can only start a command prefix, so it leaves the decoder in
    /// [`DecodeState::PendingPrefix`].
    pub fn handle_byte(&mut self, raw: u8) -> Result<Decoded> {
        self.stats.record_in(1);
        match self.step(raw) {
            Ok(decoded) => {
                self.stats.record_out(decoded.len());
                Ok(decoded)
            }
            Err(err) => {
                self.stats.record_error();
                debug!(error = %err, state = ?self.state, "stream desync, pair discarded");
                Err(err)
            }
        }
    }

    fn step(&mut self, raw: u8) -> Result<Decoded> {
        match self.state {
            DecodeState::Idle if self.config.packing_enabled => Ok(self.unpack(raw)),
            DecodeState::Idle if raw == COMMAND_BYTE => {
                self.state = DecodeState::PendingPrefix;
                Ok(Decoded::EMPTY)
            }
            DecodeState::Idle => Ok(Decoded::one(raw)),
            DecodeState::PendingPrefix if raw == COMMAND_BYTE => {
                self.state = DecodeState::AwaitCommandByte;
                Ok(Decoded::EMPTY)
            }
            DecodeState::PendingPrefix if self.config.packing_enabled => {
                self.state = DecodeState::AwaitLiteral2;
                Ok(Decoded::one(raw))
            }
            DecodeState::PendingPrefix => {
                // A lone 0xFF in raw mode was ordinary data.
                self.state = DecodeState::Idle;
                Ok(Decoded::two(COMMAND_BYTE, raw))
            }
            DecodeState::AwaitLiteral2 => {
                if raw == COMMAND_BYTE {
                    self.state = DecodeState::PendingPrefix;
                    return Err(Error::ReservedLiteral { slot: "second" });
                }
                self.state = DecodeState::Idle;
                Ok(Decoded::one(raw))
            }
            DecodeState::AwaitLiteral1ThenBuffered2 { second } => {
                if raw == COMMAND_BYTE {
                    self.state = DecodeState::PendingPrefix;
                    return Err(Error::ReservedLiteral { slot: "first" });
                }
                self.state = DecodeState::Idle;
                Ok(Decoded::two(raw, second))
            }
            // Extra prefix bytes are absorbed so a command always resyncs.
            DecodeState::AwaitCommandByte if raw == COMMAND_BYTE => Ok(Decoded::EMPTY),
            DecodeState::AwaitCommandByte => {
                self.state = DecodeState::Idle;
                let command = Command::from_u8(raw).ok_or(Error::UnknownCommand { code: raw })?;
                self.apply(command);
                Ok(Decoded::applied(command))
            }
        }
    }

    fn unpack(&mut self, packed: u8) -> Decoded {
        let first = self.alphabet.char_at(first_nibble(packed));
        let second = self.alphabet.char_at(second_nibble(packed));
        match (first, second) {
            (Some(first), Some(second)) => Decoded::two(first, second),
            (Some(first), None) => {
                self.state = DecodeState::AwaitLiteral2;
                Decoded::one(first)
            }
            (None, Some(second)) => {
                self.state = DecodeState::AwaitLiteral1ThenBuffered2 { second };
                Decoded::EMPTY
            }
            // Both escaped is the 0xFF byte itself.
            (None, None) => {
                self.state = DecodeState::PendingPrefix;
                Decoded::EMPTY
            }
        }
    }

    /// Apply a command as if it had been received on the wire.
    ///
    /// For use by code that configures the codec locally, e.g. at startup.
    pub fn trigger(&mut self, command: Command) {
        self.apply(command);
    }

    fn apply(&mut self, command: Command) {
        self.stats.record_command();
        match command {
            Command::TogglePacking => self.set_packing(!self.config.packing_enabled),
            Command::EnablePacking => self.set_packing(true),
            Command::DisablePacking => self.set_packing(false),
            Command::ResetState => self.reset(),
            Command::QueryState => {}
        }
        trace!(%command, state = %self.report(), "command applied");
    }

    fn set_packing(&mut self, enabled: bool) {
        self.config.packing_enabled = enabled;
        self.state = DecodeState::Idle;
    }

    /// Drop any partially received pair or command.
    pub fn reset(&mut self) {
        self.state = DecodeState::Idle;
    }

    /// Decode a buffer, appending characters to `dst`.
    ///
    /// Returns the number of characters appended. A pair split across calls
    /// is carried over.
    ///
    /// # Errors
    ///
    /// Stops at the first desync; characters decoded before it stay in `dst`.
    pub fn decode_into(&mut self, src: &[u8], dst: &mut BytesMut) -> Result<usize> {
        let start = dst.len();
        dst.reserve(src.len() * 2);
        for &raw in src {
            let decoded = self.handle_byte(raw)?;
            dst.put_slice(decoded.as_slice());
        }
        Ok(dst.len() - start)
    }

    /// Decode a buffer into a fresh [`Bytes`].
    pub fn decode(&mut self, src: &[u8]) -> Result<Bytes> {
        let mut dst = BytesMut::new();
        self.decode_into(src, &mut dst)?;
        Ok(dst.freeze())
    }

    /// Snapshot for a query response.
    #[must_use]
    pub fn report(&self) -> CodecState {
        CodecState {
            packing_enabled: self.config.packing_enabled,
            pending: self.is_pending(),
        }
    }

    /// Part of a pair or command is still outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state != DecodeState::Idle
    }

    /// Current decode state
    #[must_use]
    pub const fn state(&self) -> DecodeState {
        self.state
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> CodecConfig {
        self.config
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
