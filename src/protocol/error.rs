//! Codec error types

use thiserror::Error;

/// Packing and unpacking errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Byte after the command prefix is not a known command
    #[error("unknown command code {code:#04x} after command prefix")]
    UnknownCommand {
        /// Received code
        code: u8,
    },

    /// Reserved byte received where a literal character was expected
    #[error("reserved byte 0xff received in place of the {slot} literal character")]
    ReservedLiteral {
        /// Which character of the pair was pending (`"first"` or `"second"`)
        slot: &'static str,
    },

    /// Input text contains the reserved command byte
    #[error("input byte at position {position} is the reserved command byte 0xff")]
    ReservedByte {
        /// Offset of the byte in the packer's input stream
        position: usize,
    },

    /// Alphabet entry equals the reserved command byte
    #[error("alphabet entry {position} is the reserved command byte 0xff")]
    ReservedAlphabetEntry {
        /// Entry index
        position: usize,
    },

    /// Alphabet maps the same byte twice
    #[error("alphabet entries {first} and {second} both hold {byte:#04x}")]
    DuplicateAlphabetEntry {
        /// Repeated byte
        byte: u8,
        /// First index holding it
        first: usize,
        /// Second index holding it
        second: usize,
    },

    /// Tail padding byte is the reserved command byte
    #[error("tail padding byte cannot be the reserved command byte 0xff")]
    ReservedPad,
}

impl Error {
    /// Whether the receiver lost sync with the sender.
    #[must_use]
    pub const fn is_desync(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. } | Self::ReservedLiteral { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
