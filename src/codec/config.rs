//! Codec configuration

use std::fmt;

use crate::protocol::{COMMAND_BYTE, Error, Result};

/// Receiver configuration, changed at runtime by packing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecConfig {
    /// Decode bytes as packed pairs. Off until the sender enables it.
    pub packing_enabled: bool,
}

impl CodecConfig {
    /// Configuration with packing already on.
    #[must_use]
    pub const fn packed() -> Self {
        Self {
            packing_enabled: true,
        }
    }
}

/// How the packer flushes a trailing unpaired character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TailPolicy {
    /// Switch packing off, send the character raw, switch packing back on.
    /// Lossless, costs seven bytes.
    #[default]
    Unpacked,
    /// Pair the character with a filler byte. The receiver sees one extra
    /// character, so only use this when the consumer ignores it.
    Pad(u8),
}

/// Sender configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackerConfig {
    /// Odd-length flush convention.
    pub tail: TailPolicy,
}

impl PackerConfig {
    /// Reject settings the receiver could not tell apart from a command.
    pub(crate) fn validate(&self) -> Result<()> {
        match self.tail {
            TailPolicy::Pad(COMMAND_BYTE) => Err(Error::ReservedPad),
            _ => Ok(()),
        }
    }
}

/// Receiver state as reported in answer to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecState {
    /// Current packing mode
    pub packing_enabled: bool,
    /// A pair or command is partially received
    pub pending: bool,
}

impl fmt::Display for CodecState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.packing_enabled {
            write!(f, "[MP] ON")
        } else {
            write!(f, "[MP] OFF")
        }
    }
}
