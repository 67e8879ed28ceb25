//! In-band control commands

use std::fmt;

use super::COMMAND_BYTE;

/// Commands carried on the data channel after a `0xFF 0xFF` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Command {
    /// Flip packing on or off
    TogglePacking = 0b1111_1101,
    /// Turn packing on
    EnablePacking = 0b1111_1011,
    /// Turn packing off
    DisablePacking = 0b1111_1010,
    /// Drop any partially decoded pair
    ResetState = 0b1111_1001,
    /// Ask the receiver to report its configuration
    QueryState = 0b1111_1000,
}

impl Command {
    /// Every command, in code order.
    pub const ALL: [Self; 5] = [
        Self::QueryState,
        Self::ResetState,
        Self::DisablePacking,
        Self::EnablePacking,
        Self::TogglePacking,
    ];

    /// Convert from byte
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0b1111_1101 => Some(Self::TogglePacking),
            0b1111_1011 => Some(Self::EnablePacking),
            0b1111_1010 => Some(Self::DisablePacking),
            0b1111_1001 => Some(Self::ResetState),
            0b1111_1000 => Some(Self::QueryState),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Full wire sequence: prefix followed by the command code.
    #[must_use]
    pub const fn sequence(self) -> [u8; 3] {
        [COMMAND_BYTE, COMMAND_BYTE, self.as_u8()]
    }

    /// Check if this command changes the packing mode
    #[must_use]
    pub const fn changes_packing(self) -> bool {
        matches!(
            self,
            Self::TogglePacking | Self::EnablePacking | Self::DisablePacking
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TogglePacking => "TogglePacking",
            Self::EnablePacking => "EnablePacking",
            Self::DisablePacking => "DisablePacking",
            Self::ResetState => "ResetState",
            Self::QueryState => "QueryState",
        };
        write!(f, "{name}")
    }
}
