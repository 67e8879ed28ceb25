//! Packed G-code wire format
//!
//! Every packed byte carries two characters. The low nibble holds the alphabet
//! index of the first character and the high nibble the index of the second:
//!
//! ```text
//!  7      4 3      0
//! ┌────────┬────────┐
//! │ second │ first  │   0x0..=0xE  alphabet index
//! │ index  │ index  │   0xF        literal byte follows
//! └────────┴────────┘
//! ```
//!
//! Escaped characters follow the packed byte as literal bytes, first character
//! before second. A packed byte of `0xFF` means both characters are literals,
//! unless it is immediately followed by another `0xFF`: that pair is the command
//! prefix and the next byte is a [`Command`] code.

mod alphabet;
mod command;
mod error;

pub use alphabet::{ALPHABET_LEN, Alphabet};
pub use command::Command;
pub use error::{Error, Result};

/// Command prefix byte. Also the packed byte for a fully escaped pair.
pub const COMMAND_BYTE: u8 = 0xFF;

/// Nibble value that marks a character as sent in full width.
pub const ESCAPE_NIBBLE: u8 = 0x0F;

/// Packed byte mask: the first character follows as a literal.
pub const FIRST_NOT_PACKED: u8 = 0x0F;

/// Packed byte mask: the second character follows as a literal.
pub const SECOND_NOT_PACKED: u8 = 0xF0;

/// Combine two nibbles into a packed byte.
#[inline]
#[must_use]
pub const fn pack_nibbles(first: u8, second: u8) -> u8 {
    ((second & 0x0F) << 4) | (first & 0x0F)
}

/// Nibble carrying the first character of a packed byte.
#[inline]
#[must_use]
pub const fn first_nibble(packed: u8) -> u8 {
    packed & FIRST_NOT_PACKED
}

/// Nibble carrying the second character of a packed byte.
#[inline]
#[must_use]
pub const fn second_nibble(packed: u8) -> u8 {
    (packed & SECOND_NOT_PACKED) >> 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_layout() {
        let packed = pack_nibbles(0x3, 0xB);
        assert_eq!(packed, 0xB3);
        assert_eq!(first_nibble(packed), 0x3);
        assert_eq!(second_nibble(packed), 0xB);
    }

    #[test]
    fn test_fully_escaped_pair_is_command_byte() {
        assert_eq!(pack_nibbles(ESCAPE_NIBBLE, ESCAPE_NIBBLE), COMMAND_BYTE);
        assert_eq!(FIRST_NOT_PACKED | SECOND_NOT_PACKED, COMMAND_BYTE);
    }
}
