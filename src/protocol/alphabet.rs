//! Packing alphabet and its reverse lookup

use std::fmt;

use super::{COMMAND_BYTE, ESCAPE_NIBBLE, Error, Result};

/// Number of characters addressable by a 4-bit index (index 15 is the escape).
pub const ALPHABET_LEN: usize = 15;

/// Characters that make up roughly 93% of typical slicer output.
const GCODE_CHARS: [u8; ALPHABET_LEN] = *b"0123456789. \nGX";

/// Bijection between 15 byte values and the nibble indices `0..=14`.
///
/// The reverse table maps every byte value to its index, or to
/// [`ESCAPE_NIBBLE`] when the byte must be sent as a literal. Sender and
/// receiver must use the same table.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: [u8; ALPHABET_LEN],
    nibbles: [u8; 256],
}

impl Alphabet {
    /// The G-code tuned table: digits, `.`, space, newline, `G` and `X`.
    pub const GCODE: Self = Self::build(GCODE_CHARS);

    /// Build a custom table.
    ///
    /// # Errors
    ///
    /// Fails if an entry is the reserved [`COMMAND_BYTE`] or appears twice.
    pub fn new(chars: [u8; ALPHABET_LEN]) -> Result<Self> {
        for (position, &c) in chars.iter().enumerate() {
            if c == COMMAND_BYTE {
                return Err(Error::ReservedAlphabetEntry { position });
            }
            if let Some(first) = chars[..position].iter().position(|&prev| prev == c) {
                return Err(Error::DuplicateAlphabetEntry {
                    byte: c,
                    first,
                    second: position,
                });
            }
        }
        Ok(Self::build(chars))
    }

    const fn build(chars: [u8; ALPHABET_LEN]) -> Self {
        let mut nibbles = [ESCAPE_NIBBLE; 256];
        let mut i = 0;
        while i < ALPHABET_LEN {
            nibbles[chars[i] as usize] = i as u8;
            i += 1;
        }
        Self { chars, nibbles }
    }

    /// Index of `c`, or `None` if it has to be escaped.
    #[inline]
    #[must_use]
    pub const fn index_of(&self, c: u8) -> Option<u8> {
        match self.nibbles[c as usize] {
            ESCAPE_NIBBLE => None,
            index => Some(index),
        }
    }

    /// Character stored at `index`. The escape nibble has no character.
    #[inline]
    #[must_use]
    pub const fn char_at(&self, index: u8) -> Option<u8> {
        if (index as usize) < ALPHABET_LEN {
            Some(self.chars[index as usize])
        } else {
            None
        }
    }

    /// Nibble for `c`: its index, or [`ESCAPE_NIBBLE`].
    #[inline]
    pub(crate) const fn nibble_of(&self, c: u8) -> u8 {
        self.nibbles[c as usize]
    }

    /// Whether `c` packs into a nibble.
    #[inline]
    #[must_use]
    pub const fn contains(&self, c: u8) -> bool {
        self.nibbles[c as usize] != ESCAPE_NIBBLE
    }

    /// Table entries in index order.
    #[must_use]
    pub const fn chars(&self) -> &[u8; ALPHABET_LEN] {
        &self.chars
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::GCODE
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet")
            .field(&self.chars.escape_ascii().to_string())
            .finish()
    }
}
