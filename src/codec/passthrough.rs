//! Receive-path abstraction
//!
//! Transports hold an [`RxFilter`] so a build without packing support can
//! substitute [`PassThrough`] for the [`Unpacker`].

use super::{Decoded, Unpacker};
use crate::protocol::Result;

/// Per-byte receive filter.
pub trait RxFilter {
    /// Feed one received byte.
    fn handle_byte(&mut self, raw: u8) -> Result<Decoded>;

    /// Drop any partially received input.
    fn reset(&mut self);
}

impl RxFilter for Unpacker {
    fn handle_byte(&mut self, raw: u8) -> Result<Decoded> {
        Unpacker::handle_byte(self, raw)
    }

    fn reset(&mut self) {
        Unpacker::reset(self);
    }
}

/// Filter that hands every byte through unchanged, command bytes included.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl RxFilter for PassThrough {
    fn handle_byte(&mut self, raw: u8) -> Result<Decoded> {
        Ok(Decoded::one(raw))
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecConfig;
    use crate::protocol::Command;

    fn drain(filter: &mut dyn RxFilter, bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .flat_map(|&b| filter.handle_byte(b).unwrap())
            .collect()
    }

    #[test]
    fn test_passthrough_is_identity() {
        let mut filter = PassThrough;
        let input: Vec<u8> = (0..=u8::MAX).collect();
        assert_eq!(drain(&mut filter, &input), input);
    }

    #[test]
    fn test_unpacker_behind_trait() {
        let mut filter = Unpacker::with_config(CodecConfig::packed());
        let mut input = vec![0x1D];
        input.extend_from_slice(&Command::DisablePacking.sequence());
        input.extend_from_slice(b"M2");
        assert_eq!(drain(&mut filter, &input), b"G1M2");
    }
}
