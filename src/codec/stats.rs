//! Per-instance traffic counters

/// Counters kept by a packer or unpacker.
///
/// For an [`Unpacker`](super::Unpacker) `bytes_in` counts wire bytes and
/// `bytes_out` decoded characters; for a [`Packer`](super::Packer) it is the
/// other way round.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecStats {
    /// Bytes consumed
    pub bytes_in: u64,
    /// Bytes produced
    pub bytes_out: u64,
    /// Commands applied (received or triggered)
    pub commands: u64,
    /// Desync faults
    pub protocol_errors: u64,
}

impl CodecStats {
    #[inline]
    pub(crate) fn record_in(&mut self, count: usize) {
        self.bytes_in += count as u64;
    }

    #[inline]
    pub(crate) fn record_out(&mut self, count: usize) {
        self.bytes_out += count as u64;
    }

    #[inline]
    pub(crate) fn record_command(&mut self) {
        self.commands += 1;
    }

    #[inline]
    pub(crate) fn record_error(&mut self) {
        self.protocol_errors += 1;
    }

    /// Output bytes per input byte, `None` before any input.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> Option<f64> {
        if self.bytes_in == 0 {
            return None;
        }
        Some(self.bytes_out as f64 / self.bytes_in as f64)
    }
}
