//! Streaming packer and unpacker
//!
//! Both halves work one byte at a time with fixed-size outputs, so they can
//! run inside a serial receive loop without allocating. [`encode`] and
//! [`decode`] are whole-buffer shortcuts.

mod config;
mod packer;
mod passthrough;
mod stats;
mod unpacker;

use bytes::Bytes;

pub use config::{CodecConfig, CodecState, PackerConfig, TailPolicy};
pub use packer::{Packed, Packer};
pub use passthrough::{PassThrough, RxFilter};
pub use stats::CodecStats;
pub use unpacker::{DecodeState, Decoded, Unpacker};

use crate::protocol::Result;

/// Pack `text` with the G-code alphabet and lossless tail flush.
///
/// # Errors
///
/// Returns [`Error::ReservedByte`](crate::Error::ReservedByte) if `text`
/// contains `0xFF`.
pub fn encode(text: &[u8]) -> Result<Bytes> {
    Packer::new().encode(text)
}

/// Unpack a complete stream produced by [`encode`].
///
/// The receiver starts with packing enabled, matching a sender that has
/// already negotiated it.
pub fn decode(packed: &[u8]) -> Result<Bytes> {
    Unpacker::with_config(CodecConfig::packed()).decode(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let text = b"G1 X105.25 Y98.4 E0.0123 F1800\nM104 S215\n";
        let packed = encode(text).unwrap();
        assert!(packed.len() < text.len());

        let decoded = decode(&packed).unwrap();
        assert_eq!(decoded.as_ref(), text);
    }

    #[test]
    fn test_odd_length_roundtrip() {
        let text = b"G28\n\n";
        let decoded = decode(&encode(text).unwrap()).unwrap();
        assert_eq!(decoded.as_ref(), text);
    }

    #[test]
    fn test_empty() {
        assert!(encode(b"").unwrap().is_empty());
        assert!(decode(b"").unwrap().is_empty());
    }

    #[test]
    fn test_decode_performance() {
        use std::time::Instant;

        let text = b"G1 X105.25 Y98.4 E0.0123\n".repeat(40);
        let packed = encode(&text).unwrap();

        let start = Instant::now();
        for _ in 0..1000 {
            let _ = decode(&packed).unwrap();
        }
        let elapsed = start.elapsed();

        let avg_micros = elapsed.as_micros() / 1000;
        println!("Average decode time: {avg_micros}μs");

        // ~1 KB of text; generous bound for debug builds on CI
        assert!(avg_micros < 2000, "Decode too slow: {avg_micros}μs");
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use crate::protocol::COMMAND_BYTE;
        use proptest::prelude::*;

        // Text biased toward the alphabet, with arbitrary non-reserved bytes mixed in
        fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
            let gcode = prop::sample::select(b"0123456789. \nGXYZEFM;".to_vec());
            let any_data = 0u8..COMMAND_BYTE;
            prop::collection::vec(prop_oneof![3 => gcode, 1 => any_data], 0..=512)
        }

        proptest! {
            /// Property: packed text always unpacks to the original
            #[test]
            fn prop_roundtrip_preserves_text(text in text_strategy()) {
                let packed = encode(&text).unwrap();
                let decoded = decode(&packed).unwrap();
                prop_assert_eq!(decoded.as_ref(), text.as_slice());
            }

            /// Property: only the tail flush may put a command prefix on the wire
            #[test]
            fn prop_no_prefix_in_pair_output(text in text_strategy()) {
                let even = &text[..text.len() & !1];
                let packed = encode(even).unwrap();
                prop_assert!(packed.windows(2).all(|w| w != [COMMAND_BYTE, COMMAND_BYTE]));
            }

            /// Property: splitting the wire stream anywhere does not change output
            #[test]
            fn prop_split_decode_matches(
                text in text_strategy(),
                split in any::<prop::sample::Index>(),
            ) {
                let packed = encode(&text).unwrap();
                let at = split.index(packed.len() + 1);

                let mut unpacker = Unpacker::with_config(CodecConfig::packed());
                let mut out = bytes::BytesMut::new();
                unpacker.decode_into(&packed[..at], &mut out).unwrap();
                unpacker.decode_into(&packed[at..], &mut out).unwrap();
                prop_assert_eq!(&out[..], text.as_slice());
                prop_assert!(!unpacker.is_pending());
            }
        }
    }
}
