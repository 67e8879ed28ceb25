use gcode_pack::{
    COMMAND_BYTE, CodecConfig, Command, Error, Packer, PackerConfig, TailPolicy, Unpacker, decode,
    encode,
};

const SAMPLE: &str = "\
G28 ; home all axes
G1 Z0.2 F3000
G1 X10.5 Y20.25 E0.0421 F1800
G1 X10.9 Y20.61 E0.0038
G1 X11.3 Y21.02 E0.0041
M104 S210
M140 S60
G92 E0
";

#[test]
fn sample_gcode_roundtrips_and_shrinks() {
    let packed = encode(SAMPLE.as_bytes()).unwrap();
    let decoded = decode(&packed).unwrap();
    assert_eq!(decoded.as_ref(), SAMPLE.as_bytes());
    assert!(
        packed.len() * 4 < SAMPLE.len() * 3,
        "packed {} of {} bytes",
        packed.len(),
        SAMPLE.len()
    );
}

#[test]
fn every_non_reserved_byte_roundtrips() {
    let text: Vec<u8> = (0..COMMAND_BYTE).collect();
    let decoded = decode(&encode(&text).unwrap()).unwrap();
    assert_eq!(decoded.as_ref(), text.as_slice());

    let reversed: Vec<u8> = text.iter().rev().copied().collect();
    let decoded = decode(&encode(&reversed).unwrap()).unwrap();
    assert_eq!(decoded.as_ref(), reversed.as_slice());
}

#[test]
fn adversarial_escaped_pairs_never_form_prefix() {
    // Every pair fully escaped, using the byte values closest to the prefix
    let text: Vec<u8> = (0..256).map(|i| 0xF0 + (i % 15) as u8).collect();
    let mut packer = Packer::new();
    let packed = packer.encode(&text).unwrap();

    assert_eq!(packed.len(), text.len() / 2 * 3);
    for window in packed.windows(2) {
        assert_ne!(window, [COMMAND_BYTE, COMMAND_BYTE]);
    }

    let mut unpacker = Unpacker::with_config(CodecConfig::packed());
    let decoded = unpacker.decode(&packed).unwrap();
    assert_eq!(decoded.as_ref(), text.as_slice());
    assert_eq!(unpacker.stats().commands, 0);
}

#[test]
fn reserved_byte_is_refused() {
    let result = encode(b"G1 X\xFF");
    assert_eq!(result, Err(Error::ReservedByte { position: 4 }));
}

#[test]
fn padded_tail_adds_one_filler() {
    let mut packer = Packer::with_config(PackerConfig {
        tail: TailPolicy::Pad(b' '),
    })
    .unwrap();
    let packed = packer.encode(b"G28\n\n").unwrap();
    assert_eq!(decode(&packed).unwrap().as_ref(), b"G28\n\n ");
}

#[test]
fn unpacked_tail_leaves_receiver_packing() {
    let mut wire = Command::EnablePacking.sequence().to_vec();
    wire.extend_from_slice(&encode(b"G1\n").unwrap());
    wire.extend_from_slice(&encode(b"G0\n").unwrap());

    let mut unpacker = Unpacker::new();
    let decoded = unpacker.decode(&wire).unwrap();
    assert_eq!(decoded.as_ref(), b"G1\nG0\n");
    assert!(unpacker.config().packing_enabled);
    assert!(!unpacker.is_pending());
}

#[test]
fn streaming_push_matches_whole_buffer() {
    let mut packer = Packer::new();
    let mut streamed = Vec::new();
    for &c in SAMPLE.as_bytes() {
        streamed.extend_from_slice(packer.push(c).unwrap().as_slice());
    }
    streamed.extend_from_slice(packer.finish().as_slice());

    assert_eq!(streamed, encode(SAMPLE.as_bytes()).unwrap().to_vec());
}

#[test]
fn trailing_prefix_byte_stays_pending() {
    let mut unpacker = Unpacker::with_config(CodecConfig::packed());
    let decoded = unpacker.decode(&[0x1D, COMMAND_BYTE]).unwrap();
    assert_eq!(decoded.as_ref(), b"G1");
    assert!(unpacker.is_pending());
}
