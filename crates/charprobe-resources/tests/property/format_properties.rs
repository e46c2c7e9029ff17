//! Property tests for the table parsers: arbitrary input never panics and
//! well-formed input is read back in order.

use charprobe_resources::format;
use proptest::prelude::*;

proptest! {
    #[test]
    fn vocabulary_decode_accepts_only_even_lengths(raw in proptest::collection::vec(any::<u8>(), 0..256)) {
        match format::decode_vocabulary(&raw, "features") {
            Ok(codes) => {
                prop_assert_eq!(raw.len() % 2, 0);
                prop_assert_eq!(codes.len(), raw.len() / 2);
            }
            Err(_) => prop_assert_eq!(raw.len() % 2, 1),
        }
    }

    #[test]
    fn vocabulary_bytes_survive_encoding(codes in proptest::collection::vec(any::<u16>(), 0..128)) {
        let raw = format::encode_vocabulary(&codes);
        prop_assert_eq!(format::decode_vocabulary(&raw, "features").unwrap(), codes);
    }

    #[test]
    fn bias_parser_never_panics(text in "\\PC*") {
        let _ = format::parse_biases(&text, "biases");
    }

    #[test]
    fn half_precision_values_are_exact(bits in proptest::collection::vec(any::<u16>(), 0..64)) {
        let raw: Vec<u8> = bits.iter().flat_map(|b| b.to_be_bytes()).collect();
        let weights = format::decode_weights(&raw, "weights").unwrap();
        // Every finite f16 is exactly representable as f32.
        for (w, b) in weights.iter().zip(&bits) {
            if w.is_finite() {
                prop_assert_eq!(half::f16::from_f32(*w).to_bits(), *b);
            }
        }
    }
}
