use charprobe_core::codec::{Codec, StrictCodec};
use charprobe_core::encoding::Encoding;
use proptest::prelude::*;

fn any_encoding() -> impl Strategy<Value = Encoding> {
    proptest::sample::select(Encoding::all().to_vec())
}

proptest! {
    #[test]
    fn validity_matches_decode(encoding in any_encoding(), content in proptest::collection::vec(any::<u8>(), 0..64)) {
        let decoded = StrictCodec.decode(encoding, &content);
        prop_assert_eq!(StrictCodec.is_valid(encoding, &content), decoded.is_some());
    }

    #[test]
    fn utf8_agrees_with_std(content in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(
            StrictCodec.is_valid(Encoding::Utf8, &content),
            std::str::from_utf8(&content).is_ok()
        );
    }

    #[test]
    fn latin1_accepts_everything(content in proptest::collection::vec(any::<u8>(), 0..64)) {
        let decoded = StrictCodec.decode(Encoding::Latin1, &content).unwrap();
        prop_assert_eq!(decoded.chars().count(), content.len());
    }

    #[test]
    fn lookup_ignores_case_and_separators(encoding in any_encoding(), upper in any::<bool>()) {
        let name = encoding.name().replace('_', "-");
        let name = if upper { name.to_uppercase() } else { name };
        prop_assert_eq!(Encoding::lookup(&name), Some(encoding));
    }

    #[test]
    fn seven_bit_encodings_reject_high_bytes(
        mut content in proptest::collection::vec(0u8..0x80, 0..32),
        high in 0x80u8..=0xFF,
        at in any::<proptest::sample::Index>(),
    ) {
        let position = at.index(content.len() + 1);
        content.insert(position, high);
        for encoding in [Encoding::Ascii, Encoding::Utf7, Encoding::Hz, Encoding::Iso2022Kr, Encoding::Iso2022Jp] {
            prop_assert!(!StrictCodec.is_valid(encoding, &content), "{}", encoding);
        }
    }
}
