use std::sync::LazyLock;

use charprobe_core::encoding::Encoding;
use charprobe_detect::Detector;
use charprobe_resources::MemoryResourceStore;
use proptest::prelude::*;

/// Every encoding, with weights spread over positive and negative values so
/// rankings are non-trivial.
static STORE: LazyLock<MemoryResourceStore> = LazyLock::new(|| {
    let codes: Vec<u16> = (0u16..512).map(|i| i.wrapping_mul(131)).collect();
    let mut store = MemoryResourceStore::new(codes.clone()).unwrap();
    for (e, &encoding) in Encoding::all().iter().enumerate() {
        let weights = (0..codes.len())
            .map(|i| ((i * 7 + e * 13) % 17) as f32 / 2.0 - 4.0)
            .collect();
        let bias = (e % 5) as f64 - 2.0;
        store.insert_model(encoding, weights, bias).unwrap();
    }
    store
});

fn detector(min_confidence: f64) -> Detector {
    Detector::builder()
        .min_confidence(min_confidence)
        .build(&*STORE)
        .unwrap()
}

proptest! {
    #[test]
    fn probe_is_sorted_and_bounded(content in proptest::collection::vec(any::<u8>(), 0..64)) {
        let probe = detector(0.0).probe(&content);
        for candidate in &probe {
            prop_assert!((0.0..=1.0).contains(&candidate.confidence));
        }
        for pair in probe.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
            if pair[0].confidence == pair[1].confidence {
                prop_assert!(pair[0].encoding < pair[1].encoding);
            }
        }
    }

    #[test]
    fn detect_agrees_with_probe_head(
        content in proptest::collection::vec(any::<u8>(), 0..64),
        threshold in 0.0f64..=1.0,
    ) {
        let detector = detector(threshold);
        let probe = detector.probe(&content);
        let expected = probe
            .first()
            .filter(|top| top.confidence >= threshold)
            .map(|top| top.encoding);
        prop_assert_eq!(detector.detect(&content), expected);
    }

    #[test]
    fn probe_is_pure(content in proptest::collection::vec(any::<u8>(), 0..64)) {
        let detector = detector(0.0);
        prop_assert_eq!(detector.probe(&content), detector.probe(&content));
    }

    #[test]
    fn survivors_decode_the_buffer(content in proptest::collection::vec(any::<u8>(), 0..32)) {
        use charprobe_core::codec::{Codec, StrictCodec};
        for candidate in detector(0.0).probe(&content) {
            prop_assert!(StrictCodec.is_valid(candidate.encoding, &content));
        }
    }

    #[test]
    fn ascii_text_always_yields_a_candidate(text in "[ -~]{0,40}") {
        prop_assert!(!detector(0.0).probe(text.as_bytes()).is_empty());
    }
}
