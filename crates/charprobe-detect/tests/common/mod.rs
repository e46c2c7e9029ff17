//! Shared fixtures for detector integration tests.
//!
//! Real model tables are large, so tests build synthetic ones: each
//! sampled encoding gets a positive weight on every bigram of its sample
//! text, and every other encoding gets zero weights and a negative bias.

#![allow(dead_code)]

use charprobe_core::codec::{Codec, StrictCodec};
use charprobe_core::encoding::Encoding;
use charprobe_resources::{FeatureVocabulary, MemoryResourceStore};

pub const SAMPLE_WEIGHT: f32 = 4.0;
pub const UNSAMPLED_BIAS: f64 = -2.0;

/// Distinct bigram codes of `content`, in first-seen order.
pub fn bigrams(content: &[u8]) -> Vec<u16> {
    let mut codes = Vec::new();
    for pair in content.windows(2) {
        let code = FeatureVocabulary::feature_code(pair[0], pair[1]);
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

/// Store covering every encoding, trained on `samples`.
pub fn sample_store(samples: &[(Encoding, Vec<u8>)]) -> MemoryResourceStore {
    let mut codes: Vec<u16> = Vec::new();
    for (_, bytes) in samples {
        for code in bigrams(bytes) {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
    }

    let mut store = MemoryResourceStore::new(codes.clone()).unwrap();
    for &encoding in Encoding::all() {
        let sampled: Vec<u16> = samples
            .iter()
            .filter(|(e, _)| *e == encoding)
            .flat_map(|(_, bytes)| bigrams(bytes))
            .collect();
        let bias = if sampled.is_empty() { UNSAMPLED_BIAS } else { 0.0 };
        let weights = codes
            .iter()
            .map(|code| if sampled.contains(code) { SAMPLE_WEIGHT } else { 0.0 })
            .collect();
        store.insert_model(encoding, weights, bias).unwrap();
    }
    store
}

/// Store covering every encoding with all-zero weights and one bias.
pub fn flat_store(codes: Vec<u16>, bias: f64) -> MemoryResourceStore {
    let len = codes.len();
    let mut store = MemoryResourceStore::new(codes).unwrap();
    for &encoding in Encoding::all() {
        store.insert_model(encoding, vec![0.0; len], bias).unwrap();
    }
    store
}

/// Encode `text` with an `encoding_rs` encoder, failing on unmappable text.
pub fn encode(encoding: &'static encoding_rs::Encoding, text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding.encode(text);
    assert!(!had_errors, "{text:?} is not representable in {}", encoding.name());
    bytes.into_owned()
}

/// UTF-16 little-endian with a leading byte order mark.
pub fn utf16_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    bytes
}

pub fn utf32_le(text: &str) -> Vec<u8> {
    text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect()
}

/// Fold look-alike symbols that different character sets map differently:
/// wave dashes and fullwidth tildes become `~`, and horizontal bars, em
/// dashes, minus signs and fullwidth hyphens become `-`.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '∼' | '～' | '〜' => '~',
            '―' | '—' | '−' | '－' => '-',
            other => other,
        })
        .collect()
}

/// A detection is correct when decoding `content` under the detected
/// encoding reproduces `expected` up to [`normalize_text`].
pub fn is_correct_encoding(content: &[u8], detected: Option<Encoding>, expected: &str) -> bool {
    let Some(detected) = detected else {
        return false;
    };
    StrictCodec
        .decode(detected, content)
        .is_some_and(|decoded| normalize_text(&decoded) == normalize_text(expected))
}
