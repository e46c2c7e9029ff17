use criterion::{black_box, criterion_group, criterion_main, Criterion};

use charprobe_core::encoding::Encoding;
use charprobe_detect::{Detector, FeatureVector};
use charprobe_resources::{FeatureVocabulary, MemoryResourceStore};

/// Vocabulary of every printable-ASCII pair and of the top 64 bytes, ~25K codes.
fn build_store() -> MemoryResourceStore {
    let mut codes = Vec::new();
    for first in (0x20u8..0x7F).chain(0xC0..=0xFF) {
        for second in (0x20u8..0x7F).chain(0xC0..=0xFF) {
            codes.push(FeatureVocabulary::feature_code(first, second));
        }
    }
    let mut store = MemoryResourceStore::new(codes.clone()).unwrap();
    for (e, &encoding) in Encoding::all().iter().enumerate() {
        let weights = (0..codes.len())
            .map(|i| ((i + e) % 11) as f32 / 4.0 - 1.25)
            .collect();
        store.insert_model(encoding, weights, -1.0).unwrap();
    }
    store
}

/// ~4KB of mixed Latin and Cyrillic text in windows-1251.
fn sample_text() -> Vec<u8> {
    let text = "The quick brown fox. Съешь же ещё этих мягких французских булок. ".repeat(50);
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(&text);
    bytes.into_owned()
}

fn bench_extract(c: &mut Criterion) {
    let store = build_store();
    let detector = Detector::new(&store).unwrap();
    let vocabulary = charprobe_resources::ResourceStore::vocabulary(&store).unwrap();
    let content = sample_text();
    assert_eq!(detector.vocabulary_len(), vocabulary.len());

    c.bench_function("extract_4kb", |b| {
        b.iter(|| FeatureVector::extract(black_box(&content), &vocabulary));
    });
}

fn bench_probe(c: &mut Criterion) {
    let store = build_store();
    let detector = Detector::new(&store).unwrap();
    let content = sample_text();

    c.bench_function("probe_4kb_all_encodings", |b| {
        b.iter(|| detector.probe(black_box(&content)));
    });
}

fn bench_detect_batch(c: &mut Criterion) {
    let store = build_store();
    let detector = Detector::new(&store).unwrap();
    let contents: Vec<Vec<u8>> = (0..64).map(|_| sample_text()).collect();

    c.bench_function("detect_batch_64x4kb", |b| {
        b.iter(|| detector.detect_batch(black_box(&contents)));
    });
}

criterion_group!(benches, bench_extract, bench_probe, bench_detect_batch);
criterion_main!(benches);
