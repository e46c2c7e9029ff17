//! FileResourceStore tests: on-disk layout, memoization, and every failure
//! path a corrupt or incomplete resource directory can hit.

use std::path::Path;
use std::sync::Arc;
use std::thread;

use charprobe_core::config::CharprobeConfig;
use charprobe_core::encoding::Encoding;
use charprobe_core::errors::{ConfigError, DetectorError, ResourceError};
use charprobe_resources::format;
use charprobe_resources::{FileResourceStore, LoadCounts, ResourceStore};
use tempfile::TempDir;

const CODES: [u16; 3] = [0x6869, 0x6C6C, 0xCFF0];

fn write_gz(path: &Path, raw: &[u8]) {
    let compressed = format::gzip(raw, "test").unwrap();
    std::fs::write(path, compressed).unwrap();
}

/// Write a complete resource directory with models for ascii and cp1251.
fn resource_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    std::fs::create_dir(root.join("weights")).unwrap();

    write_gz(&root.join("features.gzip"), &format::encode_vocabulary(&CODES));
    write_gz(
        &root.join("biases.gzip"),
        format::format_biases([(Encoding::Ascii, -1.5), (Encoding::Cp1251, 0.25)]).as_bytes(),
    );
    write_gz(
        &root.join("weights").join("ascii.gzip"),
        &format::encode_weights(&[1.0, 0.5, -2.0]),
    );
    write_gz(
        &root.join("weights").join("cp1251.gzip"),
        &format::encode_weights(&[-1.0, 0.0, 3.0]),
    );
    dir
}

#[test]
fn open_rejects_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let err = FileResourceStore::open(&missing).unwrap_err();
    assert!(matches!(err, ResourceError::NotFound { .. }));
}

#[test]
fn open_reads_nothing() {
    let dir = resource_dir();
    let store = FileResourceStore::open(dir.path()).unwrap();
    assert_eq!(store.load_counts(), LoadCounts::default());
    assert_eq!(store.root(), dir.path());
}

#[test]
fn loads_vocabulary_and_models() {
    let dir = resource_dir();
    let store = FileResourceStore::open(dir.path()).unwrap();

    let vocabulary = store.vocabulary().unwrap();
    assert_eq!(vocabulary.codes(), &CODES);

    let ascii = store.model(Encoding::Ascii).unwrap();
    assert_eq!(ascii.weights(), &[1.0, 0.5, -2.0]);
    assert_eq!(ascii.bias(), -1.5);

    let cp1251 = store.model(Encoding::Cp1251).unwrap();
    assert_eq!(cp1251.weights(), &[-1.0, 0.0, 3.0]);
    assert_eq!(cp1251.bias(), 0.25);
}

#[test]
fn repeated_requests_hit_the_cache() {
    let dir = resource_dir();
    let store = FileResourceStore::open(dir.path()).unwrap();

    let first = store.model(Encoding::Ascii).unwrap();
    let second = store.model(Encoding::Ascii).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(
        &store.vocabulary().unwrap(),
        &store.vocabulary().unwrap()
    ));

    store.model(Encoding::Cp1251).unwrap();
    assert_eq!(
        store.load_counts(),
        LoadCounts {
            vocabulary: 1,
            biases: 1,
            weights: 2
        }
    );
}

#[test]
fn concurrent_first_requests_load_once() {
    let dir = resource_dir();
    let store = Arc::new(FileResourceStore::open(dir.path()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let encoding = if i % 2 == 0 {
                    Encoding::Ascii
                } else {
                    Encoding::Cp1251
                };
                store.model(encoding).unwrap()
            })
        })
        .collect();
    let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let counts = store.load_counts();
    assert_eq!(counts.vocabulary, 1);
    assert_eq!(counts.biases, 1);
    assert_eq!(counts.weights, 2);

    // Every thread asking for the same encoding got the same instance.
    for pair in models.chunks(2).collect::<Vec<_>>().windows(2) {
        assert!(Arc::ptr_eq(&pair[0][0], &pair[1][0]));
        assert!(Arc::ptr_eq(&pair[0][1], &pair[1][1]));
    }
}

#[test]
fn models_batch_in_canonical_order() {
    let dir = resource_dir();
    let store = FileResourceStore::open(dir.path()).unwrap();
    let models = store.models(&[Encoding::Cp1251, Encoding::Ascii]).unwrap();
    let keys: Vec<Encoding> = models.keys().copied().collect();
    assert_eq!(keys, vec![Encoding::Ascii, Encoding::Cp1251]);
}

#[test]
fn missing_weight_file() {
    let dir = resource_dir();
    let store = FileResourceStore::open(dir.path()).unwrap();
    let err = store.model(Encoding::Koi8R).unwrap_err();
    // koi8_r has neither bias nor weights; the bias is checked first.
    assert_eq!(
        err,
        ResourceError::MissingBias {
            encoding: "koi8_r".to_string()
        }
    );

    std::fs::remove_file(dir.path().join("weights").join("ascii.gzip")).unwrap();
    let err = store.model(Encoding::Ascii).unwrap_err();
    assert!(matches!(err, ResourceError::NotFound { ref path } if path.ends_with("ascii.gzip")));
}

#[test]
fn failed_load_is_retried() {
    let dir = resource_dir();
    let weights = dir.path().join("weights").join("ascii.gzip");
    let saved = std::fs::read(&weights).unwrap();
    std::fs::remove_file(&weights).unwrap();

    let store = FileResourceStore::open(dir.path()).unwrap();
    assert!(store.model(Encoding::Ascii).is_err());
    assert_eq!(store.load_counts().weights, 0);

    std::fs::write(&weights, saved).unwrap();
    assert!(store.model(Encoding::Ascii).is_ok());
    assert_eq!(store.load_counts().weights, 1);
}

#[test]
fn length_mismatch_is_reported() {
    let dir = resource_dir();
    write_gz(
        &dir.path().join("weights").join("ascii.gzip"),
        &format::encode_weights(&[1.0, 2.0]),
    );
    let store = FileResourceStore::open(dir.path()).unwrap();
    assert_eq!(
        store.model(Encoding::Ascii).unwrap_err(),
        ResourceError::LengthMismatch {
            encoding: "ascii".to_string(),
            expected: 3,
            actual: 2
        }
    );
}

#[test]
fn corrupt_gzip_is_reported() {
    let dir = resource_dir();
    std::fs::write(dir.path().join("features.gzip"), b"plain bytes").unwrap();
    let store = FileResourceStore::open(dir.path()).unwrap();
    assert!(matches!(
        store.vocabulary(),
        Err(ResourceError::Corrupt { .. })
    ));
    // Models depend on the vocabulary, so they fail the same way.
    assert!(matches!(
        store.model(Encoding::Ascii),
        Err(ResourceError::Corrupt { .. })
    ));
}

#[test]
fn non_finite_weight_is_rejected() {
    let dir = resource_dir();
    write_gz(
        &dir.path().join("weights").join("cp1251.gzip"),
        &format::encode_weights(&[0.0, f32::INFINITY, 0.0]),
    );
    let store = FileResourceStore::open(dir.path()).unwrap();
    assert!(matches!(
        store.model(Encoding::Cp1251),
        Err(ResourceError::NonFiniteValue { index: 1, .. })
    ));
}

#[test]
fn malformed_bias_table() {
    let dir = resource_dir();
    write_gz(&dir.path().join("biases.gzip"), b"ascii not-a-number\n");
    let store = FileResourceStore::open(dir.path()).unwrap();
    assert!(matches!(
        store.model(Encoding::Ascii),
        Err(ResourceError::Corrupt { .. })
    ));
}

#[test]
fn from_config_requires_directory() {
    let config = CharprobeConfig::default();
    let err = FileResourceStore::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        DetectorError::Config(ConfigError::ValidationFailed { .. })
    ));

    let dir = resource_dir();
    let mut config = CharprobeConfig::default();
    config.resources.directory = Some(dir.path().to_path_buf());
    let store = FileResourceStore::from_config(&config).unwrap();
    assert!(store.model(Encoding::Ascii).is_ok());
}
