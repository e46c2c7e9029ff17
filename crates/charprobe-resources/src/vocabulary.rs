//! Shared feature vocabulary.

use std::fmt;

use charprobe_core::errors::ResourceError;

const NO_INDEX: u32 = u32::MAX;
const CODE_SPACE: usize = 1 << 16;

/// Ordered set of distinct two-byte feature codes.
///
/// A code is `256 * first + second` for a pair of consecutive bytes. The
/// position of a code in load order is its dense index, and index `k` of
/// every weight vector refers to the same code.
pub struct FeatureVocabulary {
    codes: Vec<u16>,
    /// code → dense index, `NO_INDEX` when absent.
    index: Box<[u32]>,
}

impl FeatureVocabulary {
    /// Build a vocabulary from codes in index order. Duplicate codes are
    /// rejected since they would make two indices share one feature.
    pub fn new(codes: Vec<u16>) -> Result<Self, ResourceError> {
        let mut index = vec![NO_INDEX; CODE_SPACE].into_boxed_slice();
        for (position, &code) in codes.iter().enumerate() {
            let slot = &mut index[usize::from(code)];
            if *slot != NO_INDEX {
                return Err(ResourceError::Corrupt {
                    resource: "vocabulary".to_string(),
                    message: format!("duplicate feature code {code:#06x} at index {position}"),
                });
            }
            // At most 65536 distinct codes, so the position fits.
            *slot = position as u32;
        }
        Ok(Self { codes, index })
    }

    /// Feature code for an ordered byte pair.
    #[inline]
    pub fn feature_code(first: u8, second: u8) -> u16 {
        u16::from_be_bytes([first, second])
    }

    /// Dense index of `code`, if it is part of the vocabulary.
    #[inline]
    pub fn index_of(&self, code: u16) -> Option<usize> {
        match self.index[usize::from(code)] {
            NO_INDEX => None,
            position => Some(position as usize),
        }
    }

    /// Code stored at dense index `index`.
    pub fn code_at(&self, index: usize) -> Option<u16> {
        self.codes.get(index).copied()
    }

    /// Codes in index order.
    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl fmt::Debug for FeatureVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureVocabulary")
            .field("len", &self.codes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_follows_load_order() {
        let vocabulary = FeatureVocabulary::new(vec![0x6865, 0x0000, 0xFFFF]).unwrap();
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.index_of(0x6865), Some(0));
        assert_eq!(vocabulary.index_of(0x0000), Some(1));
        assert_eq!(vocabulary.index_of(0xFFFF), Some(2));
        assert_eq!(vocabulary.index_of(0x6866), None);
        assert_eq!(vocabulary.code_at(2), Some(0xFFFF));
        assert_eq!(vocabulary.code_at(3), None);
    }

    #[test]
    fn feature_code_is_big_endian_pair() {
        assert_eq!(FeatureVocabulary::feature_code(b'h', b'e'), 256 * 0x68 + 0x65);
        assert_eq!(FeatureVocabulary::feature_code(0xFF, 0x01), 0xFF01);
    }

    #[test]
    fn duplicates_rejected() {
        let err = FeatureVocabulary::new(vec![1, 2, 1]).unwrap_err();
        assert!(matches!(err, ResourceError::Corrupt { .. }));
    }

    #[test]
    fn empty_vocabulary_is_allowed() {
        let vocabulary = FeatureVocabulary::new(Vec::new()).unwrap();
        assert!(vocabulary.is_empty());
        assert_eq!(vocabulary.index_of(0x4141), None);
    }
}
