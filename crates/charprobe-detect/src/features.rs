//! Bigram frequency extraction.

use charprobe_resources::FeatureVocabulary;

/// Frequencies of vocabulary features in one buffer.
///
/// Dense over the vocabulary, with the indices of non-zero entries kept in
/// ascending order so scoring touches only what the buffer contains.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
    active: Vec<usize>,
}

impl FeatureVector {
    /// Slide a two-byte window over `content` and count every pair whose
    /// code is in `vocabulary`. Counts are divided by the number of
    /// windows, so repeating a buffer does not change its frequencies.
    /// Pairs outside the vocabulary are dropped.
    pub fn extract(content: &[u8], vocabulary: &FeatureVocabulary) -> Self {
        let mut counts = vec![0u32; vocabulary.len()];
        let mut active = Vec::new();

        for pair in content.windows(2) {
            let code = FeatureVocabulary::feature_code(pair[0], pair[1]);
            if let Some(index) = vocabulary.index_of(code) {
                if counts[index] == 0 {
                    active.push(index);
                }
                counts[index] += 1;
            }
        }
        active.sort_unstable();

        let windows = content.len().saturating_sub(1).max(1) as f64;
        let values = counts.iter().map(|&c| f64::from(c) / windows).collect();
        Self { values, active }
    }

    /// Frequency at dense index `index`, zero when out of range.
    pub fn get(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Indices with a non-zero frequency, ascending.
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `Σ weights[i] * self[i]`, accumulated in `f64` in ascending index
    /// order so the result is identical on every call.
    pub fn dot(&self, weights: &[f32]) -> f64 {
        self.active
            .iter()
            .map(|&i| f64::from(weights.get(i).copied().unwrap_or(0.0)) * self.values[i])
            .sum()
    }
}
