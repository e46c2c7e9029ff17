//! Structural validity pre-filter.

use charprobe_core::codec::Codec;
use charprobe_core::encoding::Encoding;
use tracing::debug;

/// Keep the candidates under which `content` decodes without error, in
/// their original order. Decode failures only exclude the candidate.
pub fn filter(codec: &dyn Codec, content: &[u8], candidates: &[Encoding]) -> Vec<Encoding> {
    candidates
        .iter()
        .copied()
        .filter(|&encoding| {
            let valid = codec.is_valid(encoding, content);
            if !valid {
                debug!(encoding = %encoding, len = content.len(), "candidate rejected");
            }
            valid
        })
        .collect()
}
