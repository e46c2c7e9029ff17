//! Binary and text layouts of the persisted model tables.
//!
//! - vocabulary: big-endian `u16` feature codes, file order = index
//! - weights: big-endian IEEE 754 half-precision floats, one per index
//! - biases: UTF-8 lines `<canonical-name> <decimal bias>`
//!
//! Every file is gzip-compressed on disk.

use std::io::{Read, Write};

use charprobe_core::encoding::Encoding;
use charprobe_core::errors::ResourceError;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use half::f16;
use rustc_hash::FxHashMap;

/// Decompress a gzip stream.
pub fn gunzip(compressed: &[u8], resource: &str) -> Result<Vec<u8>, ResourceError> {
    let mut raw = Vec::new();
    GzDecoder::new(compressed)
        .read_to_end(&mut raw)
        .map_err(|e| ResourceError::Corrupt {
            resource: resource.to_string(),
            message: format!("gzip: {e}"),
        })?;
    Ok(raw)
}

/// Compress bytes into a gzip stream.
pub fn gzip(raw: &[u8], resource: &str) -> Result<Vec<u8>, ResourceError> {
    let to_error = |e: std::io::Error| ResourceError::Io {
        path: resource.to_string(),
        message: e.to_string(),
    };
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).map_err(to_error)?;
    encoder.finish().map_err(to_error)
}

fn u16_units<'a>(
    raw: &'a [u8],
    resource: &str,
) -> Result<impl Iterator<Item = u16> + 'a, ResourceError> {
    if raw.len() % 2 != 0 {
        return Err(ResourceError::Corrupt {
            resource: resource.to_string(),
            message: format!("odd byte count {}", raw.len()),
        });
    }
    Ok(raw
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]])))
}

/// Parse an uncompressed vocabulary table.
pub fn decode_vocabulary(raw: &[u8], resource: &str) -> Result<Vec<u16>, ResourceError> {
    Ok(u16_units(raw, resource)?.collect())
}

pub fn encode_vocabulary(codes: &[u16]) -> Vec<u8> {
    codes.iter().flat_map(|code| code.to_be_bytes()).collect()
}

/// Parse an uncompressed weight table, upconverting to `f32`.
pub fn decode_weights(raw: &[u8], resource: &str) -> Result<Vec<f32>, ResourceError> {
    Ok(u16_units(raw, resource)?
        .map(|bits| f16::from_bits(bits).to_f32())
        .collect())
}

/// Encode weights as half-precision. Values are rounded to the nearest
/// representable `f16`.
pub fn encode_weights(weights: &[f32]) -> Vec<u8> {
    weights
        .iter()
        .flat_map(|&w| f16::from_f32(w).to_bits().to_be_bytes())
        .collect()
}

/// Parse the bias table into canonical name → bias. Blank lines are
/// skipped; names are kept verbatim so the table may list encodings this
/// build does not know.
pub fn parse_biases(text: &str, resource: &str) -> Result<FxHashMap<String, f64>, ResourceError> {
    let mut biases = FxHashMap::default();
    for (number, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let (name, value) = match (fields.next(), fields.next(), fields.next()) {
            (None, _, _) => continue,
            (Some(name), Some(value), None) => (name, value),
            _ => {
                return Err(ResourceError::Corrupt {
                    resource: resource.to_string(),
                    message: format!("line {}: expected `<encoding> <bias>`", number + 1),
                })
            }
        };
        let bias = value.parse::<f64>().map_err(|e| ResourceError::Corrupt {
            resource: resource.to_string(),
            message: format!("line {}: {e}", number + 1),
        })?;
        biases.insert(name.to_string(), bias);
    }
    Ok(biases)
}

pub fn format_biases(entries: impl IntoIterator<Item = (Encoding, f64)>) -> String {
    entries
        .into_iter()
        .map(|(encoding, bias)| format!("{} {bias}\n", encoding.name()))
        .collect()
}
