//! Strict, non-substituting decoders used as a validity predicate.
//!
//! The detector never decodes text for the caller; it only asks whether a
//! buffer is structurally valid under an encoding. `encoding_rs` covers the
//! WHATWG set. Its decoders for Big5, GBK, Shift_JIS and EUC-KR accept
//! vendor supersets, so the stricter variants add a byte walk on top of a
//! successful superset decode. DOS code pages come from `oem_cp`; the
//! remaining pages are 256-entry tables, and the stateful encodings have
//! their own decoders.

mod double_byte;
mod johab;
mod single_byte;
mod stateful;

use std::borrow::Cow;

use encoding_rs::Encoding as WhatwgEncoding;

use crate::encoding::Encoding;

/// Decoding capability the detector depends on.
pub trait Codec: Send + Sync {
    /// Decode `content` without replacement characters. `None` if any byte
    /// sequence is malformed or unmapped.
    fn decode<'a>(&self, encoding: Encoding, content: &'a [u8]) -> Option<Cow<'a, str>>;

    /// Whether `content` decodes without error under `encoding`.
    fn is_valid(&self, encoding: Encoding, content: &[u8]) -> bool {
        self.decode(encoding, content).is_some()
    }
}

/// Default codec: `encoding_rs`, `oem_cp` and the table and stateful
/// decoders in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictCodec;

impl Codec for StrictCodec {
    fn decode<'a>(&self, encoding: Encoding, content: &'a [u8]) -> Option<Cow<'a, str>> {
        match encoding {
            Encoding::Ascii => ascii(content),
            Encoding::Latin1 => Some(Cow::Owned(content.iter().map(|&b| char::from(b)).collect())),
            Encoding::Utf7 => stateful::utf7(content),
            Encoding::Utf16 => match content {
                [0xFE, 0xFF, rest @ ..] => whatwg(encoding_rs::UTF_16BE, rest),
                [0xFF, 0xFE, rest @ ..] => whatwg(encoding_rs::UTF_16LE, rest),
                _ => whatwg(encoding_rs::UTF_16LE, content),
            },
            Encoding::Utf32 => match content {
                [0x00, 0x00, 0xFE, 0xFF, rest @ ..] => utf32(rest, true),
                [0xFF, 0xFE, 0x00, 0x00, rest @ ..] => utf32(rest, false),
                _ => utf32(content, false),
            },
            Encoding::Utf32Be => utf32(content, true),
            Encoding::Utf32Le => utf32(content, false),
            Encoding::Big5 => double_byte::big5(content),
            Encoding::Gb2312 => double_byte::gb2312(content),
            Encoding::Gbk => double_byte::gbk(content),
            Encoding::Hz => stateful::hz(content),
            Encoding::ShiftJis => double_byte::shift_jis(content),
            Encoding::EucKr => double_byte::euc_kr(content),
            Encoding::Johab => johab::decode(content),
            Encoding::Iso2022Kr => stateful::iso2022_kr(content),
            other => {
                if let Some(code_page) = oem_code_page(other) {
                    oem(code_page, content)
                } else if let Some(table) = single_byte::table(other) {
                    table.decode(content)
                } else {
                    whatwg(superset_of(other)?, content)
                }
            }
        }
    }
}

/// The `encoding_rs` decoder for encodings that map onto one directly.
fn superset_of(encoding: Encoding) -> Option<&'static WhatwgEncoding> {
    let whatwg = match encoding {
        Encoding::Utf8 => encoding_rs::UTF_8,
        Encoding::Utf16Be => encoding_rs::UTF_16BE,
        Encoding::Utf16Le => encoding_rs::UTF_16LE,
        Encoding::Big5Hkscs => encoding_rs::BIG5,
        Encoding::Gb18030 => encoding_rs::GB18030,
        Encoding::EucJp => encoding_rs::EUC_JP,
        Encoding::Cp932 => encoding_rs::SHIFT_JIS,
        Encoding::Iso2022Jp => encoding_rs::ISO_2022_JP,
        Encoding::Cp949 => encoding_rs::EUC_KR,
        Encoding::Cp866 => encoding_rs::IBM866,
        Encoding::Cp1251 => encoding_rs::WINDOWS_1251,
        Encoding::Koi8R => encoding_rs::KOI8_R,
        Encoding::Koi8U => encoding_rs::KOI8_U,
        Encoding::Iso8859_5 => encoding_rs::ISO_8859_5,
        Encoding::MacCyrillic => encoding_rs::X_MAC_CYRILLIC,
        Encoding::Iso8859_2 => encoding_rs::ISO_8859_2,
        Encoding::Iso8859_3 => encoding_rs::ISO_8859_3,
        Encoding::Iso8859_4 => encoding_rs::ISO_8859_4,
        Encoding::Iso8859_6 => encoding_rs::ISO_8859_6,
        Encoding::Iso8859_7 => encoding_rs::ISO_8859_7,
        Encoding::Iso8859_8 => encoding_rs::ISO_8859_8,
        Encoding::Iso8859_10 => encoding_rs::ISO_8859_10,
        Encoding::Iso8859_13 => encoding_rs::ISO_8859_13,
        Encoding::Iso8859_14 => encoding_rs::ISO_8859_14,
        Encoding::Iso8859_15 => encoding_rs::ISO_8859_15,
        Encoding::Iso8859_16 => encoding_rs::ISO_8859_16,
        Encoding::Cp874 => encoding_rs::WINDOWS_874,
        Encoding::Cp1250 => encoding_rs::WINDOWS_1250,
        Encoding::Cp1252 => encoding_rs::WINDOWS_1252,
        Encoding::Cp1253 => encoding_rs::WINDOWS_1253,
        Encoding::Cp1254 => encoding_rs::WINDOWS_1254,
        Encoding::Cp1255 => encoding_rs::WINDOWS_1255,
        Encoding::Cp1256 => encoding_rs::WINDOWS_1256,
        Encoding::Cp1257 => encoding_rs::WINDOWS_1257,
        Encoding::Cp1258 => encoding_rs::WINDOWS_1258,
        Encoding::MacRoman => encoding_rs::MACINTOSH,
        _ => return None,
    };
    Some(whatwg)
}

/// DOS code pages decoded through `oem_cp`.
fn oem_code_page(encoding: Encoding) -> Option<u16> {
    let code_page = match encoding {
        Encoding::Cp437 => 437,
        Encoding::Cp850 => 850,
        Encoding::Cp852 => 852,
        Encoding::Cp855 => 855,
        Encoding::Cp857 => 857,
        Encoding::Cp860 => 860,
        Encoding::Cp861 => 861,
        Encoding::Cp862 => 862,
        Encoding::Cp863 => 863,
        Encoding::Cp864 => 864,
        Encoding::Cp865 => 865,
        Encoding::Cp869 => 869,
        _ => return None,
    };
    Some(code_page)
}

// Incomplete tables (857, 864, 869) leave some high bytes unmapped; the
// checked decode rejects them.
fn oem(code_page: u16, content: &[u8]) -> Option<Cow<'_, str>> {
    if content.is_ascii() {
        return ascii(content);
    }
    let table = oem_cp::code_table::DECODING_TABLE_CP_MAP.get(&code_page)?;
    table.decode_string_checked(content).map(Cow::Owned)
}

fn ascii(content: &[u8]) -> Option<Cow<'_, str>> {
    if content.is_ascii() {
        std::str::from_utf8(content).ok().map(Cow::Borrowed)
    } else {
        None
    }
}

fn whatwg<'a>(encoding: &'static WhatwgEncoding, content: &'a [u8]) -> Option<Cow<'a, str>> {
    encoding.decode_without_bom_handling_and_without_replacement(content)
}

fn utf32(content: &[u8], big_endian: bool) -> Option<Cow<'_, str>> {
    if content.len() % 4 != 0 {
        return None;
    }
    content
        .chunks_exact(4)
        .map(|unit| {
            let bytes = [unit[0], unit[1], unit[2], unit[3]];
            let value = if big_endian {
                u32::from_be_bytes(bytes)
            } else {
                u32::from_le_bytes(bytes)
            };
            char::from_u32(value)
        })
        .collect::<Option<String>>()
        .map(Cow::Owned)
}
