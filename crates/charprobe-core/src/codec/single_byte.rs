//! Table-driven single-byte pages that `encoding_rs` does not carry.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::Encoding as WhatwgEncoding;

use crate::encoding::Encoding;

/// Byte → character map. `None` marks an unassigned byte.
pub(super) struct ByteTable([Option<char>; 256]);

impl ByteTable {
    pub(super) fn decode<'a>(&self, content: &'a [u8]) -> Option<Cow<'a, str>> {
        content
            .iter()
            .map(|&b| self.0[usize::from(b)])
            .collect::<Option<String>>()
            .map(Cow::Owned)
    }

    /// ASCII in the low half, `high[i]` at `0x80 + i`. Zero is unassigned.
    fn ascii_and(high: &[u16; 128]) -> Self {
        let mut map = [None; 256];
        for b in 0..0x80u8 {
            map[usize::from(b)] = Some(char::from(b));
        }
        for (slot, &code) in map[0x80..].iter_mut().zip(high) {
            *slot = (code != 0).then(|| char::from_u32(u32::from(code))).flatten();
        }
        Self(map)
    }

    /// A page that differs from an `encoding_rs` page in a few bytes.
    fn patched(base: &'static WhatwgEncoding, patches: &[(u8, char)]) -> Self {
        let mut map = [None; 256];
        for (b, slot) in (0..=255u8).zip(map.iter_mut()) {
            *slot = base
                .decode_without_bom_handling_and_without_replacement(&[b])
                .and_then(|text| text.chars().next());
        }
        for &(b, c) in patches {
            map[usize::from(b)] = Some(c);
        }
        Self(map)
    }

    /// EBCDIC pages are permutations of Latin-1.
    fn latin1_permutation(code_points: &[u8; 256]) -> Self {
        let mut map = [None; 256];
        for (slot, &code) in map.iter_mut().zip(code_points) {
            *slot = Some(char::from(code));
        }
        Self(map)
    }

    /// ISO 8859-11: Latin-1 up to 0xA0, then Thai shifted from U+0E01 with
    /// gaps at 0xDB..=0xDE and 0xFC..=0xFF.
    fn thai(nbsp: bool) -> Self {
        let mut map = [None; 256];
        for b in 0..=0xA0u8 {
            map[usize::from(b)] = Some(char::from(b));
        }
        if !nbsp {
            map[0xA0] = None;
        }
        for b in (0xA1..=0xDAu8).chain(0xDF..=0xFB) {
            map[usize::from(b)] = char::from_u32(0x0E01 + u32::from(b) - 0xA1);
        }
        Self(map)
    }
}

pub(super) fn table(encoding: Encoding) -> Option<&'static ByteTable> {
    let table: &'static ByteTable = match encoding {
        Encoding::Cp037 => &CP037,
        Encoding::Cp500 => &CP500,
        Encoding::Cp1125 => &CP1125,
        Encoding::Kz1048 => &KZ1048,
        Encoding::Ptcp154 => &PTCP154,
        Encoding::MacLatin2 => &MAC_LATIN2,
        Encoding::MacIceland => &MAC_ICELAND,
        Encoding::MacTurkish => &MAC_TURKISH,
        Encoding::Iso8859_11 => &ISO8859_11,
        Encoding::Tis620 => &TIS620,
        _ => return None,
    };
    Some(table)
}

static CP037: LazyLock<ByteTable> = LazyLock::new(|| ByteTable::latin1_permutation(&CP037_LATIN1));

static CP500: LazyLock<ByteTable> = LazyLock::new(|| {
    let mut code_points = CP037_LATIN1;
    for (b, code) in CP500_PATCHES {
        code_points[usize::from(b)] = code;
    }
    ByteTable::latin1_permutation(&code_points)
});

// Ukrainian cp866: Ґґ Єє Іі Її replace the Belarusian and degree signs.
static CP1125: LazyLock<ByteTable> = LazyLock::new(|| {
    ByteTable::patched(
        encoding_rs::IBM866,
        &[
            (0xF2, 'Ґ'),
            (0xF3, 'ґ'),
            (0xF4, 'Є'),
            (0xF5, 'є'),
            (0xF6, 'І'),
            (0xF7, 'і'),
            (0xF8, 'Ї'),
            (0xF9, 'ї'),
        ],
    )
});

// Kazakh letters in the slots windows-1251 gives to Serbian, Macedonian
// and Ukrainian ones.
static KZ1048: LazyLock<ByteTable> = LazyLock::new(|| {
    ByteTable::patched(
        encoding_rs::WINDOWS_1251,
        &[
            (0x8D, 'Қ'),
            (0x8E, 'Һ'),
            (0x9D, 'қ'),
            (0x9E, 'һ'),
            (0xA1, 'Ұ'),
            (0xA2, 'ұ'),
            (0xA3, 'Ә'),
            (0xA5, 'Ө'),
            (0xAA, 'Ғ'),
            (0xAF, 'Ү'),
            (0xB4, 'ө'),
            (0xBA, 'ғ'),
            (0xBC, 'ә'),
            (0xBD, 'Ң'),
            (0xBE, 'ң'),
            (0xBF, 'ү'),
        ],
    )
});

static PTCP154: LazyLock<ByteTable> = LazyLock::new(|| {
    let mut high = [0u16; 128];
    high[..64].copy_from_slice(&PTCP154_80_BF);
    for (i, slot) in high[64..].iter_mut().enumerate() {
        // А..я
        *slot = 0x0410 + i as u16;
    }
    ByteTable::ascii_and(&high)
});

static MAC_LATIN2: LazyLock<ByteTable> = LazyLock::new(|| ByteTable::ascii_and(&MAC_LATIN2_HIGH));

static MAC_ICELAND: LazyLock<ByteTable> = LazyLock::new(|| {
    ByteTable::patched(
        encoding_rs::MACINTOSH,
        &[
            (0xA0, 'Ý'),
            (0xDC, 'Ð'),
            (0xDD, 'ð'),
            (0xDE, 'Þ'),
            (0xDF, 'þ'),
            (0xE0, 'ý'),
        ],
    )
});

static MAC_TURKISH: LazyLock<ByteTable> = LazyLock::new(|| {
    ByteTable::patched(
        encoding_rs::MACINTOSH,
        &[
            (0xDA, 'Ğ'),
            (0xDB, 'ğ'),
            (0xDC, 'İ'),
            (0xDD, 'ı'),
            (0xDE, 'Ş'),
            (0xDF, 'ş'),
            (0xF5, '\u{F8A0}'),
        ],
    )
});

static ISO8859_11: LazyLock<ByteTable> = LazyLock::new(|| ByteTable::thai(true));

static TIS620: LazyLock<ByteTable> = LazyLock::new(|| ByteTable::thai(false));

#[rustfmt::skip]
const CP037_LATIN1: [u8; 256] = [
    0x00, 0x01, 0x02, 0x03, 0x9C, 0x09, 0x86, 0x7F, 0x97, 0x8D, 0x8E, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
    0x10, 0x11, 0x12, 0x13, 0x9D, 0x85, 0x08, 0x87, 0x18, 0x19, 0x92, 0x8F, 0x1C, 0x1D, 0x1E, 0x1F,
    0x80, 0x81, 0x82, 0x83, 0x84, 0x0A, 0x17, 0x1B, 0x88, 0x89, 0x8A, 0x8B, 0x8C, 0x05, 0x06, 0x07,
    0x90, 0x91, 0x16, 0x93, 0x94, 0x95, 0x96, 0x04, 0x98, 0x99, 0x9A, 0x9B, 0x14, 0x15, 0x9E, 0x1A,
    0x20, 0xA0, 0xE2, 0xE4, 0xE0, 0xE1, 0xE3, 0xE5, 0xE7, 0xF1, 0xA2, 0x2E, 0x3C, 0x28, 0x2B, 0x7C,
    0x26, 0xE9, 0xEA, 0xEB, 0xE8, 0xED, 0xEE, 0xEF, 0xEC, 0xDF, 0x21, 0x24, 0x2A, 0x29, 0x3B, 0xAC,
    0x2D, 0x2F, 0xC2, 0xC4, 0xC0, 0xC1, 0xC3, 0xC5, 0xC7, 0xD1, 0xA6, 0x2C, 0x25, 0x5F, 0x3E, 0x3F,
    0xF8, 0xC9, 0xCA, 0xCB, 0xC8, 0xCD, 0xCE, 0xCF, 0xCC, 0x60, 0x3A, 0x23, 0x40, 0x27, 0x3D, 0x22,
    0xD8, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0xAB, 0xBB, 0xF0, 0xFD, 0xFE, 0xB1,
    0xB0, 0x6A, 0x6B, 0x6C, 0x6D, 0x6E, 0x6F, 0x70, 0x71, 0x72, 0xAA, 0xBA, 0xE6, 0xB8, 0xC6, 0xA4,
    0xB5, 0x7E, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0xA1, 0xBF, 0xD0, 0xDD, 0xDE, 0xAE,
    0x5E, 0xA3, 0xA5, 0xB7, 0xA9, 0xA7, 0xB6, 0xBC, 0xBD, 0xBE, 0x5B, 0x5D, 0xAF, 0xA8, 0xB4, 0xD7,
    0x7B, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0xAD, 0xF4, 0xF6, 0xF2, 0xF3, 0xF5,
    0x7D, 0x4A, 0x4B, 0x4C, 0x4D, 0x4E, 0x4F, 0x50, 0x51, 0x52, 0xB9, 0xFB, 0xFC, 0xF9, 0xFA, 0xFF,
    0x5C, 0xF7, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0xB2, 0xD4, 0xD6, 0xD2, 0xD3, 0xD5,
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0xB3, 0xDB, 0xDC, 0xD9, 0xDA, 0x9F,
];

/// cp500 moves seven punctuation marks relative to cp037.
const CP500_PATCHES: [(u8, u8); 7] = [
    (0x4A, b'['),
    (0x4F, b'!'),
    (0x5A, b']'),
    (0x5F, b'^'),
    (0xB0, 0xA2),
    (0xBA, 0xAC),
    (0xBB, b'|'),
];

#[rustfmt::skip]
const PTCP154_80_BF: [u16; 64] = [
    0x0496, 0x0492, 0x04EE, 0x0493, 0x201E, 0x2026, 0x04B6, 0x04AE,
    0x04B2, 0x04AF, 0x04A0, 0x04E2, 0x04A2, 0x049A, 0x04BA, 0x04B8,
    0x0497, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
    0x04B3, 0x04B7, 0x04A1, 0x04E3, 0x04A3, 0x049B, 0x04BB, 0x04B9,
    0x00A0, 0x040E, 0x045E, 0x0408, 0x04E8, 0x0498, 0x04B0, 0x00A7,
    0x0401, 0x00A9, 0x04D8, 0x00AB, 0x00AC, 0x04EF, 0x00AE, 0x049C,
    0x00B0, 0x04B1, 0x0406, 0x0456, 0x0499, 0x04E9, 0x00B6, 0x00B7,
    0x0451, 0x2116, 0x04D9, 0x00BB, 0x0458, 0x04AA, 0x04AB, 0x049D,
];

#[rustfmt::skip]
const MAC_LATIN2_HIGH: [u16; 128] = [
    0x00C4, 0x0100, 0x0101, 0x00C9, 0x0104, 0x00D6, 0x00DC, 0x00E1,
    0x0105, 0x010C, 0x00E4, 0x010D, 0x0106, 0x0107, 0x00E9, 0x0179,
    0x017A, 0x010E, 0x00ED, 0x010F, 0x0112, 0x0113, 0x0116, 0x00F3,
    0x0117, 0x00F4, 0x00F6, 0x00F5, 0x00FA, 0x011A, 0x011B, 0x00FC,
    0x2020, 0x00B0, 0x0118, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF,
    0x00AE, 0x00A9, 0x2122, 0x0119, 0x00A8, 0x2260, 0x0123, 0x012E,
    0x012F, 0x012A, 0x2264, 0x2265, 0x012B, 0x0136, 0x2202, 0x2211,
    0x0142, 0x013B, 0x013C, 0x013D, 0x013E, 0x0139, 0x013A, 0x0145,
    0x0146, 0x0143, 0x00AC, 0x221A, 0x0144, 0x0147, 0x2206, 0x00AB,
    0x00BB, 0x2026, 0x00A0, 0x0148, 0x0150, 0x00D5, 0x0151, 0x014C,
    0x2013, 0x2014, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0x25CA,
    0x014D, 0x0154, 0x0155, 0x0158, 0x2039, 0x203A, 0x0159, 0x0156,
    0x0157, 0x0160, 0x201A, 0x201E, 0x0161, 0x015A, 0x015B, 0x00C1,
    0x0164, 0x0165, 0x00CD, 0x017D, 0x017E, 0x016A, 0x00D3, 0x00D4,
    0x016B, 0x016E, 0x00DA, 0x016F, 0x0170, 0x0171, 0x0172, 0x0173,
    0x00DD, 0x00FD, 0x0137, 0x017B, 0x0141, 0x017C, 0x0122, 0x02C7,
];
