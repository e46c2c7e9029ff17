//! Johab (KS X 1001 annex 3). Hangul is composed from three 5-bit jamo
//! fields; symbols and hanja are KS X 1001 rows packed two per lead byte.

use std::borrow::Cow;

use super::{ascii, double_byte};

#[derive(Clone, Copy)]
enum Jamo {
    Fill,
    Index(u32),
}

#[rustfmt::skip]
const CHOSEONG_COMPAT: [u32; 19] = [
    0x3131, 0x3132, 0x3134, 0x3137, 0x3138, 0x3139, 0x3141, 0x3142, 0x3143, 0x3145,
    0x3146, 0x3147, 0x3148, 0x3149, 0x314A, 0x314B, 0x314C, 0x314D, 0x314E,
];

#[rustfmt::skip]
const JONGSEONG_COMPAT: [u32; 27] = [
    0x3131, 0x3132, 0x3133, 0x3134, 0x3135, 0x3136, 0x3137, 0x3139, 0x313A, 0x313B,
    0x313C, 0x313D, 0x313E, 0x313F, 0x3140, 0x3141, 0x3142, 0x3144, 0x3145, 0x3146,
    0x3147, 0x3148, 0x314A, 0x314B, 0x314C, 0x314D, 0x314E,
];

pub(super) fn decode(content: &[u8]) -> Option<Cow<'_, str>> {
    if content.is_ascii() {
        return ascii(content);
    }
    let mut out = String::with_capacity(content.len());
    let mut i = 0;
    while i < content.len() {
        let lead = content[i];
        if lead < 0x80 {
            out.push(char::from(lead));
            i += 1;
            continue;
        }
        let trail = *content.get(i + 1)?;
        let c = match lead {
            0x84..=0xD3 => hangul(u16::from_be_bytes([lead, trail]))?,
            0xD9..=0xDE | 0xE0..=0xF9 => ks_x_1001(lead, trail)?,
            _ => return None,
        };
        out.push(c);
        i += 2;
    }
    Some(Cow::Owned(out))
}

fn hangul(code: u16) -> Option<char> {
    let field = |shift: u16| u32::from((code >> shift) & 0x1F);
    let initial = match field(10) {
        1 => Jamo::Fill,
        f @ 2..=20 => Jamo::Index(f - 2),
        _ => return None,
    };
    let medial = match field(5) {
        2 => Jamo::Fill,
        f @ 3..=7 => Jamo::Index(f - 3),
        f @ 10..=15 => Jamo::Index(f - 5),
        f @ 18..=23 => Jamo::Index(f - 7),
        f @ 26..=29 => Jamo::Index(f - 9),
        _ => return None,
    };
    let last = match field(0) {
        1 => Jamo::Fill,
        f @ 2..=17 => Jamo::Index(f - 1),
        f @ 19..=29 => Jamo::Index(f - 2),
        _ => return None,
    };

    let scalar = match (initial, medial, last) {
        (Jamo::Fill, Jamo::Fill, Jamo::Fill) => 0x3000,
        (Jamo::Fill, Jamo::Fill, Jamo::Index(f)) => JONGSEONG_COMPAT[f as usize - 1],
        (Jamo::Fill, Jamo::Index(v), Jamo::Fill) => 0x314F + v,
        (Jamo::Index(c), Jamo::Fill, Jamo::Fill) => CHOSEONG_COMPAT[c as usize],
        (Jamo::Index(c), Jamo::Index(v), last) => {
            let f = match last {
                Jamo::Fill => 0,
                Jamo::Index(f) => f,
            };
            0xAC00 + (c * 21 + v) * 28 + f
        }
        _ => return None,
    };
    char::from_u32(scalar)
}

/// Map a symbol or hanja pair back to its EUC-KR cell. Lead 0xD8 is the
/// user-defined area and is never assigned.
fn ks_x_1001(lead: u8, trail: u8) -> Option<char> {
    let offset = match trail {
        0x31..=0x7E => trail - 0x31,
        0x91..=0xFE => trail - 0x43,
        _ => return None,
    };
    let first_row = if lead < 0xE0 {
        2 * (lead - 0xD9) + 0x21
    } else {
        2 * (lead - 0xE0) + 0x4A
    };
    let (row, cell) = if offset < 94 {
        (first_row, offset + 0x21)
    } else {
        (first_row + 1, offset - 94 + 0x21)
    };
    double_byte::euc_kr(&[row | 0x80, cell | 0x80])?.chars().next()
}
