//! Seven-bit encodings that switch character sets with shift sequences.

use std::borrow::Cow;

use super::{ascii, double_byte};

const ESC: u8 = 0x1B;
const SO: u8 = 0x0E;
const SI: u8 = 0x0F;

/// HZ (RFC 1843): ASCII, with GB 2312 rows between `~{` and `~}`.
pub(super) fn hz(content: &[u8]) -> Option<Cow<'_, str>> {
    if !content.contains(&b'~') {
        return ascii(content);
    }
    let mut out = String::with_capacity(content.len());
    let mut gb = false;
    let mut i = 0;
    while i < content.len() {
        let byte = content[i];
        if byte >= 0x80 {
            return None;
        }
        if byte == b'~' {
            match (content.get(i + 1).copied()?, gb) {
                (b'~', false) => out.push('~'),
                (b'\n', false) => {}
                (b'{', false) => gb = true,
                (b'}', true) => gb = false,
                _ => return None,
            }
            i += 2;
        } else if gb {
            let trail = *content.get(i + 1)?;
            let pair = [byte | 0x80, trail | 0x80];
            if !(0x21..=0x7E).contains(&byte) || !(0x21..=0x7E).contains(&trail) {
                return None;
            }
            out.push_str(&double_byte::gb2312(&pair)?);
            i += 2;
        } else {
            out.push(char::from(byte));
            i += 1;
        }
    }
    Some(Cow::Owned(out))
}

/// ISO-2022-KR (RFC 1557): KS X 1001 is designated to G1 with
/// `ESC $ ) C` and invoked with SO; SI returns to ASCII.
pub(super) fn iso2022_kr(content: &[u8]) -> Option<Cow<'_, str>> {
    if !content.iter().any(|&b| b == ESC || b == SO || b == SI) {
        return ascii(content);
    }
    let mut out = String::with_capacity(content.len());
    let mut designated = false;
    let mut shifted = false;
    let mut run: Vec<u8> = Vec::new();
    let mut i = 0;
    while i < content.len() {
        let byte = content[i];
        match byte {
            0x80..=0xFF => return None,
            ESC => {
                if content.get(i + 1..i + 4)? != b"$)C" {
                    return None;
                }
                designated = true;
                i += 4;
                continue;
            }
            SO if designated => shifted = true,
            SO => return None,
            SI => {
                shifted = false;
                out.push_str(&double_byte::euc_kr(&run)?);
                run.clear();
            }
            0x21..=0x7E if shifted => run.push(byte | 0x80),
            _ => {
                out.push_str(&double_byte::euc_kr(&run)?);
                run.clear();
                out.push(char::from(byte));
            }
        }
        i += 1;
    }
    out.push_str(&double_byte::euc_kr(&run)?);
    Some(Cow::Owned(out))
}

/// UTF-7 (RFC 2152). Runs of modified base64 start with `+` and end at the
/// first byte outside the alphabet; a `-` terminator is absorbed.
pub(super) fn utf7(content: &[u8]) -> Option<Cow<'_, str>> {
    if !content.contains(&b'+') {
        return ascii(content);
    }
    let mut out = String::with_capacity(content.len());
    let mut i = 0;
    while i < content.len() {
        let byte = content[i];
        if byte >= 0x80 {
            return None;
        }
        if byte != b'+' {
            out.push(char::from(byte));
            i += 1;
            continue;
        }
        if content.get(i + 1) == Some(&b'-') {
            out.push('+');
            i += 2;
            continue;
        }
        i += 1;
        let mut shift = Utf7Shift::default();
        while let Some(value) = content.get(i).copied().and_then(base64_value) {
            shift.push(value, &mut out)?;
            i += 1;
        }
        shift.finish()?;
        if content.get(i) == Some(&b'-') {
            i += 1;
        }
    }
    Some(Cow::Owned(out))
}

#[derive(Default)]
struct Utf7Shift {
    bits: u32,
    len: u32,
    high_surrogate: Option<u16>,
}

impl Utf7Shift {
    fn push(&mut self, value: u8, out: &mut String) -> Option<()> {
        self.bits = (self.bits << 6) | u32::from(value);
        self.len += 6;
        if self.len < 16 {
            return Some(());
        }
        self.len -= 16;
        let unit = (self.bits >> self.len) as u16;
        self.bits &= (1 << self.len) - 1;
        match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => self.high_surrogate = Some(unit),
            (None, 0xDC00..=0xDFFF) => return None,
            (None, _) => out.push(char::from_u32(u32::from(unit))?),
            (Some(high), 0xDC00..=0xDFFF) => {
                let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                out.push(char::from_u32(code)?);
            }
            (Some(_), _) => return None,
        }
        Some(())
    }

    /// Leftover bits must be fewer than six and all zero.
    fn finish(&self) -> Option<()> {
        (self.high_surrogate.is_none() && self.len < 6 && self.bits == 0).then_some(())
    }
}

fn base64_value(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}
