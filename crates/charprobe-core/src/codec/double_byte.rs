//! Double-byte encodings that are strict subsets of an `encoding_rs`
//! decoder.

use std::borrow::Cow;

use encoding_rs::Encoding as WhatwgEncoding;

use super::whatwg;

/// Byte rules for a double-byte encoding: which bytes stand alone and
/// which lead/trail pairs are assigned.
struct DoubleByteRules {
    single: fn(u8) -> bool,
    pair: fn(u8, u8) -> bool,
    /// Reject text that decodes into U+E000..=U+F8FF.
    no_private_use: bool,
}

impl DoubleByteRules {
    fn accepts(&self, content: &[u8]) -> bool {
        let mut i = 0;
        while i < content.len() {
            let byte = content[i];
            if (self.single)(byte) {
                i += 1;
                continue;
            }
            match content.get(i + 1) {
                Some(&trail) if (self.pair)(byte, trail) => i += 2,
                _ => return false,
            }
        }
        true
    }

    fn decode<'a>(&self, superset: &'static WhatwgEncoding, content: &'a [u8]) -> Option<Cow<'a, str>> {
        if !self.accepts(content) {
            return None;
        }
        let text = whatwg(superset, content)?;
        if self.no_private_use && text.chars().any(is_private_use) {
            return None;
        }
        Some(text)
    }
}

fn is_private_use(c: char) -> bool {
    ('\u{E000}'..='\u{F8FF}').contains(&c)
}

const BIG5_RULES: DoubleByteRules = DoubleByteRules {
    single: |b| b < 0x80,
    pair: |lead, trail| {
        (0xA1..=0xF9).contains(&lead)
            && ((0x40..=0x7E).contains(&trail) || (0xA1..=0xFE).contains(&trail))
    },
    no_private_use: false,
};

const GB2312_RULES: DoubleByteRules = DoubleByteRules {
    single: |b| b < 0x80,
    pair: gb2312_cell,
    no_private_use: true,
};

// No lone 0x80 (the cp936 euro sign), no four-byte GB18030 forms, and no
// user-defined areas.
const GBK_RULES: DoubleByteRules = DoubleByteRules {
    single: |b| b < 0x80,
    pair: |lead, trail| {
        (0x81..=0xFE).contains(&lead)
            && ((0x40..=0x7E).contains(&trail) || (0x80..=0xFE).contains(&trail))
    },
    no_private_use: true,
};

// JIS X 0208 rows only: no NEC row 13, no IBM extensions, no user area.
const SHIFT_JIS_RULES: DoubleByteRules = DoubleByteRules {
    single: |b| b < 0x80 || (0xA1..=0xDF).contains(&b),
    pair: |lead, trail| {
        ((0x81..=0x84).contains(&lead) || (0x88..=0x9F).contains(&lead) || (0xE0..=0xEA).contains(&lead))
            && ((0x40..=0x7E).contains(&trail) || (0x80..=0xFC).contains(&trail))
    },
    no_private_use: false,
};

const EUC_KR_RULES: DoubleByteRules = DoubleByteRules {
    single: |b| b < 0x80,
    pair: |lead, trail| (0xA1..=0xFE).contains(&lead) && (0xA1..=0xFE).contains(&trail),
    no_private_use: false,
};

/// Assigned cells of GB 2312-80 in EUC-CN form. GBK fills several of the
/// gaps (small roman numerals, the euro sign, vertical punctuation, extra
/// pinyin) and the user-defined rows 0xAA..=0xAF; none of those count.
fn gb2312_cell(lead: u8, trail: u8) -> bool {
    let within = |lo: u8, hi: u8| (lo..=hi).contains(&trail);
    match lead {
        0xA1 | 0xA3 => within(0xA1, 0xFE),
        0xA2 => within(0xB1, 0xE2) || within(0xE5, 0xEE) || within(0xF1, 0xFC),
        0xA4 => within(0xA1, 0xF3),
        0xA5 => within(0xA1, 0xF6),
        0xA6 => within(0xA1, 0xB8) || within(0xC1, 0xD8),
        0xA7 => within(0xA1, 0xC1) || within(0xD1, 0xF1),
        0xA8 => within(0xA1, 0xBA) || within(0xC5, 0xE9),
        0xA9 => within(0xA4, 0xEF),
        0xB0..=0xD6 => within(0xA1, 0xFE),
        0xD7 => within(0xA1, 0xF9),
        0xD8..=0xF7 => within(0xA1, 0xFE),
        _ => false,
    }
}

pub(super) fn big5(content: &[u8]) -> Option<Cow<'_, str>> {
    BIG5_RULES.decode(encoding_rs::BIG5, content)
}

pub(super) fn gb2312(content: &[u8]) -> Option<Cow<'_, str>> {
    GB2312_RULES.decode(encoding_rs::GBK, content)
}

pub(super) fn gbk(content: &[u8]) -> Option<Cow<'_, str>> {
    GBK_RULES.decode(encoding_rs::GBK, content)
}

pub(super) fn shift_jis(content: &[u8]) -> Option<Cow<'_, str>> {
    SHIFT_JIS_RULES.decode(encoding_rs::SHIFT_JIS, content)
}

pub(super) fn euc_kr(content: &[u8]) -> Option<Cow<'_, str>> {
    EUC_KR_RULES.decode(encoding_rs::EUC_KR, content)
}
