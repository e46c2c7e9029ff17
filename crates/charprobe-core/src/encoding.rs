//! Canonical encoding identifiers and alias normalization.
//!
//! `Encoding` is a closed enumeration. Its declaration order is the
//! canonical total order: ranking ties are broken by it, so reordering
//! variants changes detection output.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::EncodingError;

macro_rules! define_encodings {
    ($( $(#[$meta:meta])* $variant:ident => $name:literal [$($alias:literal),* $(,)?] ),* $(,)?) => {
        /// A character encoding known to the detector.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Encoding {
            $( $(#[$meta])* $variant, )*
        }

        impl Encoding {
            const ALL: &'static [Encoding] = &[$(Encoding::$variant),*];

            /// Number of supported encodings.
            pub const COUNT: usize = Self::ALL.len();

            /// Canonical name, also used to name the encoding's weight file.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Encoding::$variant => $name, )*
                }
            }

            /// Additional spellings that resolve to this encoding.
            pub fn aliases(self) -> &'static [&'static str] {
                match self {
                    $( Encoding::$variant => &[$($alias),*], )*
                }
            }
        }
    };
}

define_encodings! {
    Ascii => "ascii" ["us_ascii", "646", "us"],
    Utf8 => "utf_8" ["u8", "utf", "cp65001"],
    Utf7 => "utf_7" ["u7", "unicode_1_1_utf_7"],
    /// UTF-16 with an optional BOM; little-endian when the BOM is absent.
    Utf16 => "utf_16" ["u16"],
    Utf16Be => "utf_16_be" ["unicodebigunmarked"],
    Utf16Le => "utf_16_le" ["unicodelittleunmarked"],
    /// UTF-32 with an optional BOM; little-endian when the BOM is absent.
    Utf32 => "utf_32" ["u32"],
    Utf32Be => "utf_32_be" [],
    Utf32Le => "utf_32_le" [],
    Big5 => "big5" ["big5_tw", "csbig5"],
    Big5Hkscs => "big5hkscs" ["hkscs"],
    Gb2312 => "gb2312" [
        "chinese", "csiso58gb231280", "euc_cn", "eucgb2312_cn", "gb2312_1980", "gb2312_80",
        "iso_ir_58",
    ],
    Gbk => "gbk" ["936", "cp936", "ms936"],
    Gb18030 => "gb18030" ["gb18030_2000"],
    /// GB2312 inside `~{` `~}` shift sequences, 7-bit clean.
    Hz => "hz" ["hzgb", "hz_gb", "hz_gb_2312"],
    EucJp => "euc_jp" ["ujis", "u_jis"],
    ShiftJis => "shift_jis" ["csshiftjis", "sjis", "s_jis"],
    Cp932 => "cp932" ["932", "ms932", "mskanji", "ms_kanji", "windows_31j"],
    Iso2022Jp => "iso2022_jp" ["csiso2022jp"],
    EucKr => "euc_kr" ["korean", "ksc5601", "ks_c_5601", "ks_c_5601_1987", "ksx1001", "ks_x_1001"],
    Cp949 => "cp949" ["949", "ms949", "uhc"],
    Johab => "johab" ["cp1361", "ms1361"],
    Iso2022Kr => "iso2022_kr" ["csiso2022kr"],
    Cp866 => "cp866" ["866", "ibm866"],
    Cp1125 => "cp1125" ["1125", "ibm1125", "cp866u", "ruscii"],
    Cp1251 => "cp1251" ["windows_1251"],
    Koi8R => "koi8_r" [],
    Koi8U => "koi8_u" [],
    Kz1048 => "kz1048" ["kz_1048", "rk1048", "strk1048_2002"],
    Ptcp154 => "ptcp154" ["csptcp154", "pt154", "cp154", "cyrillic_asian"],
    Iso8859_5 => "iso8859_5" ["cyrillic"],
    MacCyrillic => "mac_cyrillic" [],
    Cp855 => "cp855" ["855", "ibm855"],
    Latin1 => "latin_1" ["iso8859_1", "8859", "cp819", "latin", "l1"],
    Iso8859_2 => "iso8859_2" ["latin2", "l2"],
    Iso8859_3 => "iso8859_3" ["latin3", "l3"],
    Iso8859_4 => "iso8859_4" ["latin4", "l4"],
    Iso8859_6 => "iso8859_6" ["arabic"],
    Iso8859_7 => "iso8859_7" ["greek", "greek8"],
    Iso8859_8 => "iso8859_8" ["hebrew"],
    Iso8859_10 => "iso8859_10" ["latin6", "l6"],
    Iso8859_11 => "iso8859_11" ["thai"],
    Iso8859_13 => "iso8859_13" ["latin7", "l7"],
    Iso8859_14 => "iso8859_14" ["latin8", "l8"],
    Iso8859_15 => "iso8859_15" ["latin9", "l9"],
    Iso8859_16 => "iso8859_16" ["latin10", "l10"],
    Tis620 => "tis_620" ["tis620", "tis_620_0", "tis_620_2529_0", "tis_620_2529_1", "iso_ir_166"],
    Cp874 => "cp874" ["windows_874"],
    Cp1250 => "cp1250" ["windows_1250"],
    Cp1252 => "cp1252" ["windows_1252"],
    Cp1253 => "cp1253" ["windows_1253"],
    Cp1254 => "cp1254" ["windows_1254"],
    Cp1255 => "cp1255" ["windows_1255"],
    Cp1256 => "cp1256" ["windows_1256"],
    Cp1257 => "cp1257" ["windows_1257"],
    Cp1258 => "cp1258" ["windows_1258"],
    MacRoman => "mac_roman" ["macintosh"],
    MacLatin2 => "mac_latin2" ["maclatin2", "maccentraleurope", "mac_centeuro"],
    MacIceland => "mac_iceland" ["maciceland"],
    MacTurkish => "mac_turkish" ["macturkish"],
    Cp437 => "cp437" ["437", "ibm437"],
    Cp850 => "cp850" ["850", "ibm850"],
    Cp852 => "cp852" ["852", "ibm852"],
    Cp857 => "cp857" ["857", "ibm857"],
    Cp860 => "cp860" ["860", "ibm860"],
    Cp861 => "cp861" ["861", "cp_is", "ibm861"],
    Cp862 => "cp862" ["862", "ibm862"],
    Cp863 => "cp863" ["863", "ibm863"],
    Cp864 => "cp864" ["864", "ibm864"],
    Cp865 => "cp865" ["865", "ibm865"],
    Cp869 => "cp869" ["869", "cp_gr", "ibm869"],
    /// EBCDIC, US/Canada.
    Cp037 => "cp037" ["ibm037", "ibm039"],
    /// EBCDIC, International.
    Cp500 => "cp500" ["ebcdic_cp_be", "ebcdic_cp_ch", "ibm500"],
}

/// Normalized name → encoding. Built once per process.
static LOOKUP: LazyLock<FxHashMap<String, Encoding>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    for &encoding in Encoding::all() {
        table.insert(normalize(encoding.name()), encoding);
        for alias in encoding.aliases() {
            table.insert(normalize(alias), encoding);
        }
    }
    table
});

/// Lower-case and strip everything but ASCII letters and digits, so that
/// `UTF-8`, `utf_8` and `utf8` share one key.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl Encoding {
    /// Every supported encoding, in canonical order.
    pub fn all() -> &'static [Encoding] {
        Self::ALL
    }

    /// Resolve a free-form name or alias.
    pub fn lookup(name: &str) -> Option<Encoding> {
        LOOKUP.get(&normalize(name)).copied()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| EncodingError::Unknown {
            name: s.to_string(),
        })
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
