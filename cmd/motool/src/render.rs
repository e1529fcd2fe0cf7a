use std::borrow::Cow;

use gmo::{Endian, Entry, LookupStrategy};

/// Show `bytes` as text when they are UTF-8, otherwise (or when forced) as
/// `0x`-prefixed hex.
pub fn text_or_hex(bytes: &[u8], force_hex: bool) -> Cow<'_, str> {
    if !force_hex {
        if let Ok(text) = std::str::from_utf8(bytes) {
            return Cow::Borrowed(text);
        }
    }
    Cow::Owned(format!("0x{}", hex::encode(bytes)))
}

pub fn entry_line(entry: &Entry<'_>, force_hex: bool) -> String {
    format!(
        "{} => {}",
        quoted(entry.original, force_hex),
        quoted(entry.translated, force_hex)
    )
}

fn quoted(bytes: &[u8], force_hex: bool) -> String {
    match text_or_hex(bytes, force_hex) {
        Cow::Borrowed(text) => format!("\"{}\"", text.escape_debug()),
        Cow::Owned(hex) => hex,
    }
}

pub fn endian_label(endian: Endian) -> &'static str {
    match endian {
        Endian::Little => "little",
        Endian::Big => "big",
    }
}

pub fn strategy_label(strategy: LookupStrategy) -> String {
    match strategy {
        LookupStrategy::Scan => "scan".to_string(),
        LookupStrategy::Hashed { size, offset } => {
            format!("hashed ({size} slots at {offset:#x})")
        }
    }
}
