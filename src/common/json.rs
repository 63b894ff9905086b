//! ASCII-safe JSON encoding.
//!
//! The ingestion endpoint receives bodies that contain only ASCII bytes:
//! every non-ASCII character inside a string is written as a `\uXXXX` escape,
//! with surrogate pairs for characters outside the Basic Multilingual Plane.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

/// Compact formatter that escapes non-ASCII characters
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serialize a value to compact, ASCII-only JSON bytes
pub fn to_ascii_vec<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(256);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}
