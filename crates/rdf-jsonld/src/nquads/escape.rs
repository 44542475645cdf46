use std::fmt::Write;
use std::str::Chars;

use crate::error::{RdfError, Result};

/// Append `s` to `out`, escaped for use inside an N-Quads string literal.
///
/// `\t`, `\n`, `\r`, `"` and `\` use their short escapes; remaining control
/// characters are written as `\uXXXX`.
pub fn escape_into(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if c < '\u{0020}' || c == '\u{007F}' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
}

/// Escape a string value for N-Quads serialization.
pub fn escape_nquads(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s);
    out
}

/// Unescape the body of an N-Quads string literal.
pub fn unescape_nquads(s: &str) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let decoded = match chars.next() {
            Some('t') => '\t',
            Some('b') => '\u{0008}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\u{000C}',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some('u') => {
                let high = read_hex(&mut chars, 4)?;
                if (0xD800..=0xDBFF).contains(&high) {
                    decode_surrogate_pair(high, &mut chars)?
                } else {
                    to_char(high)?
                }
            }
            Some('U') => to_char(read_hex(&mut chars, 8)?)?,
            Some(other) => {
                return Err(RdfError::parse(format!(
                    "unknown escape sequence: \\{other}"
                )));
            }
            None => return Err(RdfError::parse("trailing backslash")),
        };
        out.push(decoded);
    }
    Ok(out)
}

fn read_hex(chars: &mut Chars<'_>, digits: usize) -> Result<u32> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return Err(RdfError::parse(format!("incomplete unicode escape: {hex}")));
    }
    u32::from_str_radix(&hex, 16)
        .map_err(|_| RdfError::parse(format!("invalid unicode escape: {hex}")))
}

fn decode_surrogate_pair(high: u32, chars: &mut Chars<'_>) -> Result<char> {
    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(RdfError::parse(format!(
            "expected low surrogate after \\u{high:04X}"
        )));
    }
    let low = read_hex(chars, 4)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(RdfError::parse(format!("invalid low surrogate: \\u{low:04X}")));
    }
    to_char(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}

fn to_char(cp: u32) -> Result<char> {
    char::from_u32(cp).ok_or_else(|| RdfError::parse(format!("invalid codepoint: {cp:X}")))
}
