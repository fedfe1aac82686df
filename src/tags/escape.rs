//! IRCv3 message tag value escaping.

use std::borrow::Cow;
use std::fmt::{Result as FmtResult, Write};

/// Escape a tag value for serialization.
///
/// Only ever emits `\\`, `\:`, `\s`, `\r` and `\n`; every other character
/// passes through unchanged.
pub fn escape_tag_value(f: &mut dyn Write, value: &str) -> FmtResult {
    let mut start = 0;
    for (i, c) in value.char_indices() {
        let escaped = match c {
            '\\' => "\\\\",
            ';' => "\\:",
            ' ' => "\\s",
            '\r' => "\\r",
            '\n' => "\\n",
            _ => continue,
        };
        f.write_str(&value[start..i])?;
        f.write_str(escaped)?;
        start = i + 1;
    }
    f.write_str(&value[start..])
}

/// Unescape a tag value from wire format.
///
/// A backslash before an unknown character yields that character. A
/// backslash at the very end of the value is kept as is. Values without a
/// backslash are returned borrowed.
pub fn unescape_tag_value(value: &str) -> Cow<'_, str> {
    let first = match value.find('\\') {
        Some(i) if i + 1 < value.len() => i,
        _ => return Cow::Borrowed(value),
    };

    let mut unescaped = String::with_capacity(value.len() - 1);
    unescaped.push_str(&value[..first]);

    let mut iter = value[first..].chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => '\\',
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    Cow::Owned(unescaped)
}
