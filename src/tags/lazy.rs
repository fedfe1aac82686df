//! Deferred tag materialization.

use std::borrow::Cow;
use std::fmt::{self, Write};
use std::sync::OnceLock;

use crate::error::TagsParseError;

use super::codec::{validate, EagerTagsCodec, TagsCodec};
use super::escape::unescape_tag_value;
use super::{TagMap, Tags};

/// A tags section kept in wire form.
///
/// Single-key lookups scan the raw section directly. The first full
/// traversal (`len`, `iter`, `as_tags`) builds a [`Tags`] once and keeps
/// it; concurrent first traversals all observe the same finished value.
///
/// Formatting writes the same canonical form as [`Tags`]. A raw section
/// that is already canonical is written as is, without materializing.
#[derive(Clone, Debug)]
pub struct LazyTags {
    raw: String,
    parsed: OnceLock<Tags>,
}

impl LazyTags {
    /// Wraps a raw tags section after checking its structure.
    pub fn try_new(raw: impl Into<String>) -> Result<Self, TagsParseError> {
        let raw = raw.into();
        validate(&raw)?;
        Ok(Self {
            raw,
            parsed: OnceLock::new(),
        })
    }

    /// The section exactly as it appeared on the wire.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns `true` once a full traversal has materialized the tags.
    pub fn is_materialized(&self) -> bool {
        self.parsed.get().is_some()
    }

    /// Finds the escaped value of the last occurrence of `key`.
    fn scan(&self, key: &str) -> Option<&str> {
        self.raw.rsplit(';').find_map(|tag| {
            let (k, v) = tag.split_once('=').unwrap_or((tag, ""));
            (k == key).then_some(v)
        })
    }
}

impl TagMap for LazyTags {
    fn value(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.parsed.get() {
            Some(tags) => tags.get(key).map(Cow::Borrowed),
            None => self.scan(key).map(unescape_tag_value),
        }
    }

    fn as_tags(&self) -> &Tags {
        self.parsed.get_or_init(|| {
            // `raw` was validated on construction.
            EagerTagsCodec.try_parse(&self.raw).unwrap_or_default()
        })
    }

    fn write_wire(&self, out: &mut dyn Write) -> fmt::Result {
        match self.parsed.get() {
            Some(tags) => tags.write_wire(out),
            None if is_canonical(&self.raw) => out.write_str(&self.raw),
            None => self.as_tags().write_wire(out),
        }
    }

    fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl PartialEq for LazyTags {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw || self.as_tags() == other.as_tags()
    }
}

impl Eq for LazyTags {}

impl PartialEq<Tags> for LazyTags {
    fn eq(&self, other: &Tags) -> bool {
        self.as_tags() == other
    }
}

impl From<LazyTags> for Tags {
    fn from(lazy: LazyTags) -> Self {
        match lazy.parsed.into_inner() {
            Some(tags) => tags,
            None => EagerTagsCodec.try_parse(&lazy.raw).unwrap_or_default(),
        }
    }
}

impl fmt::Display for LazyTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_wire(f)
    }
}

/// Returns `true` if formatting the parsed section would reproduce it.
///
/// Rejects empty `key=` values, repeated keys, bare CR/LF and any escape
/// other than the five that [`escape_tag_value`](super::escape_tag_value)
/// emits, including a trailing lone backslash.
fn is_canonical(raw: &str) -> bool {
    raw.split(';').enumerate().all(|(i, tag)| {
        let (key, value) = match tag.split_once('=') {
            Some((_, "")) => return false,
            Some(pair) => pair,
            None => (tag, ""),
        };
        canonical_value(value) && !raw.split(';').take(i).any(|prev| tag_key(prev) == key)
    })
}

fn tag_key(tag: &str) -> &str {
    tag.split_once('=').map_or(tag, |(key, _)| key)
}

fn canonical_value(value: &str) -> bool {
    let mut bytes = value.bytes();
    while let Some(b) = bytes.next() {
        match b {
            b'\r' | b'\n' => return false,
            b'\\' if !matches!(bytes.next(), Some(b'\\' | b':' | b's' | b'r' | b'n')) => {
                return false
            }
            _ => {}
        }
    }
    true
}
