//! IRCv3 message tags.
//!
//! The tags section is `key[=value](;key[=value])*`. [`Tags`] keeps keys in
//! the order they first appeared, with the value of their last occurrence.
//! [`LazyTags`] keeps the raw section and only builds a [`Tags`] when a
//! full traversal asks for one.

use std::borrow::Cow;
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::error::{ProtocolError, TagsParseError};

mod codec;
mod escape;
mod lazy;

pub use self::codec::{EagerTagsCodec, LazyTagsCodec, TagsCodec};
pub use self::escape::{escape_tag_value, unescape_tag_value};
pub use self::lazy::LazyTags;

/// Read access shared by every tag collection.
pub trait TagMap {
    /// Looks up the unescaped value of `key`. Flag tags yield `""`.
    fn value(&self, key: &str) -> Option<Cow<'_, str>>;

    /// Returns the fully materialized collection.
    fn as_tags(&self) -> &Tags;

    /// Writes the wire form, without the leading `@`.
    fn write_wire(&self, out: &mut dyn Write) -> fmt::Result;

    /// Number of distinct keys.
    fn len(&self) -> usize {
        self.as_tags().len()
    }

    /// Returns `true` when there are no tags.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Iterates over `(key, value)` pairs in order.
    fn iter(&self) -> Iter<'_> {
        self.as_tags().iter()
    }
}

/// An ordered collection of unique tag keys and their unescaped values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tags {
    entries: Vec<(String, String)>,
}

impl Tags {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collection with `key` set to `value`.
    ///
    /// An existing key keeps its position. Empty keys are ignored.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if !key.is_empty() {
            self.upsert(key, value.into());
        }
        self
    }

    // Linear key search: quadratic in the tag count, which the 8191-byte
    // tags limit keeps small.
    pub(crate) fn upsert(&mut self, key: impl AsRef<str> + Into<String>, value: String) {
        match self.entries.iter_mut().find(|(k, _)| k.as_str() == key.as_ref()) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.into(), value)),
        }
    }

    /// Returns the value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no tags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over values in key order.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Parses a tags section (without the `@`).
    pub fn try_parse(input: &str) -> Result<Self, TagsParseError> {
        EagerTagsCodec.try_parse(input)
    }

    /// Parses a tags section, reporting failures with the offending input.
    pub fn parse(input: &str) -> crate::Result<Self> {
        EagerTagsCodec.parse(input)
    }
}

impl TagMap for Tags {
    fn value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(Cow::Borrowed)
    }

    fn as_tags(&self) -> &Tags {
        self
    }

    fn write_wire(&self, out: &mut dyn Write) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                out.write_char(';')?;
            }
            out.write_str(key)?;
            if !value.is_empty() {
                out.write_char('=')?;
                escape_tag_value(out, value)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_wire(f)
    }
}

impl FromStr for Tags {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tags::parse(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Tags::new(), |tags, (k, v)| tags.with(k, v))
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(key, value)` pairs of a [`Tags`].
#[derive(Clone, Debug)]
pub struct Iter<'a>(std::slice::Iter<'a, (String, String)>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ExactSizeIterator for Iter<'_> {}
