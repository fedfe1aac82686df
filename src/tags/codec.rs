//! Tags section codecs.

use std::fmt::{self, Write};

use crate::error::{ProtocolError, TagsParseError};

use super::escape::unescape_tag_value;
use super::lazy::LazyTags;
use super::{TagMap, Tags};

/// A strategy for reading and writing the tags section.
pub trait TagsCodec {
    /// The collection this codec produces.
    type Tags: TagMap;

    /// Parses a tags section (without the `@`).
    fn try_parse(&self, input: &str) -> Result<Self::Tags, TagsParseError>;

    /// Parses a tags section, reporting failures with the offending input.
    fn parse(&self, input: &str) -> crate::Result<Self::Tags> {
        self.try_parse(input).map_err(|cause| ProtocolError::InvalidTags {
            string: input.to_owned(),
            cause,
        })
    }

    /// Writes the wire form of `tags`, without the leading `@`.
    fn format(&self, tags: &Self::Tags, out: &mut dyn Write) -> fmt::Result {
        tags.write_wire(out)
    }
}

/// Splits a tags section into raw `(key, value)` pairs.
///
/// Values are still escaped. Structural errors are reported in scan order,
/// so a trailing `;` wins over an empty key in the same tag.
#[derive(Clone, Debug)]
pub(crate) struct RawTags<'a> {
    rest: Option<&'a str>,
}

impl<'a> RawTags<'a> {
    pub(crate) fn new(input: &'a str) -> Result<Self, TagsParseError> {
        if input.is_empty() {
            return Err(TagsParseError::Empty);
        }
        Ok(Self { rest: Some(input) })
    }
}

impl<'a> Iterator for RawTags<'a> {
    type Item = Result<(&'a str, &'a str), TagsParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.take()?;
        let tag = match rest.split_once(';') {
            Some((_, "")) => return Some(Err(TagsParseError::TrailingSeparator)),
            Some((tag, next)) => {
                self.rest = Some(next);
                tag
            }
            None => rest,
        };

        let (key, value) = tag.split_once('=').unwrap_or((tag, ""));
        if key.is_empty() {
            self.rest = None;
            return Some(Err(TagsParseError::KeyEmpty));
        }
        Some(Ok((key, value)))
    }
}

/// Checks the structure of a tags section without allocating.
pub(crate) fn validate(input: &str) -> Result<(), TagsParseError> {
    RawTags::new(input)?.try_for_each(|tag| tag.map(drop))
}

/// Parses every tag up front into a [`Tags`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EagerTagsCodec;

impl TagsCodec for EagerTagsCodec {
    type Tags = Tags;

    fn try_parse(&self, input: &str) -> Result<Tags, TagsParseError> {
        let mut tags = Tags::new();
        for tag in RawTags::new(input)? {
            let (key, value) = tag?;
            tags.upsert(key, unescape_tag_value(value).into_owned());
        }
        Ok(tags)
    }
}

/// Checks the section and defers key/value materialization to [`LazyTags`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LazyTagsCodec;

impl TagsCodec for LazyTagsCodec {
    type Tags = LazyTags;

    fn try_parse(&self, input: &str) -> Result<LazyTags, TagsParseError> {
        LazyTags::try_new(input)
    }
}
