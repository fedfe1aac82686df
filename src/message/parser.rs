//! Line parsing with pluggable section codecs.

use std::fmt::{self, Write};

use tracing::trace;

use crate::command::{CommandCodec, StandardCommandCodec};
use crate::content::Content;
use crate::error::{MessageParseError, ProtocolError};
use crate::prefix::Prefix;
use crate::tags::{EagerTagsCodec, TagMap, Tags, TagsCodec};

use super::scan::Cursor;
use super::types::{write_message, Message};

/// Parses and formats whole lines.
///
/// The command and tags strategies are type parameters, so swapping one
/// costs nothing at run time:
///
/// ```
/// use irc_line::command::FastCommandCodec;
/// use irc_line::tags::LazyTagsCodec;
/// use irc_line::MessageParser;
///
/// let parser = MessageParser::new()
///     .with_command_codec(FastCommandCodec)
///     .with_tags_codec(LazyTagsCodec);
/// let msg = parser.try_parse("@id=1 PING :x").unwrap();
/// assert_eq!(msg.tag("id").as_deref(), Some("1"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MessageParser<C = StandardCommandCodec, T = EagerTagsCodec> {
    command: C,
    tags: T,
}

impl MessageParser {
    /// Creates a parser with the standard command codec and eager tags.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C, T> MessageParser<C, T> {
    /// Replaces the command codec.
    pub fn with_command_codec<C2: CommandCodec>(self, command: C2) -> MessageParser<C2, T> {
        MessageParser {
            command,
            tags: self.tags,
        }
    }

    /// Replaces the tags codec.
    pub fn with_tags_codec<T2: TagsCodec>(self, tags: T2) -> MessageParser<C, T2> {
        MessageParser {
            command: self.command,
            tags,
        }
    }
}

impl<C: CommandCodec, T: TagsCodec> MessageParser<C, T> {
    /// Parses a line (without its terminator).
    pub fn try_parse(&self, line: &str) -> Result<Message<T::Tags>, MessageParseError> {
        self.parse_sections(line).map_err(|err| {
            trace!(line, error = %err, section = ?err.section(), "rejected line");
            err
        })
    }

    /// Parses a line, reporting failures with the offending input.
    pub fn parse(&self, line: &str) -> crate::Result<Message<T::Tags>> {
        self.try_parse(line)
            .map_err(|cause| ProtocolError::InvalidMessage {
                string: line.to_owned(),
                cause,
            })
    }

    /// Formats a message into a new string.
    pub fn format(&self, msg: &Message<T::Tags>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format_into(msg, &mut out);
        out
    }

    /// Formats a message into `out`, using this parser's codecs.
    pub fn format_into(&self, msg: &Message<T::Tags>, out: &mut dyn Write) -> fmt::Result {
        if let Some(tags) = msg.tags.as_ref().filter(|tags| !tags.is_empty()) {
            out.write_char('@')?;
            self.tags.format(tags, out)?;
            out.write_char(' ')?;
        }
        if let Some(prefix) = &msg.prefix {
            write!(out, ":{} ", prefix)?;
        }
        self.command.format(&msg.command, out)?;
        if let Some(arg) = &msg.arg {
            write!(out, " {}", arg)?;
        }
        if let Some(content) = &msg.content {
            write!(out, " :{}", content)?;
        }
        Ok(())
    }

    fn parse_sections(&self, line: &str) -> Result<Message<T::Tags>, MessageParseError> {
        let mut cursor = Cursor::new(line)?;

        let tags = match cursor.section('@', MessageParseError::NoCommandMissingTagsEnding)? {
            Some(raw) => {
                let tags = self.tags.try_parse(raw)?;
                cursor.expect_more(MessageParseError::NoCommandAfterTagsEnding)?;
                Some(tags)
            }
            None => None,
        };

        let prefix = match cursor.section(':', MessageParseError::NoCommandMissingPrefixEnding)? {
            Some(raw) => {
                let prefix = Prefix::try_parse(raw)?;
                cursor.expect_more(MessageParseError::NoCommandAfterPrefixEnding)?;
                Some(prefix)
            }
            None => None,
        };

        let (token, has_params) = cursor.command();
        let command = self.command.try_parse(token)?;

        let (arg, content) = if has_params {
            cursor.expect_more(MessageParseError::TrailingSpaceAfterCommand)?;
            let (arg, content) = cursor.params();
            (arg, content.map(Content::try_parse).transpose()?)
        } else {
            (None, None)
        };

        Ok(Message {
            tags,
            prefix,
            command,
            arg: arg.map(str::to_owned),
            content,
        })
    }
}

/// Parses a line with the default codecs.
pub fn parse_message(line: &str) -> Result<Message, MessageParseError> {
    MessageParser::new().try_parse(line)
}

/// Formats a message into its wire form, without the line terminator.
pub fn format_message<T: TagMap>(msg: &Message<T>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_message(msg, &mut out);
    out
}

impl From<Message<Tags>> for String {
    fn from(msg: Message<Tags>) -> Self {
        format_message(&msg)
    }
}
