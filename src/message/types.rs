use std::borrow::Cow;
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::command::{Command, NamedCommand};
use crate::content::Content;
use crate::error::{MessageParseError, ProtocolError};
use crate::prefix::Prefix;
use crate::tags::{TagMap, Tags};

use super::parser::MessageParser;

/// A single IRC line in structured form.
///
/// `T` is the tag collection: [`Tags`] for eagerly parsed or hand-built
/// messages, [`LazyTags`](crate::tags::LazyTags) when produced by a parser
/// using [`LazyTagsCodec`](crate::tags::LazyTagsCodec).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message<T = Tags> {
    /// IRCv3 message tags.
    pub tags: Option<T>,
    /// Message source.
    pub prefix: Option<Prefix>,
    /// The command or numeric reply.
    pub command: Command,
    /// Middle parameters, space separated and verbatim.
    pub arg: Option<String>,
    /// Trailing parameter.
    pub content: Option<Content>,
}

impl<T> Message<T> {
    /// Creates a message with only a command.
    pub fn new(command: impl Into<Command>) -> Self {
        Self {
            tags: None,
            prefix: None,
            command: command.into(),
            arg: None,
            content: None,
        }
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: T) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Sets the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Sets the middle parameters.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        let arg = arg.into();
        debug_assert!(
            !arg.is_empty() && !arg.starts_with(':') && !arg.contains(" :"),
            "invalid middle parameters {:?}",
            arg
        );
        self.arg = Some(arg);
        self
    }

    /// Sets the trailing content.
    #[must_use]
    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    /// Create a PRIVMSG message.
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NamedCommand::PRIVMSG)
            .with_arg(target)
            .with_content(Content::new(text))
    }

    /// Create a NOTICE message.
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NamedCommand::NOTICE)
            .with_arg(target)
            .with_content(Content::new(text))
    }

    /// Create a CTCP ACTION (`/me`) message.
    pub fn action(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NamedCommand::PRIVMSG)
            .with_arg(target)
            .with_content(Content::ctcp("ACTION", text))
    }

    /// The CTCP command of the content, if any.
    pub fn ctcp(&self) -> Option<&str> {
        self.content.as_ref()?.ctcp.as_deref()
    }

    /// The content text, without CTCP framing.
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.text.as_str())
    }
}

impl<T: TagMap> Message<T> {
    /// Looks up the unescaped value of a tag.
    pub fn tag(&self, key: &str) -> Option<Cow<'_, str>> {
        self.tags.as_ref()?.value(key)
    }

    /// Returns `true` if the message carries any tags.
    pub fn has_tags(&self) -> bool {
        self.tags.as_ref().is_some_and(|tags| !tags.is_empty())
    }

    /// Converts to a message with materialized [`Tags`].
    pub fn into_tags(self) -> Message<Tags>
    where
        Tags: From<T>,
    {
        Message {
            tags: self.tags.map(Tags::from),
            prefix: self.prefix,
            command: self.command,
            arg: self.arg,
            content: self.content,
        }
    }
}

impl Message<Tags> {
    /// Sets a single tag, keeping any already present.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags = Some(self.tags.take().unwrap_or_default().with(key, value));
        self
    }

    /// Parses a line with the default codecs.
    pub fn try_parse(line: &str) -> Result<Self, MessageParseError> {
        MessageParser::new().try_parse(line)
    }

    /// Parses a line, reporting failures with the offending input.
    pub fn parse(line: &str) -> crate::Result<Self> {
        MessageParser::new().parse(line)
    }
}

/// Writes the wire form of `msg`, without the line terminator.
pub(crate) fn write_message<T: TagMap>(msg: &Message<T>, out: &mut dyn Write) -> fmt::Result {
    if let Some(tags) = msg.tags.as_ref().filter(|tags| !tags.is_empty()) {
        out.write_char('@')?;
        tags.write_wire(out)?;
        out.write_char(' ')?;
    }
    if let Some(prefix) = &msg.prefix {
        write!(out, ":{} ", prefix)?;
    }
    write!(out, "{}", msg.command)?;
    if let Some(arg) = &msg.arg {
        write!(out, " {}", arg)?;
    }
    if let Some(content) = &msg.content {
        write!(out, " :{}", content)?;
    }
    Ok(())
}

impl<T: TagMap> fmt::Display for Message<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_message(self, f)
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::parse(s)
    }
}
