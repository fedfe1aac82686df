//! Error types for the IRC line codec.
//!
//! Each section codec reports a small `Copy` error enum that callers can
//! branch on without allocating. [`MessageParseError`] wraps those by the
//! section they occurred in, and [`ProtocolError`] is the descriptive,
//! input-carrying error returned by the `parse`/`FromStr` entry points.

use std::fmt;

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// Line exceeded the configured maximum length.
    #[error("line too long: {0} bytes")]
    MessageTooLong(usize),

    /// Failed to parse an IRC message.
    #[error("invalid message {string:?}: {cause}")]
    InvalidMessage {
        /// The raw line.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },

    /// Failed to parse a tags segment.
    #[error("invalid tags {string:?}: {cause}")]
    InvalidTags {
        /// The raw segment.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: TagsParseError,
    },

    /// Failed to parse a prefix segment.
    #[error("invalid prefix {string:?}: {cause}")]
    InvalidPrefix {
        /// The raw segment.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: PrefixParseError,
    },

    /// Failed to parse a command token.
    #[error("invalid command {string:?}: {cause}")]
    InvalidCommand {
        /// The raw token.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: CommandParseError,
    },

    /// Failed to parse message content.
    #[error("invalid content {string:?}: {cause}")]
    InvalidContent {
        /// The raw segment.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: ContentParseError,
    },
}

/// Errors from the command codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CommandParseError {
    /// The token was empty.
    #[error("command is empty")]
    Empty,

    /// The token is neither a 3-digit numeric nor a known command name.
    #[error("invalid command format")]
    InvalidFormat,
}

/// Errors from the tags codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TagsParseError {
    /// The segment was empty.
    #[error("tags are empty")]
    Empty,

    /// The segment ended with a `;`.
    #[error("trailing tags semicolon")]
    TrailingSeparator,

    /// A tag had no key.
    #[error("a tag key is empty")]
    KeyEmpty,
}

/// Errors from the prefix codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PrefixParseError {
    /// The segment was empty.
    #[error("prefix is empty")]
    Empty,

    /// An `@` was present with nothing after it.
    #[error("prefix host is empty")]
    EmptyHost,

    /// A `!` was present with nothing after it.
    #[error("prefix user is empty")]
    EmptyUser,

    /// Nothing was left for the name.
    #[error("prefix name is empty")]
    EmptyName,
}

/// Errors from the content codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ContentParseError {
    /// The segment was empty.
    #[error("content is empty")]
    Empty,

    /// CTCP content had no space ending its command token.
    #[error("missing content CTCP ending")]
    MissingCtcpEnding,

    /// CTCP content had an empty command token.
    #[error("content CTCP command is empty")]
    EmptyCtcp,
}

/// The section of a line a [`MessageParseError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// The `@tags` section.
    Tags,
    /// The `:prefix` section.
    Prefix,
    /// The command token.
    Command,
    /// The trailing content.
    Content,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Tags => "tags",
            Section::Prefix => "prefix",
            Section::Command => "command",
            Section::Content => "content",
        })
    }
}

/// Errors encountered when parsing a whole IRC line.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty.
    #[error("message is empty")]
    Empty,

    /// The tags section failed to parse.
    #[error("tags are not in a valid format: {0}")]
    InvalidTags(#[source] TagsParseError),

    /// The prefix section failed to parse.
    #[error("prefix is not in a valid format: {0}")]
    InvalidPrefix(#[source] PrefixParseError),

    /// The command token failed to parse.
    #[error("command is not in a valid format: {0}")]
    InvalidCommand(#[source] CommandParseError),

    /// The content failed to parse.
    #[error("content is not in a valid format: {0}")]
    InvalidContent(#[source] ContentParseError),

    /// Tags were not followed by a space.
    #[error("missing command (no tags ending)")]
    NoCommandMissingTagsEnding,

    /// Nothing followed the space after the tags.
    #[error("missing command (nothing after tags ending)")]
    NoCommandAfterTagsEnding,

    /// The prefix was not followed by a space.
    #[error("missing command (no prefix ending)")]
    NoCommandMissingPrefixEnding,

    /// Nothing followed the space after the prefix.
    #[error("missing command (nothing after prefix ending)")]
    NoCommandAfterPrefixEnding,

    /// The command was followed by a space and nothing else.
    #[error("trailing space after command")]
    TrailingSpaceAfterCommand,
}

impl MessageParseError {
    /// Returns the section the error occurred in, if it is attributable
    /// to a single section.
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::InvalidTags(_) | Self::NoCommandMissingTagsEnding => Some(Section::Tags),
            Self::InvalidPrefix(_) | Self::NoCommandMissingPrefixEnding => Some(Section::Prefix),
            Self::InvalidCommand(_)
            | Self::NoCommandAfterTagsEnding
            | Self::NoCommandAfterPrefixEnding
            | Self::TrailingSpaceAfterCommand => Some(Section::Command),
            Self::InvalidContent(_) => Some(Section::Content),
            Self::Empty => None,
        }
    }
}

impl From<TagsParseError> for MessageParseError {
    fn from(err: TagsParseError) -> Self {
        Self::InvalidTags(err)
    }
}

impl From<PrefixParseError> for MessageParseError {
    fn from(err: PrefixParseError) -> Self {
        Self::InvalidPrefix(err)
    }
}

impl From<CommandParseError> for MessageParseError {
    fn from(err: CommandParseError) -> Self {
        Self::InvalidCommand(err)
    }
}

impl From<ContentParseError> for MessageParseError {
    fn from(err: ContentParseError) -> Self {
        Self::InvalidContent(err)
    }
}
