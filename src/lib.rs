//! # irc-line
//!
//! A codec for single IRC protocol lines: RFC 1459 framing, IRCv3 message
//! tags and CTCP-wrapped content, parsed into structured values and
//! formatted back.
//!
//! ## Features
//!
//! - Section codecs for tags, prefix, command and content, each usable alone
//! - Precise, allocation-free error codes alongside descriptive errors
//! - Swappable strategies: a fast command lookup and lazily decoded tags
//! - Typed accessors for well-known IRCv3 tags
//! - Optional Tokio codec for CRLF-framed streams

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ### Parsing IRC Messages
//!
//! ```rust
//! use irc_line::Message;
//!
//! let raw = "@time=2023-01-01T12:00:00.000Z :nick!user@host PRIVMSG #channel :Hello!";
//! let message: Message = raw.parse().expect("Valid IRC message");
//!
//! assert_eq!(message.arg.as_deref(), Some("#channel"));
//! assert_eq!(message.text(), Some("Hello!"));
//! assert_eq!(message.tag("time").as_deref(), Some("2023-01-01T12:00:00.000Z"));
//! ```
//!
//! ### Creating IRC Messages
//!
//! ```rust
//! use irc_line::{Message, Prefix};
//!
//! let msg: Message = Message::action("#rust", "waves")
//!     .with_tag("msgid", "abc123")
//!     .with_prefix(Prefix::new("bot").with_user("bot").with_host("example.com"));
//!
//! assert_eq!(
//!     msg.to_string(),
//!     "@msgid=abc123 :bot!bot@example.com PRIVMSG #rust :\x01ACTION waves\x01"
//! );
//! ```
//!
//! ### Branching on errors
//!
//! ```rust
//! use irc_line::error::{MessageParseError, Section};
//! use irc_line::parse_message;
//!
//! let err = parse_message("@tag").unwrap_err();
//! assert_eq!(err, MessageParseError::NoCommandMissingTagsEnding);
//! assert_eq!(err.section(), Some(Section::Tags));
//! ```

pub mod command;
pub mod content;
pub mod error;
pub mod ircv3;
#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub mod line;
pub mod message;
pub mod prefix;
pub mod response;
pub mod tags;

pub use self::command::{Command, NamedCommand, Numeric};
pub use self::content::Content;
pub use self::error::{MessageParseError, ProtocolError, Result};
pub use self::message::{format_message, parse_message, Message, MessageParser, RawMessage};
pub use self::prefix::Prefix;
pub use self::response::Response;
pub use self::tags::{LazyTags, TagMap, Tags};

#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MessageCodec, MAX_LINE_LENGTH};
