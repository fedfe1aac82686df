//! Typed accessors for well-known IRCv3 tags.
//!
//! These work over any [`TagMap`](crate::tags::TagMap), so they read
//! [`LazyTags`](crate::tags::LazyTags) without materializing them.

mod server_time;

use std::borrow::Cow;

use crate::tags::TagMap;

pub use self::server_time::{format_server_time, format_timestamp, server_time};

/// The `time` tag from the `server-time` capability.
pub const SERVER_TIME: &str = "time";

/// The `msgid` tag from the `message-ids` capability.
pub const MSGID: &str = "msgid";

/// The `batch` tag from the `batch` capability.
pub const BATCH: &str = "batch";

/// The `label` tag from the `labeled-response` capability.
pub const LABEL: &str = "label";

/// Returns the message ID, if the message carries one.
pub fn msgid<T: TagMap + ?Sized>(tags: &T) -> Option<Cow<'_, str>> {
    tags.value(MSGID).filter(|id| !id.is_empty())
}

/// Returns the batch reference the message belongs to.
pub fn batch<T: TagMap + ?Sized>(tags: &T) -> Option<Cow<'_, str>> {
    tags.value(BATCH).filter(|id| !id.is_empty())
}

/// Returns the label echoed back by the server.
pub fn label<T: TagMap + ?Sized>(tags: &T) -> Option<Cow<'_, str>> {
    tags.value(LABEL).filter(|id| !id.is_empty())
}
