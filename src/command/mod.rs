//! IRC command tokens and their codecs.

mod codec;
mod types;

pub use codec::{CommandCodec, FastCommandCodec, StandardCommandCodec};
pub use types::{Command, NamedCommand, Numeric};
