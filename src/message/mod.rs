//! Whole-line parsing and formatting.
//!
//! A line is `[@tags SP] [:prefix SP] command [SP params]`. [`RawMessage`]
//! splits a line into borrowed sections; [`MessageParser`] additionally
//! runs each section through its codec to build a [`Message`].

mod parser;
mod scan;
mod types;

pub use self::parser::{format_message, parse_message, MessageParser};
pub use self::scan::RawMessage;
pub use self::types::Message;
