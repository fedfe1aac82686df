//! Fuzz target for IRC line parsing
//!
//! Feeds arbitrary lines to every parsing strategy and checks that they
//! agree and that anything accepted survives a format/parse round trip.

#![no_main]

use irc_line::command::FastCommandCodec;
use irc_line::tags::LazyTagsCodec;
use irc_line::{format_message, parse_message, MessageParser};
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    // Only fuzz valid UTF-8 strings to focus on protocol-level issues
    let Ok(input) = str::from_utf8(data) else {
        return;
    };
    if input.contains(&['\r', '\n'][..]) {
        return;
    }

    let parsed = parse_message(input);

    let fast = MessageParser::new()
        .with_command_codec(FastCommandCodec)
        .with_tags_codec(LazyTagsCodec);
    let lazy = fast.try_parse(input);
    if let (Ok(eager), Ok(lazy)) = (&parsed, &lazy) {
        assert_eq!(fast.format(lazy), format_message(eager));
    }
    assert_eq!(parsed, lazy.map(|msg| msg.into_tags()));

    if let Ok(msg) = parsed {
        let line = format_message(&msg);
        let reparsed = parse_message(&line).expect("formatted line parses");
        assert_eq!(msg, reparsed);
    }
});
