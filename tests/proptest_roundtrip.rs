//! Property-based tests for IRC line parsing.
//!
//! Uses proptest to generate random IRC components and verify that:
//! 1. Parsing never panics, on any input
//! 2. Formatted messages parse back to the same message (semantic round trip)
//! 3. Every parsing strategy agrees with the default one

use proptest::prelude::*;

use irc_line::command::{FastCommandCodec, NamedCommand};
use irc_line::tags::{escape_tag_value, unescape_tag_value, LazyTagsCodec};
use irc_line::{format_message, parse_message, Command, Content, Message, MessageParser, Numeric, Prefix, Tags};

// =============================================================================
// STRATEGIES - Generators for valid IRC components
// =============================================================================

/// Valid IRC nickname: starts with letter or special char, followed by
/// letters, digits, or special chars.
fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

/// Valid IRC username (ident): alphanumeric, no spaces or @ or !
fn username_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("~?[a-zA-Z][a-zA-Z0-9]{0,9}").expect("valid regex")
}

/// Valid hostname: simplified version
fn hostname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]+(\\.[a-z0-9]+)*").expect("valid regex")
}

/// Valid IRC channel name: starts with # or &, followed by valid chars
fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&][a-zA-Z0-9_\\-]{1,49}").expect("valid regex")
}

/// Middle parameters: space separated words, none starting with `:`
fn arg_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&a-zA-Z0-9*=+\\-][^ :\r\n\0]{0,20}( [^ :\r\n\0]{1,20}){0,3}")
        .expect("valid regex")
}

/// Message text that doesn't contain CR/LF or the CTCP delimiter
fn message_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0\x01]{1,400}").expect("valid regex")
}

/// Tag key: alphanumeric with optional client-only and vendor prefixes
fn tag_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("\\+?([a-z0-9]+\\.[a-z]+/)?[a-zA-Z][a-zA-Z0-9\\-]{0,30}")
        .expect("valid regex")
}

/// Tag value: anything, escaping takes care of the rest
fn tag_value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\0]{0,50}").expect("valid regex")
}

/// Generate a valid Prefix
fn prefix_strategy() -> impl Strategy<Value = Prefix> {
    prop_oneof![
        // Server name (contains dot)
        prop::string::string_regex("[a-z]+\\.[a-z]+\\.[a-z]+")
            .expect("valid regex")
            .prop_map(Prefix::new),
        // User prefix: nick!user@host
        (nickname_strategy(), username_strategy(), hostname_strategy())
            .prop_map(|(nick, user, host)| Prefix::new(nick).with_user(user).with_host(host)),
    ]
}

fn tags_strategy() -> impl Strategy<Value = Option<Tags>> {
    prop::option::of(
        prop::collection::vec((tag_key_strategy(), tag_value_strategy()), 1..5)
            .prop_map(|pairs| pairs.into_iter().collect::<Tags>()),
    )
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        prop::sample::select(NamedCommand::ALL).prop_map(Command::Named),
        (0u16..=999).prop_map(|code| Command::Numeric(Numeric::new(code).expect("in range"))),
    ]
}

fn content_strategy() -> impl Strategy<Value = Content> {
    prop_oneof![
        message_text_strategy().prop_map(Content::new),
        (
            prop::string::string_regex("[A-Z]{1,10}").expect("valid regex"),
            prop::string::string_regex("[^\r\n\0\x01]{0,100}").expect("valid regex"),
        )
            .prop_map(|(ctcp, text)| Content::ctcp(ctcp, text)),
    ]
}

/// Generate a complete valid Message
fn message_strategy() -> impl Strategy<Value = Message> {
    (
        tags_strategy(),
        prop::option::of(prefix_strategy()),
        command_strategy(),
        prop::option::of(arg_strategy()),
        prop::option::of(content_strategy()),
    )
        .prop_map(|(tags, prefix, command, arg, content)| Message {
            tags,
            prefix,
            command,
            arg,
            content,
        })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// The fundamental roundtrip property: format → parse = identity
    #[test]
    fn message_roundtrip(msg in message_strategy()) {
        let serialized = msg.to_string();
        let parsed = parse_message(&serialized)
            .expect("Serialized message should be parseable");

        prop_assert_eq!(&msg, &parsed,
            "Roundtrip failed for serialized: {:?}", serialized);
    }

    /// Formatting a parsed message is idempotent from then on.
    #[test]
    fn format_is_idempotent(msg in message_strategy()) {
        let once = msg.to_string();
        let twice = parse_message(&once).expect("parses").to_string();
        prop_assert_eq!(once, twice);
    }

    /// Prefix roundtrip: any valid prefix can be parsed and re-serialized
    #[test]
    fn prefix_roundtrip(prefix in prefix_strategy()) {
        let serialized = prefix.to_string();
        let parsed = Prefix::try_parse(&serialized).expect("prefix parses");
        prop_assert_eq!(&prefix, &parsed,
            "Prefix roundtrip failed for: {}", serialized);
    }

    /// Numerics always format as exactly three digits and parse back.
    #[test]
    fn numeric_roundtrip(code in 0u16..=999) {
        let command = Command::Numeric(Numeric::new(code).expect("in range"));
        let serialized = command.to_string();
        prop_assert_eq!(serialized.len(), 3);
        prop_assert_eq!(Command::try_parse(&serialized), Ok(command));
    }

    /// Escape and unescape are inverses.
    #[test]
    fn escape_roundtrip(value in tag_value_strategy()) {
        let mut escaped = String::new();
        escape_tag_value(&mut escaped, &value).expect("writing to a String");
        prop_assert!(!escaped.contains(&[' ', ';', '\r', '\n'][..]));
        prop_assert_eq!(unescape_tag_value(&escaped), value);
    }

    /// Parsing should never panic, whatever the input
    #[test]
    fn parse_never_panics(line in "[^\r\n]{0,200}") {
        let _ = parse_message(&line);
    }

    /// The fast command codec and lazy tags agree with the defaults.
    #[test]
    fn strategies_agree(msg in message_strategy()) {
        let line = msg.to_string();
        let expected = parse_message(&line);

        let fast = MessageParser::new().with_command_codec(FastCommandCodec);
        prop_assert_eq!(fast.try_parse(&line), expected.clone());

        let lazy = MessageParser::new().with_tags_codec(LazyTagsCodec);
        prop_assert_eq!(lazy.try_parse(&line).map(Message::into_tags), expected);
    }

    /// Lazily parsed tags format exactly like eagerly parsed ones.
    #[test]
    fn lazy_format_agrees(
        tags in prop::collection::vec(("[a-c]{1,2}", "(=[a-z\\\\:;= ]{0,4})?"), 1..6),
        rest in " (PING|PRIVMSG #c :hi)",
    ) {
        let section: Vec<String> = tags.into_iter().map(|(k, v)| k + &v).collect();
        let line = format!("@{}{}", section.join(";"), rest);
        let lazy = MessageParser::new().with_tags_codec(LazyTagsCodec);
        match (lazy.try_parse(&line), parse_message(&line)) {
            (Ok(l), Ok(e)) => prop_assert_eq!(lazy.format(&l), format_message(&e)),
            (l, e) => prop_assert_eq!(l.map(Message::into_tags), e),
        }
    }

    /// Strategies also agree on arbitrary, mostly malformed, input.
    #[test]
    fn strategies_agree_on_garbage(line in "[@: a-zA-Z0-9;=!\\\\\x01]{0,40}") {
        let expected = parse_message(&line);

        let fast = MessageParser::new().with_command_codec(FastCommandCodec);
        prop_assert_eq!(fast.try_parse(&line), expected.clone());

        let lazy = MessageParser::new().with_tags_codec(LazyTagsCodec);
        prop_assert_eq!(lazy.try_parse(&line).map(Message::into_tags), expected);
    }
}
