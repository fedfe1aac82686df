//! Benchmarks for IRC line parsing and serialization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use irc_line::command::{CommandCodec, FastCommandCodec, StandardCommandCodec};
use irc_line::tags::{EagerTagsCodec, LazyTagsCodec, TagMap, TagsCodec};
use irc_line::{Message, MessageParser, Prefix};

/// Simple PING message
const SIMPLE_MESSAGE: &str = "PING :irc.example.com";

/// Message with prefix
const PREFIX_MESSAGE: &str = ":nick!user@host PRIVMSG #channel :Hello, world!";

/// Message with IRCv3 tags
const TAGGED_MESSAGE: &str = "@time=2023-01-01T00:00:00.000Z;msgid=abc123;+example/tag=value :nick!user@host PRIVMSG #channel :Hello with tags!";

/// Complex message with escaped tags
const COMPLEX_TAGS: &str = "@time=2023-01-01T12:00:00Z;msgid=msg-12345;+draft/reply=parent-id;batch=batch001;account=username;+note=a\\sb\\:c :nick!user@host.example.com PRIVMSG #long-channel-name :This is a longer message with more content to parse";

/// Numeric response
const NUMERIC_RESPONSE: &str = ":irc.server.net 001 nickname :Welcome to the IRC Network nickname!user@host";

/// CTCP action
const CTCP_ACTION: &str = ":nick!user@host PRIVMSG #channel :\x01ACTION waves at everyone\x01";

const LINES: &[(&str, &str)] = &[
    ("simple", SIMPLE_MESSAGE),
    ("prefix", PREFIX_MESSAGE),
    ("tagged", TAGGED_MESSAGE),
    ("complex", COMPLEX_TAGS),
    ("numeric", NUMERIC_RESPONSE),
    ("ctcp", CTCP_ACTION),
];

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Parsing");

    let standard = MessageParser::new();
    let fast = MessageParser::new().with_command_codec(FastCommandCodec);
    let lazy = fast.with_tags_codec(LazyTagsCodec);

    for (name, line) in LINES {
        group.bench_with_input(BenchmarkId::new("standard", name), line, |b, s| {
            b.iter(|| black_box(standard.try_parse(black_box(s)).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("fast", name), line, |b, s| {
            b.iter(|| black_box(fast.try_parse(black_box(s)).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("fast_lazy", name), line, |b, s| {
            b.iter(|| black_box(lazy.try_parse(black_box(s)).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_command_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("Command Codec");
    let tokens = ["PING", "privmsg", "WHOWAS", "ADMIN", "353", "NOTACOMMAND"];

    group.bench_function("standard", |b| {
        b.iter(|| {
            for token in tokens {
                let _ = black_box(StandardCommandCodec.try_parse(black_box(token)));
            }
        })
    });

    group.bench_function("fast", |b| {
        b.iter(|| {
            for token in tokens {
                let _ = black_box(FastCommandCodec.try_parse(black_box(token)));
            }
        })
    });

    group.finish();
}

fn benchmark_tags_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tags Codec");
    let raw = "time=2023-01-01T12:00:00Z;msgid=msg-12345;+draft/reply=parent-id;batch=batch001;account=username;+note=a\\sb\\:c";

    group.bench_function("eager_parse", |b| {
        b.iter(|| black_box(EagerTagsCodec.try_parse(black_box(raw)).unwrap()))
    });

    group.bench_function("lazy_parse", |b| {
        b.iter(|| black_box(LazyTagsCodec.try_parse(black_box(raw)).unwrap()))
    });

    group.bench_function("eager_single_lookup", |b| {
        b.iter(|| {
            let tags = EagerTagsCodec.try_parse(black_box(raw)).unwrap();
            black_box(tags.value("msgid").map(|v| v.len()))
        })
    });

    group.bench_function("lazy_single_lookup", |b| {
        b.iter(|| {
            let tags = LazyTagsCodec.try_parse(black_box(raw)).unwrap();
            black_box(tags.value("msgid").map(|v| v.len()))
        })
    });

    group.bench_function("lazy_full_traversal", |b| {
        b.iter(|| {
            let tags = LazyTagsCodec.try_parse(black_box(raw)).unwrap();
            black_box(tags.iter().count())
        })
    });

    group.finish();
}

fn benchmark_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Serialization");

    for (name, line) in LINES {
        let msg: Message = line.parse().unwrap();
        group.bench_with_input(BenchmarkId::new("to_string", name), &msg, |b, msg| {
            b.iter(|| black_box(black_box(msg).to_string()))
        });
    }

    let parser = MessageParser::new().with_tags_codec(LazyTagsCodec);
    let lazy = parser.try_parse(COMPLEX_TAGS).unwrap();
    group.bench_function("lazy_raw_tags", |b| {
        b.iter(|| black_box(parser.format(black_box(&lazy))))
    });

    group.finish();
}

fn benchmark_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Construction");

    group.bench_function("privmsg_simple", |b| {
        b.iter(|| {
            let msg: Message = Message::privmsg(black_box("#channel"), black_box("Hello, world!"));
            black_box(msg)
        })
    });

    group.bench_function("privmsg_full", |b| {
        b.iter(|| {
            let msg: Message = Message::privmsg(black_box("#channel"), black_box("Hello!"))
                .with_tag("time", "2023-01-01T12:00:00Z")
                .with_tag("msgid", "abc123")
                .with_prefix(Prefix::new("nick").with_user("user").with_host("host"));
            black_box(msg.to_string())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parsing,
    benchmark_command_codecs,
    benchmark_tags_codecs,
    benchmark_serialization,
    benchmark_construction,
);

criterion_main!(benches);
