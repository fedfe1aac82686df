//! Fuzz target for the tags codecs and value escaping

#![no_main]

use irc_line::tags::{escape_tag_value, unescape_tag_value, LazyTags, TagMap, Tags};
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };

    let mut escaped = String::new();
    escape_tag_value(&mut escaped, input).expect("writing to a String");
    assert_eq!(unescape_tag_value(&escaped), input);

    let eager = Tags::try_parse(input);
    let lazy = LazyTags::try_new(input);
    match (eager, lazy) {
        (Ok(eager), Ok(lazy)) => {
            for (key, value) in eager.iter() {
                assert_eq!(lazy.value(key).as_deref(), Some(value));
            }
            assert_eq!(lazy, eager);
        }
        (Err(a), Err(b)) => assert_eq!(a, b),
        (eager, lazy) => panic!("codecs disagree: {:?} vs {:?}", eager, lazy.map(|t| t.to_string())),
    }
});
