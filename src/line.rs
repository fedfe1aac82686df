//! Line framing for async transports.
//!
//! [`LineCodec`] splits a byte stream into text lines and [`MessageCodec`]
//! runs each line through a [`MessageParser`]. Both plug into
//! `tokio_util::codec::{FramedRead, FramedWrite, Framed}`.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

use crate::command::{CommandCodec, StandardCommandCodec};
use crate::error::ProtocolError;
use crate::message::{Message, MessageParser};
use crate::tags::{EagerTagsCodec, TagsCodec};

/// Default maximum line length in bytes, excluding the terminator.
///
/// 512 bytes for the RFC 1459 body plus 8191 for IRCv3 tags.
pub const MAX_LINE_LENGTH: usize = 512 + 8191;

/// Splits on LF, strips a trailing CR and skips blank lines.
#[derive(Clone, Debug)]
pub struct LineCodec {
    max_length: usize,
    next_index: usize,
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCodec {
    /// Creates a codec with the [`MAX_LINE_LENGTH`] limit.
    pub fn new() -> Self {
        Self::with_max_length(MAX_LINE_LENGTH)
    }

    /// Creates a codec that rejects lines longer than `max_length` bytes.
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
            discarding: false,
        }
    }

    /// The configured line limit.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn take_line(&self, mut line: BytesMut) -> Result<Option<String>, ProtocolError> {
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        if line.is_empty() {
            return Ok(None);
        }
        if line.len() > self.max_length {
            warn!(len = line.len(), max = self.max_length, "line too long");
            return Err(ProtocolError::MessageTooLong(line.len()));
        }
        match std::str::from_utf8(&line) {
            Ok(text) => Ok(Some(text.to_owned())),
            Err(err) => {
                debug!(error = %err, "line is not valid UTF-8");
                Err(err.into())
            }
        }
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        loop {
            let newline = src[self.next_index..].iter().position(|b| *b == b'\n');
            let Some(offset) = newline else {
                if !self.discarding && src.len() > self.max_length + 1 {
                    let len = src.len();
                    warn!(len, max = self.max_length, "discarding oversized line");
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    return Err(ProtocolError::MessageTooLong(len));
                }
                if self.discarding {
                    src.clear();
                    self.next_index = 0;
                } else {
                    self.next_index = src.len();
                }
                return Ok(None);
            };

            let end = self.next_index + offset;
            self.next_index = 0;
            let mut line = src.split_to(end + 1);
            line.truncate(end);

            if self.discarding {
                self.discarding = false;
                continue;
            }
            if let Some(text) = self.take_line(line)? {
                return Ok(Some(text));
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        self.next_index = 0;
        if std::mem::take(&mut self.discarding) || src.is_empty() {
            src.clear();
            return Ok(None);
        }
        let rest = src.split();
        self.take_line(rest)
    }
}

impl<T: AsRef<str>> Encoder<T> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: T, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        let line = line.as_ref();
        if line.len() > self.max_length {
            return Err(ProtocolError::MessageTooLong(line.len()));
        }
        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}

/// Frames whole [`Message`]s.
///
/// By default a malformed line is returned as an error, which ends a
/// `FramedRead` stream. [`MessageCodec::skip_invalid`] logs and drops such
/// lines instead.
#[derive(Clone, Debug, Default)]
pub struct MessageCodec<C = StandardCommandCodec, T = EagerTagsCodec> {
    lines: LineCodec,
    parser: MessageParser<C, T>,
    skip_invalid: bool,
}

impl MessageCodec {
    /// Creates a codec with the default parser and line limit.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C, T> MessageCodec<C, T> {
    /// Creates a codec around a configured parser.
    pub fn with_parser(parser: MessageParser<C, T>) -> Self {
        Self {
            lines: LineCodec::new(),
            parser,
            skip_invalid: false,
        }
    }

    /// Sets the maximum line length in bytes.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.lines = LineCodec::with_max_length(max_length);
        self
    }

    /// Drops lines that fail to parse instead of returning an error.
    #[must_use]
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    /// The parser used for each line.
    pub fn parser(&self) -> &MessageParser<C, T> {
        &self.parser
    }
}

impl<C: CommandCodec, T: TagsCodec> MessageCodec<C, T> {
    fn parse_line(&self, line: Option<String>) -> Result<Option<Message<T::Tags>>, ProtocolError> {
        let Some(line) = line else {
            return Ok(None);
        };
        match self.parser.parse(&line) {
            Ok(msg) => Ok(Some(msg)),
            Err(err) if self.skip_invalid => {
                warn!(error = %err, "skipping invalid line");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

impl<C: CommandCodec, T: TagsCodec> Decoder for MessageCodec<C, T> {
    type Item = Message<T::Tags>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, ProtocolError> {
        loop {
            let Some(line) = self.lines.decode(src)? else {
                return Ok(None);
            };
            if let Some(msg) = self.parse_line(Some(line))? {
                return Ok(Some(msg));
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, ProtocolError> {
        if let Some(msg) = self.decode(src)? {
            return Ok(Some(msg));
        }
        let line = self.lines.decode_eof(src)?;
        self.parse_line(line)
    }
}

impl<C: CommandCodec, T: TagsCodec> Encoder<Message<T::Tags>> for MessageCodec<C, T> {
    type Error = ProtocolError;

    fn encode(&mut self, msg: Message<T::Tags>, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        Encoder::<&Message<T::Tags>>::encode(self, &msg, dst)
    }
}

impl<'a, C: CommandCodec, T: TagsCodec> Encoder<&'a Message<T::Tags>> for MessageCodec<C, T> {
    type Error = ProtocolError;

    fn encode(&mut self, msg: &'a Message<T::Tags>, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        let line = self.parser.format(msg);
        self.lines.encode(line, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::NamedCommand;
    use crate::error::MessageParseError;

    fn decode_all<D: Decoder>(codec: &mut D, input: &[u8]) -> Vec<Result<D::Item, D::Error>> {
        let mut buf = BytesMut::from(input);
        let mut out = Vec::new();
        loop {
            match codec.decode_eof(&mut buf) {
                Ok(Some(item)) => out.push(Ok(item)),
                Ok(None) => break,
                Err(err) => out.push(Err(err)),
            }
        }
        out
    }

    #[test]
    fn test_lines_split_and_trim() {
        let mut codec = LineCodec::new();
        let lines: Vec<_> = decode_all(&mut codec, b"PING a\r\n\r\nPONG b\nQUIT")
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, vec!["PING a", "PONG b", "QUIT"]);
    }

    #[test]
    fn test_partial_line_waits() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"PING"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b" :x\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("PING :x"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_too_long() {
        let mut codec = LineCodec::with_max_length(8);
        let mut buf = BytesMut::from(&b"PRIVMSG #c :long\r\nPING\r\n"[..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::MessageTooLong(16))
        ));
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("PING"));
    }

    #[test]
    fn test_oversized_partial_is_discarded() {
        let mut codec = LineCodec::with_max_length(4);
        let mut buf = BytesMut::from(&b"PRIVMSG"[..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::MessageTooLong(7))
        ));
        buf.extend_from_slice(b" #c\r\nPING\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("PING"));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"\xff\xfe\r\n"[..]);
        assert!(matches!(codec.decode(&mut buf), Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();
        codec.encode("PING :x", &mut buf).unwrap();
        assert_eq!(&buf[..], b"PING :x\r\n");
    }

    #[test]
    fn test_message_codec_round_trip() {
        let mut codec = MessageCodec::new();
        let msg: Message = Message::privmsg("#c", "hello").with_tag("a", "b c");
        let mut buf = BytesMut::new();
        codec.encode(&msg, &mut buf).unwrap();
        assert_eq!(&buf[..], b"@a=b\\sc PRIVMSG #c :hello\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(msg));
    }

    #[test]
    fn test_message_codec_errors() {
        let mut codec = MessageCodec::new();
        let results = decode_all(&mut codec, b"PING \r\nPONG\r\n");
        assert!(matches!(
            results[0],
            Err(ProtocolError::InvalidMessage {
                cause: MessageParseError::TrailingSpaceAfterCommand,
                ..
            })
        ));
        assert_eq!(
            results[1].as_ref().unwrap().command.as_named(),
            Some(NamedCommand::PONG)
        );
    }

    #[test]
    fn test_message_codec_skip_invalid() {
        let mut codec = MessageCodec::new().skip_invalid(true);
        let results = decode_all(&mut codec, b"@tag\r\nPING\r\n");
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].as_ref().unwrap().command.as_named(),
            Some(NamedCommand::PING)
        );
    }
}
