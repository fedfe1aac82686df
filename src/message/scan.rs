//! Nom-based section splitting over a borrowed line.
//!
//! Nothing here allocates: every section comes back as a slice of the
//! input. [`Cursor`] exposes the steps one at a time so the parser can
//! run section codecs between them; [`RawMessage`] runs them all.

use std::fmt;

use nom::{
    bytes::complete::{tag, take_until},
    character::complete::char,
    combinator::rest,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::MessageParseError;

type ScanResult<'a, O> = IResult<&'a str, O>;

/// `@tags ` or `:prefix `: the marker, everything up to the first space,
/// and that space.
fn marked_section(marker: char, input: &str) -> ScanResult<'_, &str> {
    terminated(preceded(char(marker), take_until(" ")), char(' '))(input)
}

/// The command token and the space after it.
fn command_token(input: &str) -> ScanResult<'_, &str> {
    terminated(take_until(" "), char(' '))(input)
}

/// `:content` with no middle parameters.
fn trailing(input: &str) -> ScanResult<'_, &str> {
    preceded(char(':'), rest)(input)
}

/// `arg :content`.
fn middle_then_trailing(input: &str) -> ScanResult<'_, &str> {
    terminated(take_until(" :"), tag(" :"))(input)
}

/// Step-wise scanner over the unconsumed part of a line.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(line: &'a str) -> Result<Self, MessageParseError> {
        if line.is_empty() {
            return Err(MessageParseError::Empty);
        }
        Ok(Self { rest: line })
    }

    /// Consumes a section opened by `marker`, if the line continues with one.
    pub(crate) fn section(
        &mut self,
        marker: char,
        missing_ending: MessageParseError,
    ) -> Result<Option<&'a str>, MessageParseError> {
        if !self.rest.starts_with(marker) {
            return Ok(None);
        }
        let (rest, section) = marked_section(marker, self.rest).map_err(|_| missing_ending)?;
        self.rest = rest;
        Ok(Some(section))
    }

    /// Fails with `err` if the line has been fully consumed.
    pub(crate) fn expect_more(&self, err: MessageParseError) -> Result<(), MessageParseError> {
        if self.rest.is_empty() {
            Err(err)
        } else {
            Ok(())
        }
    }

    /// Consumes the command token. Returns `true` alongside it if a
    /// separating space followed.
    pub(crate) fn command(&mut self) -> (&'a str, bool) {
        match command_token(self.rest) {
            Ok((rest, command)) => {
                self.rest = rest;
                (command, true)
            }
            Err(_) => (std::mem::take(&mut self.rest), false),
        }
    }

    /// Consumes the parameters as `(arg, content)`. An empty content slice
    /// counts as no content.
    pub(crate) fn params(&mut self) -> (Option<&'a str>, Option<&'a str>) {
        let input = std::mem::take(&mut self.rest);
        let (arg, content) = if let Ok((_, content)) = trailing(input) {
            (None, content)
        } else if let Ok((content, arg)) = middle_then_trailing(input) {
            (Some(arg), content)
        } else {
            (Some(input), "")
        };
        (arg, Some(content).filter(|c| !c.is_empty()))
    }
}

/// A line split into its sections without decoding any of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawMessage<'a> {
    /// Raw tags section, without the `@`.
    pub tags: Option<&'a str>,
    /// Raw prefix section, without the `:`.
    pub prefix: Option<&'a str>,
    /// The command token.
    pub command: &'a str,
    /// Middle parameters, verbatim.
    pub arg: Option<&'a str>,
    /// Trailing content, without the `:`.
    pub content: Option<&'a str>,
}

impl<'a> RawMessage<'a> {
    /// Splits `line` into sections.
    ///
    /// Only the line structure is checked. Section contents, including the
    /// command token, are left for their codecs.
    pub fn scan(line: &'a str) -> Result<Self, MessageParseError> {
        let mut cursor = Cursor::new(line)?;

        let tags = cursor.section('@', MessageParseError::NoCommandMissingTagsEnding)?;
        if tags.is_some() {
            cursor.expect_more(MessageParseError::NoCommandAfterTagsEnding)?;
        }

        let prefix = cursor.section(':', MessageParseError::NoCommandMissingPrefixEnding)?;
        if prefix.is_some() {
            cursor.expect_more(MessageParseError::NoCommandAfterPrefixEnding)?;
        }

        let (command, has_params) = cursor.command();
        let (arg, content) = if has_params {
            cursor.expect_more(MessageParseError::TrailingSpaceAfterCommand)?;
            cursor.params()
        } else {
            (None, None)
        };

        Ok(Self {
            tags,
            prefix,
            command,
            arg,
            content,
        })
    }
}

impl fmt::Display for RawMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tags) = self.tags {
            write!(f, "@{} ", tags)?;
        }
        if let Some(prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(self.command)?;
        if let Some(arg) = self.arg {
            write!(f, " {}", arg)?;
        }
        if let Some(content) = self.content {
            write!(f, " :{}", content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_simple_command() {
        let msg = RawMessage::scan("PING").unwrap();
        assert_eq!(msg.command, "PING");
        assert!(msg.tags.is_none());
        assert!(msg.prefix.is_none());
        assert!(msg.arg.is_none());
        assert!(msg.content.is_none());
    }

    #[test]
    fn test_scan_all_sections() {
        let msg = RawMessage::scan("@a=b;c :nick!user@host PRIVMSG #ch :Hello there").unwrap();
        assert_eq!(msg.tags, Some("a=b;c"));
        assert_eq!(msg.prefix, Some("nick!user@host"));
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.arg, Some("#ch"));
        assert_eq!(msg.content, Some("Hello there"));
    }

    #[test]
    fn test_scan_params() {
        let msg = RawMessage::scan(":name 353 tera = #channel :name1 name2").unwrap();
        assert_eq!(msg.arg, Some("tera = #channel"));
        assert_eq!(msg.content, Some("name1 name2"));

        let msg = RawMessage::scan("JOIN #channel").unwrap();
        assert_eq!(msg.arg, Some("#channel"));
        assert_eq!(msg.content, None);

        let msg = RawMessage::scan("PING :server :with colon").unwrap();
        assert_eq!(msg.arg, None);
        assert_eq!(msg.content, Some("server :with colon"));

        let msg = RawMessage::scan("PRIVMSG #channel :").unwrap();
        assert_eq!(msg.arg, Some("#channel"));
        assert_eq!(msg.content, None);

        let msg = RawMessage::scan("MODE #c +o :x").unwrap();
        assert_eq!(msg.arg, Some("#c +o"));
        assert_eq!(msg.content, Some("x"));
    }

    #[test]
    fn test_scan_errors() {
        let cases = [
            ("", MessageParseError::Empty),
            ("@tag", MessageParseError::NoCommandMissingTagsEnding),
            ("@tag ", MessageParseError::NoCommandAfterTagsEnding),
            ("@tag :name", MessageParseError::NoCommandMissingPrefixEnding),
            ("@tag :name ", MessageParseError::NoCommandAfterPrefixEnding),
            ("@tag :name PING ", MessageParseError::TrailingSpaceAfterCommand),
        ];
        for (input, expected) in cases {
            assert_eq!(RawMessage::scan(input), Err(expected), "input {:?}", input);
        }
    }

    #[test]
    fn test_display_reassembles() {
        let line = "@a :n PRIVMSG #c :hi";
        assert_eq!(RawMessage::scan(line).unwrap().to_string(), line);
    }
}
