//! Command token codecs.
//!
//! [`StandardCommandCodec`] is the reference classification.
//! [`FastCommandCodec`] gives the same answers for every input but looks
//! names up in a sorted table after normalizing case on the stack.

use std::fmt::{self, Write};

use crate::error::{CommandParseError, ProtocolError};

use super::types::{Command, NamedCommand, Numeric};

/// Length of the longest named command (`GLOBALUSERSTATE`).
const MAX_NAME_LEN: usize = 15;

/// A strategy for reading and writing command tokens.
pub trait CommandCodec {
    /// Parses a command token.
    fn try_parse(&self, input: &str) -> Result<Command, CommandParseError>;

    /// Parses a command token, reporting failures with the offending input.
    fn parse(&self, input: &str) -> crate::Result<Command> {
        self.try_parse(input)
            .map_err(|cause| ProtocolError::InvalidCommand {
                string: input.to_owned(),
                cause,
            })
    }

    /// Writes the wire form of `command`.
    fn format(&self, command: &Command, out: &mut dyn Write) -> fmt::Result {
        write!(out, "{}", command)
    }
}

/// Returns the numeric value of a token made of exactly three ASCII digits.
#[inline]
fn three_digits(input: &[u8]) -> Option<Numeric> {
    match input {
        [a, b, c] if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() => {
            let code = u16::from(a - b'0') * 100 + u16::from(b - b'0') * 10 + u16::from(c - b'0');
            Numeric::new(code)
        }
        _ => None,
    }
}

/// Reference command classification.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCommandCodec;

impl CommandCodec for StandardCommandCodec {
    fn try_parse(&self, input: &str) -> Result<Command, CommandParseError> {
        if input.is_empty() {
            return Err(CommandParseError::Empty);
        }

        if let Some(numeric) = three_digits(input.as_bytes()) {
            return Ok(Command::Numeric(numeric));
        }

        if input.as_bytes()[0].is_ascii_digit() {
            return Err(CommandParseError::InvalidFormat);
        }

        NamedCommand::ALL
            .iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(input))
            .map(|name| Command::Named(*name))
            .ok_or(CommandParseError::InvalidFormat)
    }
}

/// Table-driven command classification.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastCommandCodec;

impl CommandCodec for FastCommandCodec {
    fn try_parse(&self, input: &str) -> Result<Command, CommandParseError> {
        let bytes = input.as_bytes();
        match bytes.len() {
            0 => return Err(CommandParseError::Empty),
            1..=MAX_NAME_LEN => {}
            _ => return Err(CommandParseError::InvalidFormat),
        }

        if bytes[0].is_ascii_digit() {
            return three_digits(bytes)
                .map(Command::Numeric)
                .ok_or(CommandParseError::InvalidFormat);
        }

        let mut buf = [0u8; MAX_NAME_LEN];
        for (dst, src) in buf.iter_mut().zip(bytes) {
            if !src.is_ascii_alphabetic() {
                return Err(CommandParseError::InvalidFormat);
            }
            *dst = src.to_ascii_uppercase();
        }
        let upper = &buf[..bytes.len()];

        NamedCommand::ALL
            .binary_search_by(|name| name.as_str().as_bytes().cmp(upper))
            .map(|i| Command::Named(NamedCommand::ALL[i]))
            .map_err(|_| CommandParseError::InvalidFormat)
    }

    fn format(&self, command: &Command, out: &mut dyn Write) -> fmt::Result {
        match command {
            Command::Named(name) => out.write_str(name.as_str()),
            Command::Numeric(n) => {
                for digit in n.digits() {
                    out.write_char(char::from(digit))?;
                }
                Ok(())
            }
        }
    }
}
