//! Message content and CTCP framing.
//!
//! CTCP content is `\x01COMMAND text\x01`. The closing delimiter is
//! optional on input but always written on output, so a parse/format
//! round trip normalizes truncated CTCP messages.

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::error::{ContentParseError, ProtocolError};

/// The control byte that opens and closes CTCP content.
pub const CTCP_DELIMITER: char = '\x01';

/// The trailing payload of a message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Content {
    /// The text, without any CTCP framing.
    pub text: String,
    /// The CTCP command token, e.g. `ACTION`.
    pub ctcp: Option<String>,
}

impl Content {
    /// Creates plain content.
    ///
    /// Text must not contain CR, LF or NUL, and must not start with
    /// [`CTCP_DELIMITER`]. Empty text formats as no content at all.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ctcp: None,
        }
    }

    /// Creates CTCP content.
    ///
    /// The token must be non-empty and free of spaces and
    /// [`CTCP_DELIMITER`]; debug builds assert this.
    pub fn ctcp(ctcp: impl Into<String>, text: impl Into<String>) -> Self {
        let ctcp = ctcp.into();
        debug_assert!(
            !ctcp.is_empty() && !ctcp.contains(&[' ', CTCP_DELIMITER][..]),
            "invalid CTCP token {:?}",
            ctcp
        );
        Self {
            text: text.into(),
            ctcp: Some(ctcp),
        }
    }

    /// Returns `true` if this is an `ACTION` (`/me`) message.
    pub fn is_action(&self) -> bool {
        self.ctcp.as_deref() == Some("ACTION")
    }

    /// Parses the trailing segment (without the leading `:`).
    ///
    /// `"\x01 text"` is rejected with [`ContentParseError::EmptyCtcp`]
    /// rather than read as a CTCP message with an empty token, which is
    /// stricter than lenient CTCP readers that accept it.
    pub fn try_parse(input: &str) -> Result<Self, ContentParseError> {
        let Some(body) = input.strip_prefix(CTCP_DELIMITER) else {
            if input.is_empty() {
                return Err(ContentParseError::Empty);
            }
            return Ok(Self::new(input));
        };

        let body = body.strip_suffix(CTCP_DELIMITER).unwrap_or(body);
        match body.split_once(' ') {
            Some(("", _)) => Err(ContentParseError::EmptyCtcp),
            Some((ctcp, text)) => Ok(Self {
                text: text.to_owned(),
                ctcp: Some(ctcp.to_owned()),
            }),
            None => Err(ContentParseError::MissingCtcpEnding),
        }
    }

    /// Parses the trailing segment, reporting failures with the offending input.
    pub fn parse(input: &str) -> crate::Result<Self> {
        Self::try_parse(input).map_err(|cause| ProtocolError::InvalidContent {
            string: input.to_owned(),
            cause,
        })
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ctcp {
            None => f.write_str(&self.text),
            Some(ctcp) => {
                f.write_char(CTCP_DELIMITER)?;
                write!(f, "{} {}", ctcp, self.text)?;
                f.write_char(CTCP_DELIMITER)
            }
        }
    }
}

impl FromStr for Content {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Content::parse(s)
    }
}
