//! IRC message prefix (source) types.
//!
//! The prefix is `name[!user][@host]`. The host is split off at the last
//! `@`, then the user at the first `!` of what remains.

use std::fmt;
use std::str::FromStr;

use crate::error::{PrefixParseError, ProtocolError};

/// The origin of a message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prefix {
    /// Server name or nickname. Never empty.
    pub name: String,
    /// Username, if present. Never empty.
    pub user: Option<String>,
    /// Hostname, if present. Never empty.
    pub host: Option<String>,
}

impl Prefix {
    /// Creates a prefix with only a name.
    ///
    /// The name must be non-empty and free of spaces, `!` and `@`, or the
    /// formatted prefix will not parse back. Debug builds assert this.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(
            !name.is_empty() && !name.contains(&[' ', '!', '@'][..]),
            "invalid prefix name {:?}",
            name
        );
        Self {
            name,
            user: None,
            host: None,
        }
    }

    /// Sets the user part. Must be non-empty and free of spaces and `@`.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        let user = user.into();
        debug_assert!(
            !user.is_empty() && !user.contains(&[' ', '@'][..]),
            "invalid prefix user {:?}",
            user
        );
        self.user = Some(user);
        self
    }

    /// Sets the host part. Must be non-empty and free of spaces.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        let host = host.into();
        debug_assert!(
            !host.is_empty() && !host.contains(' '),
            "invalid prefix host {:?}",
            host
        );
        self.host = Some(host);
        self
    }

    /// Parses a prefix segment (without the leading `:`).
    pub fn try_parse(input: &str) -> Result<Self, PrefixParseError> {
        if input.is_empty() {
            return Err(PrefixParseError::Empty);
        }

        let (rest, host) = match input.rsplit_once('@') {
            Some((_, "")) => return Err(PrefixParseError::EmptyHost),
            Some((rest, host)) => (rest, Some(host)),
            None => (input, None),
        };

        let (name, user) = match rest.split_once('!') {
            Some((_, "")) => return Err(PrefixParseError::EmptyUser),
            Some((name, user)) => (name, Some(user)),
            None => (rest, None),
        };

        if name.is_empty() {
            return Err(PrefixParseError::EmptyName);
        }

        Ok(Self {
            name: name.to_owned(),
            user: user.map(str::to_owned),
            host: host.map(str::to_owned),
        })
    }

    /// Parses a prefix segment, reporting failures with the offending input.
    pub fn parse(input: &str) -> crate::Result<Self> {
        Self::try_parse(input).map_err(|cause| ProtocolError::InvalidPrefix {
            string: input.to_owned(),
            cause,
        })
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(user) = &self.user {
            write!(f, "!{}", user)?;
        }
        if let Some(host) = &self.host {
            write!(f, "@{}", host)?;
        }
        Ok(())
    }
}

impl FromStr for Prefix {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prefix::parse(s)
    }
}
