//! IRC command types.
//!
//! A command is either a named command (`PING`, `PRIVMSG`) or a numeric
//! reply in the range `000`-`999`.
//!
//! # Reference
//! - RFC 1459 Section 2.3.1: Message format in 'pseudo' BNF

use std::fmt;
use std::str::FromStr;

use crate::error::{CommandParseError, ProtocolError};
use crate::response::Response;

use super::codec::{CommandCodec, StandardCommandCodec};

/// A numeric reply code, always in `0..=999`.
///
/// Formats as exactly three zero-padded digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct Numeric(u16);

impl Numeric {
    /// Largest valid numeric code.
    pub const MAX: u16 = 999;

    /// Creates a numeric, returning `None` when `code` is above 999.
    #[inline]
    pub const fn new(code: u16) -> Option<Self> {
        if code <= Self::MAX {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Returns the numeric code.
    #[inline]
    pub const fn code(self) -> u16 {
        self.0
    }

    /// Returns the named reply for this code, if it has one.
    pub fn response(self) -> Option<Response> {
        Response::from_code(self.0)
    }

    /// The three ASCII digits of the code.
    pub(crate) fn digits(self) -> [u8; 3] {
        let n = self.0;
        [
            b'0' + (n / 100) as u8,
            b'0' + (n / 10 % 10) as u8,
            b'0' + (n % 10) as u8,
        ]
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl TryFrom<u16> for Numeric {
    type Error = CommandParseError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Numeric::new(code).ok_or(CommandParseError::InvalidFormat)
    }
}

impl From<Numeric> for u16 {
    fn from(numeric: Numeric) -> Self {
        numeric.0
    }
}

impl From<Response> for Numeric {
    fn from(response: Response) -> Self {
        Numeric(response.code())
    }
}

macro_rules! named_commands {
    ($($name:ident),+ $(,)?) => {
        /// Named IRC commands, including the Twitch extensions.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[allow(clippy::upper_case_acronyms)]
        #[non_exhaustive]
        pub enum NamedCommand {
            $(
                #[allow(missing_docs)]
                $name,
            )+
        }

        impl NamedCommand {
            /// Every named command, sorted by wire name.
            pub const ALL: &'static [NamedCommand] = &[$(NamedCommand::$name),+];

            /// Returns the wire name of the command.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(NamedCommand::$name => stringify!($name),)+
                }
            }
        }
    };
}

named_commands! {
    ADMIN,
    AWAY,
    CAP,
    CLEARCHAT,
    CLEARMSG,
    CONNECT,
    ERROR,
    GLOBALUSERSTATE,
    HOSTTARGET,
    INFO,
    INVITE,
    ISON,
    JOIN,
    KICK,
    KILL,
    LINKS,
    LIST,
    MODE,
    NAMES,
    NICK,
    NOTICE,
    OPER,
    PART,
    PASS,
    PING,
    PONG,
    PRIVMSG,
    QUIT,
    RECONNECT,
    REHASH,
    RESTART,
    ROOMSTATE,
    SERVER,
    SQUIT,
    STATS,
    SUMMON,
    TIME,
    TOPIC,
    TRACE,
    USER,
    USERHOST,
    USERNOTICE,
    USERS,
    USERSTATE,
    VERSION,
    WALLOPS,
    WHISPER,
    WHO,
    WHOIS,
    WHOWAS,
}

impl fmt::Display for NamedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An IRC command: a named command or a numeric reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// A named command such as `PRIVMSG`.
    Named(NamedCommand),
    /// A numeric reply such as `353`.
    Numeric(Numeric),
}

impl Command {
    /// Creates a numeric command, returning `None` when `code` is above 999.
    pub const fn numeric(code: u16) -> Option<Self> {
        match Numeric::new(code) {
            Some(n) => Some(Command::Numeric(n)),
            None => None,
        }
    }

    /// Returns `true` for numeric replies.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Command::Numeric(_))
    }

    /// Returns the named command, if this is one.
    pub fn as_named(&self) -> Option<NamedCommand> {
        match self {
            Command::Named(name) => Some(*name),
            Command::Numeric(_) => None,
        }
    }

    /// Returns the numeric reply, if this is one.
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            Command::Numeric(n) => Some(*n),
            Command::Named(_) => None,
        }
    }

    /// Parses a command token without building a descriptive error.
    ///
    /// Accepts exactly three decimal digits as a numeric, or a known
    /// command name in any case.
    pub fn try_parse(input: &str) -> Result<Self, CommandParseError> {
        StandardCommandCodec.try_parse(input)
    }

    /// Parses a command token, reporting failures with the offending input.
    pub fn parse(input: &str) -> crate::Result<Self> {
        StandardCommandCodec.parse(input)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Named(name) => f.write_str(name.as_str()),
            Command::Numeric(n) => fmt::Display::fmt(n, f),
        }
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

impl From<NamedCommand> for Command {
    fn from(name: NamedCommand) -> Self {
        Command::Named(name)
    }
}

impl From<Numeric> for Command {
    fn from(numeric: Numeric) -> Self {
        Command::Numeric(numeric)
    }
}

impl From<Response> for Command {
    fn from(response: Response) -> Self {
        Command::Numeric(response.into())
    }
}
