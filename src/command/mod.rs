//! Outgoing commands
//!
//! Each [`Command`] renders to exactly one wire line. Arguments are encoded with
//! [`quote_argument`]; numeric arguments are written as plain integers.
//!
//! ```
//! use agi_session::command::Command;
//!
//! let cmd = Command::stream_file("welcome", None);
//! assert_eq!(cmd.to_wire(), "STREAM FILE welcome \"1234567890#*\"\n");
//! ```

mod argument;

use std::fmt;

pub use argument::{quote_argument, unquote_argument};

/// Line terminator appended to every command
pub const LINE_TERMINATOR: char = '\n';

/// Verbosity level used by `VERBOSE` when none is given
pub const DEFAULT_VERBOSE_LEVEL: i32 = 1;

/// Digits that interrupt `STREAM FILE` when none are given
pub const DEFAULT_ESCAPE_DIGITS: &str = "1234567890#*";

/// Timeout in milliseconds used by `WAIT FOR DIGIT` when none is given
pub const DEFAULT_DIGIT_TIMEOUT_MS: i64 = 5000;

/// A command understood by the peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `EXEC <application> <args...>`
    Exec {
        /// Dialplan application to run
        application: String,
        /// Arguments passed to the application, each encoded separately
        args: Vec<String>,
    },
    /// `VERBOSE <message> <level>`
    Verbose {
        /// Message to log on the peer's console
        message: String,
        /// Verbosity level
        level: i32,
    },
    /// `GET VARIABLE <name>`
    GetVariable {
        /// Channel variable name
        name: String,
    },
    /// `GET FULL VARIABLE <expression>`
    GetFullVariable {
        /// Expression evaluated by the peer, e.g. `${CALLERID(num)}`
        expression: String,
    },
    /// `STREAM FILE <filename> <escape digits>`
    StreamFile {
        /// Sound file to play, without extension
        filename: String,
        /// Digits that interrupt playback
        escape_digits: String,
    },
    /// `WAIT FOR DIGIT <timeout>`
    WaitForDigit {
        /// Timeout in milliseconds; `-1` waits forever
        timeout_ms: i64,
    },
    /// `HANGUP`
    Hangup,
}

impl Command {
    /// Build an `EXEC` command
    pub fn exec<I, S>(application: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exec {
            application: application.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a `VERBOSE` command, defaulting the level to [`DEFAULT_VERBOSE_LEVEL`]
    pub fn verbose(message: impl Into<String>, level: Option<i32>) -> Self {
        Self::Verbose {
            message: message.into(),
            level: level.unwrap_or(DEFAULT_VERBOSE_LEVEL),
        }
    }

    /// Build a `GET VARIABLE` command
    pub fn get_variable(name: impl Into<String>) -> Self {
        Self::GetVariable { name: name.into() }
    }

    /// Build a `GET FULL VARIABLE` command
    pub fn get_full_variable(expression: impl Into<String>) -> Self {
        Self::GetFullVariable {
            expression: expression.into(),
        }
    }

    /// Build a `STREAM FILE` command, defaulting the escape digits to
    /// [`DEFAULT_ESCAPE_DIGITS`]
    pub fn stream_file(filename: impl Into<String>, escape_digits: Option<&str>) -> Self {
        Self::StreamFile {
            filename: filename.into(),
            escape_digits: escape_digits.unwrap_or(DEFAULT_ESCAPE_DIGITS).to_string(),
        }
    }

    /// Build a `WAIT FOR DIGIT` command, defaulting the timeout to
    /// [`DEFAULT_DIGIT_TIMEOUT_MS`]
    #[must_use]
    pub fn wait_for_digit(timeout_ms: Option<i64>) -> Self {
        Self::WaitForDigit {
            timeout_ms: timeout_ms.unwrap_or(DEFAULT_DIGIT_TIMEOUT_MS),
        }
    }

    /// The command line including its terminator
    #[must_use]
    pub fn to_wire(&self) -> String {
        format!("{self}{LINE_TERMINATOR}")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exec { application, args } => {
                write!(f, "EXEC {}", quote_argument(application))?;
                for arg in args {
                    write!(f, " {}", quote_argument(arg))?;
                }
                Ok(())
            }
            Self::Verbose { message, level } => {
                write!(f, "VERBOSE {} {level}", quote_argument(message))
            }
            Self::GetVariable { name } => write!(f, "GET VARIABLE {}", quote_argument(name)),
            Self::GetFullVariable { expression } => {
                write!(f, "GET FULL VARIABLE {}", quote_argument(expression))
            }
            Self::StreamFile {
                filename,
                escape_digits,
            } => write!(
                f,
                "STREAM FILE {} {}",
                quote_argument(filename),
                quote_argument(escape_digits)
            ),
            Self::WaitForDigit { timeout_ms } => write!(f, "WAIT FOR DIGIT {timeout_ms}"),
            Self::Hangup => f.write_str("HANGUP"),
        }
    }
}
