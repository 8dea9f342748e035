//! Command responses
//!
//! Every command sent to the peer is answered with a single line of the form
//! `<code> result=<payload>`, where `<code>` is exactly three ASCII digits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AgiError, Result};

/// Marker separating the status code from the payload
const RESULT_MARKER: &str = " result=";

/// Status code of a successfully executed command
pub const CODE_SUCCESS: u16 = 200;

/// A parsed response line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Three-digit status code
    pub code: u16,
    /// Everything after `result=`, verbatim
    pub result: String,
}

impl Response {
    /// Create a response from its parts
    pub fn new(code: u16, result: impl Into<String>) -> Self {
        Self {
            code,
            result: result.into(),
        }
    }

    /// Parse a single response line (without its terminator)
    ///
    /// A trailing `\r` left over from a CRLF line ending is not part of the
    /// payload.
    ///
    /// # Errors
    /// Returns [`AgiError::InvalidResponse`] if the line does not start with three
    /// digits followed by ` result=`
    pub fn parse(line: &str) -> Result<Self> {
        let digits = line
            .get(..3)
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| AgiError::invalid_response(line))?;

        let payload = line[3..]
            .strip_prefix(RESULT_MARKER)
            .ok_or_else(|| AgiError::invalid_response(line))?;
        let payload = payload.strip_suffix('\r').unwrap_or(payload);

        let code = digits
            .parse::<u16>()
            .map_err(|_| AgiError::invalid_response(line))?;

        Ok(Self::new(code, payload))
    }

    /// Whether the peer accepted the command (code 200)
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }

    /// Leading integer of the payload
    ///
    /// `"1 (timeout)"` yields `Some(1)`, `"-1"` yields `Some(-1)`.
    #[must_use]
    pub fn result_code(&self) -> Option<i64> {
        self.result.split_whitespace().next()?.parse().ok()
    }
}

impl FromStr for Response {
    type Err = AgiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}{RESULT_MARKER}{}", self.code, self.result)
    }
}
