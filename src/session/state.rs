//! Session state machine
//!
//! [`SessionState`] consumes the frames produced by [`AgiCodec`](crate::codec::AgiCodec)
//! and decides what each one means for the session. It owns the phase: the
//! handshake block moves it from `AwaitingHandshake` to `AwaitingResponse`, and
//! nothing moves it back.

use crate::codec::{Frame, Phase};
use crate::types::response::Response;
use crate::types::variables::Variables;

/// Outcome of handling one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The handshake completed with these variables
    Variables(Variables),
    /// A well-formed response line
    Response(Response),
    /// A line that does not match the response grammar
    Hangup(String),
    /// Nothing to report (blank line, or a frame out of phase)
    Ignored,
}

/// Two-phase session state machine
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    phase: Phase,
}

impl SessionState {
    /// Create a state machine awaiting the handshake
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::AwaitingHandshake,
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Handle one frame from the reassembler
    pub fn handle_frame(&mut self, frame: Frame) -> Dispatch {
        match frame {
            Frame::Handshake(block) => self.handle_handshake(&block),
            Frame::Line(line) => Self::handle_line(&line),
        }
    }

    fn handle_handshake(&mut self, block: &str) -> Dispatch {
        if self.phase == Phase::AwaitingResponse {
            log::warn!("Ignoring handshake block received after the handshake completed");
            return Dispatch::Ignored;
        }

        let variables = parse_handshake(block);
        self.phase = Phase::AwaitingResponse;
        Dispatch::Variables(variables)
    }

    fn handle_line(line: &str) -> Dispatch {
        if line.is_empty() {
            return Dispatch::Ignored;
        }

        match Response::parse(line) {
            Ok(response) => Dispatch::Response(response),
            Err(_) => Dispatch::Hangup(line.to_string()),
        }
    }
}

/// Parse a handshake block into variables
///
/// Each non-empty line is split on its first `:`. The value is trimmed and
/// defaults to empty when the colon is missing. Later duplicates win.
///
/// # Examples
/// ```
/// use agi_session::session::parse_handshake;
///
/// let vars = parse_handshake("foo: bar\nbaz:qux\n\n");
/// assert_eq!(vars.get("foo"), Some("bar"));
/// assert_eq!(vars.get("baz"), Some("qux"));
/// assert_eq!(vars.len(), 2);
/// ```
#[must_use]
pub fn parse_handshake(block: &str) -> Variables {
    let mut variables = Variables::new();
    for line in block.split('\n').filter(|line| !line.is_empty()) {
        let (name, value) = line.split_once(':').unwrap_or((line, ""));
        variables.insert(name, value.trim());
    }
    variables
}
