//! Session lifecycle events

use crate::error::AgiError;

use super::response::Response;
use super::variables::Variables;

/// Event published by a running session
///
/// `Variables` fires once per session. `Response` and `Hangup` fire once per
/// received line. `Error` and `Closed` are passed through from the transport.
#[derive(Debug)]
pub enum SessionEvent {
    /// The handshake block was received and parsed
    Variables(Variables),
    /// A response line was received
    Response(Response),
    /// A line did not match the response grammar; the peer has left
    Hangup {
        /// The offending line
        line: String,
    },
    /// The transport reported an error
    Error(AgiError),
    /// The transport's read side reached end of stream
    Closed,
}

impl SessionEvent {
    /// Whether this event means no further responses will arrive
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Hangup { .. } | Self::Closed)
    }
}
