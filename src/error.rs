//! Error types for AGI sessions

use thiserror::Error;

/// Main error type for AGI sessions
#[derive(Error, Debug)]
pub enum AgiError {
    /// I/O error reported by the underlying transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport layer error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Decode buffer grew past the configured limit without a complete unit
    #[error("Decode buffer exceeded maximum size of {limit} bytes")]
    BufferOverflow {
        /// Configured maximum buffer size
        limit: usize,
    },

    /// The peer sent a line that is not a valid response
    #[error("Peer hung up: {0}")]
    Hangup(String),

    /// The transport closed while the command was outstanding
    #[error("Stream closed: {0}")]
    StreamClosed(String),

    /// The session no longer accepts commands
    #[error("Session ended: {0}")]
    SessionEnded(String),

    /// A line could not be parsed as a response
    #[error("Invalid response line: {0:?}")]
    InvalidResponse(String),
}

/// Result type alias for AGI session operations
pub type Result<T> = std::result::Result<T, AgiError>;

impl AgiError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a buffer overflow error
    #[must_use]
    pub const fn buffer_overflow(limit: usize) -> Self {
        Self::BufferOverflow { limit }
    }

    /// Create a hangup error
    pub fn hangup(line: impl Into<String>) -> Self {
        Self::Hangup(line.into())
    }

    /// Create a stream closed error
    pub fn stream_closed(msg: impl Into<String>) -> Self {
        Self::StreamClosed(msg.into())
    }

    /// Create a session ended error
    pub fn session_ended(msg: impl Into<String>) -> Self {
        Self::SessionEnded(msg.into())
    }

    /// Create an invalid response error
    pub fn invalid_response(line: impl Into<String>) -> Self {
        Self::InvalidResponse(line.into())
    }

    /// Whether this error means the session is over for the caller
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Hangup(_) | Self::StreamClosed(_) | Self::SessionEnded(_)
        )
    }
}
