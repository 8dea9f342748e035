//! Stream reassembly
//!
//! [`AgiCodec`] turns the raw byte stream coming from the peer into complete
//! protocol units. Framing depends on the session [`Phase`]:
//!
//! - while awaiting the handshake, a unit is everything up to and including the
//!   first blank line (`\n\n`);
//! - afterwards, a unit is a single `\n` terminated line.
//!
//! Bytes that do not yet form a complete unit stay in the buffer until the next
//! read. The codec remembers how far it has already searched, so a unit that
//! trickles in over many reads is scanned once. The codec never switches phase
//! on its own; the session state machine calls [`AgiCodec::set_phase`] after
//! it has handled the handshake.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::error::{AgiError, Result};
use crate::types::options::DEFAULT_MAX_BUFFER_SIZE;

const HANDSHAKE_SEPARATOR: &[u8] = b"\n\n";

/// Framing mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the blank-line terminated variable block
    #[default]
    AwaitingHandshake,
    /// Exchanging commands and single-line responses
    AwaitingResponse,
}

/// A complete unit extracted from the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// The handshake block, including its blank-line separator
    Handshake(String),
    /// One response line, without its terminator
    Line(String),
}

/// Decoder for the AGI byte stream
#[derive(Debug, Clone)]
pub struct AgiCodec {
    phase: Phase,
    max_buffer_size: usize,
    /// Buffer offset up to which no terminator was found
    next_index: usize,
}

impl AgiCodec {
    /// Create a codec in the handshake phase with the default buffer limit
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_buffer_size(DEFAULT_MAX_BUFFER_SIZE)
    }

    /// Create a codec in the handshake phase with a custom buffer limit
    #[must_use]
    pub const fn with_max_buffer_size(max_buffer_size: usize) -> Self {
        Self {
            phase: Phase::AwaitingHandshake,
            max_buffer_size,
            next_index: 0,
        }
    }

    /// Current framing phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of buffered bytes already searched without finding a terminator
    #[must_use]
    pub const fn scan_offset(&self) -> usize {
        self.next_index
    }

    /// Switch framing phase
    ///
    /// Phases only move forward; a request to go back to the handshake is ignored.
    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase == Phase::AwaitingResponse && phase == Phase::AwaitingHandshake {
            log::warn!("Ignoring attempt to re-enter the handshake phase");
            return;
        }
        if self.phase != phase {
            self.next_index = 0;
        }
        self.phase = phase;
    }

    fn split_handshake(&mut self, src: &mut BytesMut) -> Option<Frame> {
        // Step back so a separator straddling two reads is still found
        let start = self
            .next_index
            .saturating_sub(HANDSHAKE_SEPARATOR.len() - 1)
            .min(src.len());
        let Some(offset) = src[start..]
            .windows(HANDSHAKE_SEPARATOR.len())
            .position(|window| window == HANDSHAKE_SEPARATOR)
        else {
            self.next_index = src.len();
            return None;
        };

        self.next_index = 0;
        let block = src.split_to(start + offset + HANDSHAKE_SEPARATOR.len());
        Some(Frame::Handshake(String::from_utf8_lossy(&block).into_owned()))
    }

    fn split_line(&mut self, src: &mut BytesMut) -> Option<Frame> {
        let start = self.next_index.min(src.len());
        let Some(offset) = src[start..].iter().position(|b| *b == b'\n') else {
            self.next_index = src.len();
            return None;
        };

        self.next_index = 0;
        let pos = start + offset;
        let line = src.split_to(pos + 1);
        Some(Frame::Line(String::from_utf8_lossy(&line[..pos]).into_owned()))
    }
}

impl Default for AgiCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for AgiCodec {
    type Item = Frame;
    type Error = AgiError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        let frame = match self.phase {
            Phase::AwaitingHandshake => self.split_handshake(src),
            Phase::AwaitingResponse => self.split_line(src),
        };

        if frame.is_none() && src.len() > self.max_buffer_size {
            return Err(AgiError::buffer_overflow(self.max_buffer_size));
        }

        Ok(frame)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }

        if !src.is_empty() {
            log::debug!(
                "Discarding {} bytes of incomplete unit at end of stream ({:?})",
                src.len(),
                self.phase
            );
            src.clear();
        }
        self.next_index = 0;
        Ok(None)
    }
}
