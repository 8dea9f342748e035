//! `AgiSession`, the public entry point
//!
//! A session wraps one transport (a TCP stream from a FastAGI server, the
//! process's stdin/stdout, or any other `AsyncRead`/`AsyncWrite` pair) and
//! drives the protocol over it:
//! - reassembles the handshake block and response lines from the byte stream
//! - publishes lifecycle events (variables, responses, hangup, errors, close)
//! - serializes commands so that exactly one is on the wire at a time
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        AgiSession                          │
//! │                                                            │
//! │   exec / verbose / ...  ──► mpsc ──┐                       │
//! │                                    ▼                       │
//! │                         ┌────────────────────┐             │
//! │   transport reader ───► │   SessionDriver    │ ──► writer  │
//! │   (FramedRead/AgiCodec) │ state + queue      │             │
//! │                         └─────────┬──────────┘             │
//! │                                   │                        │
//! │   PendingResponse ◄── oneshot ────┤                        │
//! │   next_event()    ◄── mpsc ───────┘                        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Command methods never block and never fail synchronously. They return a
//! [`PendingResponse`](crate::queue::PendingResponse) that resolves once the
//! matching response has been read.
//!
//! # Example
//!
//! ```no_run
//! use agi_session::{AgiSession, SessionEvent};
//! use tokio::net::TcpListener;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let listener = TcpListener::bind("0.0.0.0:4573").await?;
//! let (stream, _) = listener.accept().await?;
//! let mut session = AgiSession::new(stream);
//!
//! if let Some(SessionEvent::Variables(vars)) = session.next_event().await {
//!     log::info!("Call on {:?}", vars.channel());
//! }
//!
//! session.verbose("Hello from Rust", None).await?;
//! let digit = session.wait_for_digit(Some(3000)).await?;
//! log::info!("Pressed: {:?}", digit.result_code());
//! session.hangup().await?;
//! session.end();
//! # Ok(())
//! # }
//! ```

mod driver;
mod session_impl;
mod state;

use std::sync::Arc;

use tokio::sync::{OnceCell, mpsc};
use tokio::task::JoinHandle;

use crate::types::events::SessionEvent;
use crate::types::identifiers::SessionId;
use crate::types::variables::Variables;

pub use state::{Dispatch, SessionState, parse_handshake};

/// Client side of one AGI session
///
/// Dropping the session stops its driver task. Commands still pending at that
/// point resolve with [`AgiError::SessionEnded`](crate::AgiError::SessionEnded).
pub struct AgiSession {
    /// Identifier used in log lines
    id: SessionId,
    /// Requests to the driver task
    command_tx: mpsc::UnboundedSender<driver::DriverCommand>,
    /// Event stream receiver (until taken by the caller)
    event_rx: Option<mpsc::UnboundedReceiver<SessionEvent>>,
    /// Handshake variables, set once by the driver
    variables: Arc<OnceCell<Variables>>,
    /// Driver task handle
    driver: JoinHandle<()>,
}
