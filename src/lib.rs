//! # AGI sessions for Rust
//!
//! An async client for the Asterisk Gateway Interface (AGI). The peer (Asterisk)
//! opens the conversation with a block of `name: value` variables, then answers
//! each command line with a single `<code> result=<payload>` line. This crate
//! handles the whole conversation over any tokio byte stream.
//!
//! ## Quick Start
//!
//! ```no_run
//! use agi_session::{AgiSession, SessionEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Classic AGI: Asterisk runs us with the channel on stdin/stdout
//!     let mut session = AgiSession::stdio();
//!
//!     if let Some(SessionEvent::Variables(vars)) = session.next_event().await {
//!         log::info!("Request: {:?}", vars.request());
//!     }
//!
//!     let response = session.stream_file("hello-world", None).await?;
//!     log::info!("Playback finished: {response}");
//!
//!     session.hangup().await?;
//!     session.end();
//!     Ok(())
//! }
//! ```
//!
//! ## Core Features
//!
//! ### 1. Stream reassembly
//!
//! Bytes may arrive in arbitrary chunks. [`codec::AgiCodec`] buffers them and
//! only yields a unit once it is complete: the blank-line terminated handshake
//! block first, then individual response lines.
//!
//! ### 2. One command in flight
//!
//! The protocol has no request IDs, so responses are matched to commands purely
//! by order. [`queue::CommandQueue`] writes one command at a time and keeps the
//! rest in a FIFO backlog. Every command method returns a
//! [`PendingResponse`](queue::PendingResponse) immediately:
//!
//! ```no_run
//! # use agi_session::AgiSession;
//! # async fn example(session: &AgiSession) -> agi_session::Result<()> {
//! // All three are submitted at once; only the first is written until it is answered.
//! let a = session.get_variable("CALLERID(num)");
//! let b = session.get_variable("CHANNEL");
//! let c = session.verbose("looked up caller", Some(3));
//!
//! let (a, b, c) = (a.await?, b.await?, c.await?);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Events
//!
//! Session lifecycle is reported through [`SessionEvent`]: the handshake
//! variables, every response, a hangup (a line that is not a valid response),
//! transport errors and end of stream.
//!
//! ### 4. Argument encoding
//!
//! [`command::quote_argument`] leaves simple words alone and quotes everything
//! else, escaping `"` and `\`.
//!
//! ## Error Handling
//!
//! All failures are reported as [`AgiError`]. Command methods never fail
//! synchronously; failures reach the caller through the awaited
//! [`PendingResponse`](queue::PendingResponse) or through events.
//!
//! By default a hangup or a closed transport leaves outstanding commands
//! unresolved. Use [`SessionOptions`] to reject them instead:
//!
//! ```no_run
//! # use agi_session::{AgiSession, SessionOptions};
//! # async fn example(stream: tokio::net::TcpStream) {
//! let options = SessionOptions::builder()
//!     .fail_pending_on_hangup(true)
//!     .fail_pending_on_close(true)
//!     .build();
//! let session = AgiSession::new_with_options(stream, options);
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`command`]: Command formatting and argument encoding
//! - [`codec`]: Stream reassembly
//! - [`session`]: State machine, driver task and the [`AgiSession`] facade
//! - [`queue`]: Single-in-flight command queue and response correlation
//! - [`types`]: Responses, variables, events and options
//! - [`error`]: Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod command;
pub mod error;
pub mod queue;
pub mod session;
pub mod types;

// Re-export commonly used types for external API
pub use command::{Command, quote_argument, unquote_argument};
pub use error::{AgiError, Result};
pub use queue::PendingResponse;
pub use session::AgiSession;
pub use types::{
    Response, SessionEvent, SessionId, SessionOptions, SessionOptionsBuilder, Variables,
};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
