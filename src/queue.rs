//! Command queue and response correlation
//!
//! The protocol carries no request IDs: the peer answers commands strictly in
//! the order it received them. [`CommandQueue`] therefore keeps at most one
//! command on the wire and matches every response to that command. Commands
//! submitted in the meantime wait in a FIFO backlog and are released one at a
//! time as responses arrive.
//!
//! ```
//! use agi_session::queue::{CommandQueue, PendingResponse};
//! use agi_session::Response;
//!
//! let mut queue = CommandQueue::new();
//! let (first, _first_rx) = PendingResponse::channel();
//! let (second, _second_rx) = PendingResponse::channel();
//!
//! assert_eq!(queue.submit("NOOP\n".into(), first).as_deref(), Some("NOOP\n"));
//! assert_eq!(queue.submit("HANGUP\n".into(), second), None);
//!
//! let next = queue.on_response(&Response::new(200, "0"));
//! assert_eq!(next.as_deref(), Some("HANGUP\n"));
//! ```

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::{AgiError, Result};
use crate::types::response::Response;

/// Sending side of a command's completion
pub type Completion = oneshot::Sender<Result<Response>>;

/// A command waiting in the backlog
struct QueuedCommand {
    wire: String,
    completion: Completion,
}

/// FIFO correlator enforcing a single command in flight
#[derive(Default)]
pub struct CommandQueue {
    /// Completion of the command currently on the wire
    current: Option<Completion>,
    /// Commands not yet written, oldest first
    backlog: VecDeque<QueuedCommand>,
}

impl CommandQueue {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a command
    ///
    /// Returns the wire text if the command became current and must be written
    /// now, or `None` if it was appended to the backlog.
    pub fn submit(&mut self, wire: String, completion: Completion) -> Option<String> {
        if self.current.is_some() {
            self.backlog.push_back(QueuedCommand { wire, completion });
            return None;
        }

        self.current = Some(completion);
        Some(wire)
    }

    /// Resolve the current command with `response`
    ///
    /// Returns `false` if no command was outstanding; the response is then
    /// unsolicited and only observed by the caller.
    pub fn complete_current(&mut self, response: &Response) -> bool {
        let Some(completion) = self.current.take() else {
            return false;
        };

        if completion.send(Ok(response.clone())).is_err() {
            log::debug!("Response {response} arrived for a command whose caller went away");
        }
        true
    }

    /// Promote the oldest backlogged command to current
    ///
    /// Returns its wire text, or `None` if a command is still outstanding or the
    /// backlog is empty.
    pub fn release_next(&mut self) -> Option<String> {
        if self.current.is_some() {
            return None;
        }

        let QueuedCommand { wire, completion } = self.backlog.pop_front()?;
        self.current = Some(completion);
        Some(wire)
    }

    /// Handle an incoming response: resolve the current command, then release
    /// the next one
    pub fn on_response(&mut self, response: &Response) -> Option<String> {
        self.complete_current(response);
        self.release_next()
    }

    /// Reject the current command and the whole backlog
    ///
    /// Returns the number of commands rejected.
    pub fn fail_all(&mut self, error: impl Fn() -> AgiError) -> usize {
        let mut failed = 0;
        let completions = self
            .current
            .take()
            .into_iter()
            .chain(self.backlog.drain(..).map(|queued| queued.completion));

        for completion in completions {
            let _ = completion.send(Err(error()));
            failed += 1;
        }
        failed
    }

    /// Whether a command is on the wire awaiting its response
    #[must_use]
    pub const fn has_current(&self) -> bool {
        self.current.is_some()
    }

    /// Number of commands waiting behind the current one
    #[must_use]
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }
}

impl std::fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandQueue")
            .field("has_current", &self.has_current())
            .field(
                "backlog",
                &self.backlog.iter().map(|q| q.wire.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Deferred result of a submitted command
///
/// Resolves with the matching [`Response`], with the error the session was
/// configured to fail pending commands with, or with
/// [`AgiError::SessionEnded`] if the session dropped the command.
/// It stays pending for as long as the command is neither answered nor failed.
#[must_use = "a PendingResponse does nothing unless awaited"]
#[derive(Debug)]
pub struct PendingResponse {
    rx: oneshot::Receiver<Result<Response>>,
}

impl PendingResponse {
    /// Create a linked completion/handle pair
    pub fn channel() -> (Completion, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// A handle that is already resolved with `error`
    pub fn rejected(error: AgiError) -> Self {
        let (tx, pending) = Self::channel();
        let _ = tx.send(Err(error));
        pending
    }
}

impl Future for PendingResponse {
    type Output = Result<Response>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(AgiError::session_ended(
                "session dropped the command before it was answered",
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}
