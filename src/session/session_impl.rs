//! `AgiSession` implementation
//!
//! This module contains the constructors and public API methods for `AgiSession`.

use std::sync::Arc;

use futures::Stream;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{OnceCell, mpsc};
use tokio_util::codec::FramedRead;

use crate::codec::AgiCodec;
use crate::command::{Command, LINE_TERMINATOR};
use crate::queue::{CommandQueue, PendingResponse};
use crate::types::events::SessionEvent;
use crate::types::identifiers::SessionId;
use crate::types::options::SessionOptions;
use crate::types::variables::Variables;

use super::driver::{DriverCommand, SessionDriver};
use super::state::SessionState;

impl super::AgiSession {
    /// Start a session over a bidirectional stream with default options
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime
    pub fn new<S>(stream: S) -> Self
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        Self::new_with_options(stream, SessionOptions::default())
    }

    /// Start a session over a bidirectional stream
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime
    pub fn new_with_options<S>(stream: S, options: SessionOptions) -> Self
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        Self::from_parts_with_options(reader, writer, options)
    }

    /// Start a session over separate read and write halves with default options
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime
    pub fn from_parts<R, W>(reader: R, writer: W) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        Self::from_parts_with_options(reader, writer, SessionOptions::default())
    }

    /// Start a session over separate read and write halves
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime
    pub fn from_parts_with_options<R, W>(reader: R, writer: W, options: SessionOptions) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let id = SessionId::generate();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let variables = Arc::new(OnceCell::new());

        log::debug!("[{id}] Starting session with {options:?}");

        let driver = SessionDriver {
            id: id.clone(),
            frames: FramedRead::new(
                reader,
                AgiCodec::with_max_buffer_size(options.max_buffer_size),
            ),
            writer: Some(writer),
            state: SessionState::new(),
            queue: CommandQueue::new(),
            options,
            variables: variables.clone(),
            event_tx,
            reading: true,
        };
        let driver = tokio::spawn(driver.run(command_rx));

        Self {
            id,
            command_tx,
            event_rx: Some(event_rx),
            variables,
            driver,
        }
    }

    /// Start a session on the process's stdin/stdout (classic AGI scripts)
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime
    #[must_use]
    pub fn stdio() -> Self {
        Self::from_parts(tokio::io::stdin(), tokio::io::stdout())
    }

    /// Session identifier used in log lines
    #[must_use]
    pub const fn id(&self) -> &SessionId {
        &self.id
    }

    /// Handshake variables, once the handshake has been received
    #[must_use]
    pub fn variables(&self) -> Option<&Variables> {
        self.variables.get()
    }

    /// Whether the driver task has stopped
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.driver.is_finished()
    }

    /// Submit a raw command line
    ///
    /// A missing line terminator is appended. The command is written as soon as
    /// no other command is outstanding.
    pub fn send(&self, line: impl Into<String>) -> PendingResponse {
        let mut wire = line.into();
        if !wire.ends_with(LINE_TERMINATOR) {
            wire.push(LINE_TERMINATOR);
        }
        self.submit(wire)
    }

    /// Submit a typed command
    pub fn send_command(&self, command: &Command) -> PendingResponse {
        self.submit(command.to_wire())
    }

    /// `EXEC` a dialplan application with arguments
    pub fn exec<I, S>(&self, application: impl Into<String>, args: I) -> PendingResponse
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_command(&Command::exec(application, args))
    }

    /// Log a message on the peer's console (level defaults to 1)
    pub fn verbose(&self, message: impl Into<String>, level: Option<i32>) -> PendingResponse {
        self.send_command(&Command::verbose(message, level))
    }

    /// Read a channel variable
    pub fn get_variable(&self, name: impl Into<String>) -> PendingResponse {
        self.send_command(&Command::get_variable(name))
    }

    /// Evaluate an expression such as `${CALLERID(num)}`
    pub fn get_full_variable(&self, expression: impl Into<String>) -> PendingResponse {
        self.send_command(&Command::get_full_variable(expression))
    }

    /// Play a sound file, interruptible by `escape_digits` (defaults to all keys)
    pub fn stream_file(
        &self,
        filename: impl Into<String>,
        escape_digits: Option<&str>,
    ) -> PendingResponse {
        self.send_command(&Command::stream_file(filename, escape_digits))
    }

    /// Wait for a DTMF digit (timeout defaults to 5000 ms)
    pub fn wait_for_digit(&self, timeout_ms: Option<i64>) -> PendingResponse {
        self.send_command(&Command::wait_for_digit(timeout_ms))
    }

    /// Hang up the channel
    pub fn hangup(&self) -> PendingResponse {
        self.send_command(&Command::Hangup)
    }

    /// Close the write side of the transport
    ///
    /// Commands still current or backlogged are not completed. Commands
    /// submitted afterwards resolve with
    /// [`AgiError::SessionEnded`](crate::AgiError::SessionEnded).
    pub fn end(&self) {
        if self.command_tx.send(DriverCommand::End).is_err() {
            log::debug!("[{}] End requested after the driver stopped", self.id);
        }
    }

    /// Wait for the next session event
    ///
    /// Returns `None` once the driver has stopped and all events were consumed,
    /// or if the event receiver was taken.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.event_rx.as_mut()?.recv().await
    }

    /// Take the event receiver
    ///
    /// This allows the caller to handle events on a separate task
    pub const fn take_event_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<SessionEvent>> {
        self.event_rx.take()
    }

    /// Take the events as a `Stream`
    pub fn events(&mut self) -> Option<impl Stream<Item = SessionEvent> + Send + 'static> {
        let mut event_rx = self.event_rx.take()?;
        Some(async_stream::stream! {
            while let Some(event) = event_rx.recv().await {
                yield event;
            }
        })
    }

    fn submit(&self, wire: String) -> PendingResponse {
        let (completion, pending) = PendingResponse::channel();
        if self
            .command_tx
            .send(DriverCommand::Submit { wire, completion })
            .is_err()
        {
            // The completion was dropped with the message; the handle resolves
            // with `SessionEnded`.
            log::debug!("[{}] Command submitted after the driver stopped", self.id);
        }
        pending
    }
}
