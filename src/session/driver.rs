//! Background driver task for `AgiSession`
//!
//! One driver task runs per session. It owns the reassembler, the state machine,
//! the command queue and the write half of the transport, and multiplexes
//! between incoming frames and requests from the facade. Every frame is handled
//! to completion (events, correlation, next write) before the next one is read.

use std::sync::Arc;

use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::{OnceCell, mpsc};
use tokio_util::codec::FramedRead;

use crate::codec::{AgiCodec, Frame};
use crate::error::{AgiError, Result};
use crate::queue::{Completion, CommandQueue};
use crate::types::events::SessionEvent;
use crate::types::identifiers::SessionId;
use crate::types::options::SessionOptions;
use crate::types::variables::Variables;

use super::state::{Dispatch, SessionState};

/// Requests sent from the facade to the driver
pub(super) enum DriverCommand {
    /// Queue a command for transmission
    Submit {
        /// Wire text including terminator
        wire: String,
        /// Where to deliver the response
        completion: Completion,
    },
    /// Shut down the write side of the transport
    End,
}

pub(super) struct SessionDriver<R, W> {
    pub(super) id: SessionId,
    pub(super) frames: FramedRead<R, AgiCodec>,
    pub(super) writer: Option<W>,
    pub(super) state: SessionState,
    pub(super) queue: CommandQueue,
    pub(super) options: SessionOptions,
    pub(super) variables: Arc<OnceCell<Variables>>,
    pub(super) event_tx: mpsc::UnboundedSender<SessionEvent>,
    pub(super) reading: bool,
}

impl<R, W> SessionDriver<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Run until the facade is dropped
    pub(super) async fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<DriverCommand>) {
        loop {
            tokio::select! {
                frame = self.frames.next(), if self.reading => self.on_frame(frame).await,
                command = command_rx.recv() => match command {
                    Some(DriverCommand::Submit { wire, completion }) => {
                        self.submit(wire, completion).await;
                    }
                    Some(DriverCommand::End) => self.end().await,
                    None => break,
                },
            }
        }

        log::debug!(
            "[{}] Session dropped with {} command(s) outstanding",
            self.id,
            usize::from(self.queue.has_current()) + self.queue.backlog_len()
        );
    }

    async fn on_frame(&mut self, frame: Option<Result<Frame>>) {
        match frame {
            Some(Ok(frame)) => self.dispatch(frame).await,
            Some(Err(e)) => {
                log::error!("[{}] Read failed: {e}", self.id);
                self.emit(SessionEvent::Error(e));
                self.close();
            }
            None => {
                log::debug!("[{}] Transport reached end of stream", self.id);
                self.close();
            }
        }
    }

    async fn dispatch(&mut self, frame: Frame) {
        match self.state.handle_frame(frame) {
            Dispatch::Variables(variables) => {
                self.frames.decoder_mut().set_phase(self.state.phase());
                log::debug!(
                    "[{}] Handshake complete with {} variable(s)",
                    self.id,
                    variables.len()
                );
                if self.variables.set(variables.clone()).is_err() {
                    log::warn!("[{}] Handshake variables were already set", self.id);
                }
                self.emit(SessionEvent::Variables(variables));
            }
            Dispatch::Response(response) => {
                log::debug!("[{}] << {response}", self.id);
                if !self.queue.complete_current(&response) {
                    log::debug!("[{}] Unsolicited response: {response}", self.id);
                }
                self.emit(SessionEvent::Response(response));
                self.release_next().await;
            }
            Dispatch::Hangup(line) => {
                log::warn!("[{}] Peer hung up (received {line:?})", self.id);
                if self.options.fail_pending_on_hangup {
                    let failed = self.queue.fail_all(|| AgiError::hangup(line.clone()));
                    log::debug!("[{}] Rejected {failed} pending command(s)", self.id);
                }
                self.emit(SessionEvent::Hangup { line });
            }
            Dispatch::Ignored => {}
        }
    }

    async fn submit(&mut self, wire: String, completion: Completion) {
        if !self.reading || self.writer.is_none() {
            log::debug!("[{}] Rejecting command on ended session: {}", self.id, wire.trim_end());
            let _ = completion.send(Err(AgiError::session_ended(
                "the session no longer accepts commands",
            )));
            return;
        }

        match self.queue.submit(wire, completion) {
            Some(wire) => self.write(&wire).await,
            None => log::debug!(
                "[{}] Command queued behind {} other(s)",
                self.id,
                self.queue.backlog_len()
            ),
        }
    }

    async fn release_next(&mut self) {
        if self.writer.is_none() {
            return;
        }
        if let Some(wire) = self.queue.release_next() {
            self.write(&wire).await;
        }
    }

    async fn write(&mut self, wire: &str) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        log::debug!("[{}] >> {}", self.id, wire.trim_end());
        let result: std::io::Result<()> = async {
            writer.write_all(wire.as_bytes()).await?;
            writer.flush().await
        }
        .await;

        if let Err(e) = result {
            log::error!("[{}] Write failed: {e}", self.id);
            self.writer = None;
            self.emit(SessionEvent::Error(AgiError::transport(format!(
                "Failed to write command: {e}"
            ))));
            if self.options.fail_pending_on_close {
                self.queue
                    .fail_all(|| AgiError::stream_closed("transport write failed"));
            }
        }
    }

    async fn end(&mut self) {
        let Some(mut writer) = self.writer.take() else {
            return;
        };

        log::debug!(
            "[{}] Ending session with {} command(s) in the backlog",
            self.id,
            self.queue.backlog_len()
        );
        if let Err(e) = writer.shutdown().await {
            log::error!("[{}] Failed to shut down writer: {e}", self.id);
            self.emit(SessionEvent::Error(AgiError::transport(format!(
                "Failed to close write side: {e}"
            ))));
        }
    }

    fn close(&mut self) {
        self.reading = false;
        if self.options.fail_pending_on_close {
            let failed = self
                .queue
                .fail_all(|| AgiError::stream_closed("transport closed"));
            log::debug!("[{}] Rejected {failed} pending command(s)", self.id);
        }
        self.emit(SessionEvent::Closed);
    }

    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            log::trace!("[{}] Event receiver dropped", self.id);
        }
    }
}
