//! Async driver for the controller.
//!
//! A session owns the [`Controller`] and feeds it one event at a time from an
//! unbounded channel. The search debounce deadline is awaited in the same
//! `select!`, so timer firings are serialized with everything else.

use crate::controller::Controller;
use crate::error::{CoreError, Result};
use crate::event::Event;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

const LOG_TARGET: &str = "globetune::session";

/// Sending side of a session, cheap to clone
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Event>,
}

impl SessionHandle {
    /// Queue an event for the session
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SessionClosed`] once the session has stopped.
    pub fn send(&self, event: impl Into<Event>) -> Result<()> {
        self.tx
            .send(event.into())
            .map_err(|_| CoreError::SessionClosed)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving side of a session
#[derive(Debug)]
pub struct SessionEvents {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl SessionEvents {
    /// Next queued event, `None` once every handle is dropped
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Next queued event without waiting
    pub fn try_recv(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

/// Create the event channel. The handle can be given to collaborators (the
/// media element, input readers) before the controller exists.
#[must_use]
pub fn channel() -> (SessionHandle, SessionEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SessionHandle { tx }, SessionEvents { rx })
}

pub struct Session {
    controller: Controller,
    events: SessionEvents,
    cancel_token: CancellationToken,
}

impl Session {
    /// Create a new session
    ///
    /// # Arguments
    /// * `controller` - Controller that handles every event
    /// * `events` - Receiving side from [`channel`]
    /// * `cancel_token` - Optional external cancellation token for graceful shutdown
    #[must_use]
    pub fn new(
        controller: Controller,
        events: SessionEvents,
        cancel_token: Option<CancellationToken>,
    ) -> Self {
        Self {
            controller,
            events,
            cancel_token: cancel_token.unwrap_or_default(),
        }
    }

    /// Get a clone of the cancellation token
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Run the session in a background task
    pub fn spawn(self) -> JoinHandle<Controller> {
        tokio::spawn(self.run())
    }

    /// Render the initial screen, then process events until cancelled or
    /// until every handle is dropped. Returns the controller for inspection.
    pub async fn run(mut self) -> Controller {
        info!(target: LOG_TARGET, "Player session started");
        self.controller.start();

        loop {
            let deadline = self.controller.next_deadline();
            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!(target: LOG_TARGET, "Player session shutting down");
                    break;
                }
                () = wait_until(deadline) => {
                    self.controller.poll_timers(now());
                }
                event = self.events.recv() => {
                    if let Some(event) = event {
                        self.controller.handle(event, now());
                    } else {
                        info!(target: LOG_TARGET, "Event channel closed");
                        break;
                    }
                }
            }
        }

        self.controller
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
