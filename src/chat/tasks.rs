// src/chat/tasks.rs - delayed events and detached requests
use super::events::SessionEvent;
use crate::core::prelude::*;
use std::future::Future;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Cancels every timer scheduled in its group.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Spawns timers and requests whose results come back as
/// [`SessionEvent`]s on the session channel. Dropping the scheduler
/// cancels everything still pending.
pub struct TaskScheduler {
    tx: UnboundedSender<SessionEvent>,
    root: CancellationToken,
}

impl TaskScheduler {
    pub fn new(tx: UnboundedSender<SessionEvent>) -> Self {
        Self {
            tx,
            root: CancellationToken::new(),
        }
    }

    pub fn group(&self) -> TimerHandle {
        TimerHandle {
            token: self.root.child_token(),
        }
    }

    pub fn schedule(&self, delay: Duration, event: SessionEvent) -> TimerHandle {
        let group = self.group();
        self.schedule_in(&group, delay, event);
        group
    }

    /// Single-shot: posts `event` after `delay` unless `group` is cancelled first.
    pub fn schedule_in(&self, group: &TimerHandle, delay: Duration, event: SessionEvent) {
        let token = group.token.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(event);
                }
            }
        });
    }

    /// Runs `future` and posts the event it produces.
    pub fn request<F>(&self, future: F)
    where
        F: Future<Output = SessionEvent> + Send + 'static,
    {
        let token = self.root.child_token();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                event = future => {
                    let _ = tx.send(event);
                }
            }
        });
    }

    /// Fire-and-forget: failures are logged, never surfaced.
    pub fn detach(&self, label: &'static str, future: BoxFuture<'static, Result<()>>) {
        tokio::spawn(async move {
            if let Err(e) = future.await {
                log::warn!("{} failed: {}", label, e);
            }
        });
    }

    pub fn shutdown(&self) {
        self.root.cancel();
    }
}

impl Drop for TaskScheduler {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
