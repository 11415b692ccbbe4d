//! Cancellable timer tasks that report back to the UI loop as events.
//!
//! Every timer runs as a tokio task and only ever *sends* an event; the state
//! it affects is mutated by whoever drains the receiver. Each task is owned
//! by a [`TaskHandle`]: dropping or cancelling the handle stops the task, so
//! teardown paths never leave an orphaned timer behind.

use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

/// Ownership of one scheduled task. Cancels the task on drop.
#[derive(Debug)]
pub struct TaskHandle {
    token: CancellationToken,
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawns timer tasks delivering `E` on a shared channel.
#[derive(Debug)]
pub struct Scheduler<E> {
    tx: mpsc::UnboundedSender<E>,
}

impl<E> Clone for Scheduler<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E: Send + 'static> Scheduler<E> {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<E>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Send `event` once after `delay`.
    pub fn after(&self, delay: Duration, event: E) -> TaskHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();
        let deadline = Instant::now() + delay;

        tokio::spawn(async move {
            tokio::select! {
                () = cancelled.cancelled() => {}
                () = time::sleep_until(deadline) => {
                    let _ = tx.send(event);
                }
            }
        });

        TaskHandle { token }
    }

    /// Send `make()` every `period`, first at `now + period`.
    pub fn every<F>(&self, period: Duration, make: F) -> TaskHandle
    where
        F: Fn() -> E + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();
        let first = Instant::now() + period;

        tokio::spawn(async move {
            let mut ticker = time::interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        if tx.send(make()).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        TaskHandle { token }
    }

    /// Hand an event to the loop immediately (used by spawned work such as
    /// message delivery).
    pub fn sender(&self) -> mpsc::UnboundedSender<E> {
        self.tx.clone()
    }
}

/// Request for a repeating timer, tagged with the epoch that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armed {
    pub epoch: u64,
    pub period: Duration,
}

/// Holds at most one interval and re-arms it when the requested epoch moves.
#[derive(Debug, Default)]
pub struct IntervalSlot {
    current: Option<(Armed, TaskHandle)>,
}

impl IntervalSlot {
    /// Bring the armed interval in line with `wanted`. Any previously armed
    /// interval is cancelled before a new one is spawned.
    pub fn sync<E, F>(&mut self, wanted: Option<Armed>, scheduler: &Scheduler<E>, make: F)
    where
        E: Send + 'static,
        F: Fn(u64) -> E + Send + 'static,
    {
        let armed = self.current.as_ref().map(|(armed, _)| *armed);
        if armed == wanted {
            return;
        }

        self.current = None;
        if let Some(wanted) = wanted {
            let epoch = wanted.epoch;
            let handle = scheduler.every(wanted.period, move || make(epoch));
            self.current = Some((wanted, handle));
        }
    }

    pub fn armed(&self) -> Option<Armed> {
        self.current.as_ref().map(|(armed, _)| *armed)
    }
}
