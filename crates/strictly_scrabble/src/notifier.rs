//! Single-slot publish/wait primitive.
//!
//! A [`Notifier`] holds at most one value. Publishing replaces it and wakes
//! every waiter; a slow waiter only ever sees the latest value.

use std::sync::{Mutex, PoisonError};
use tokio::sync::Notify;
use tracing::{instrument, trace};

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    sequence: u64,
}

/// Holds the latest published value and wakes waiters on change.
#[derive(Debug)]
pub struct Notifier<T> {
    slot: Mutex<Slot<T>>,
    notify: Notify,
}

impl<T: Clone> Notifier<T> {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                sequence: 0,
            }),
            notify: Notify::new(),
        }
    }

    /// Replaces the held value and wakes all waiters.
    #[instrument(skip_all)]
    pub fn update(&self, value: T) {
        let sequence = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.value = Some(value);
            slot.sequence += 1;
            slot.sequence
        };
        trace!(sequence, "Published");
        self.notify.notify_waiters();
    }

    /// Number of values published so far.
    pub fn sequence(&self) -> u64 {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sequence
    }

    /// Waits until a value has been published, then returns it.
    ///
    /// Returns at once if a value is already held.
    pub async fn wait_for_update(&self) -> T {
        self.wait_past(0).await.1
    }

    /// Waits for a value published after `seen`, returning its sequence
    /// number alongside it.
    ///
    /// Dropping the future has no effect on the notifier.
    pub async fn wait_past(&self, seen: u64) -> (u64, T) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking so an update in between is not lost.
            notified.as_mut().enable();

            if let Some(found) = self.current_past(seen) {
                return found;
            }
            notified.await;
        }
    }

    fn current_past(&self, seen: u64) -> Option<(u64, T)> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.sequence <= seen {
            return None;
        }
        slot.value.clone().map(|value| (slot.sequence, value))
    }
}

impl<T: Clone> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}
