//! Trailing-edge debounce over a stream of values
//!
//! A pure scheduling primitive: rapid updates collapse to a single emission
//! of the latest value once the input has been quiet for the full window.
//! A value arriving before the deadline reschedules it; cancelling the
//! token (or dropping the input handle) stops the worker without emitting,
//! so nothing fires into a torn-down owner.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Input side of a debounced watch
#[derive(Debug, Clone)]
pub struct DebounceInput<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> DebounceInput<T> {
    /// Feed a new value, resetting the quiet-period deadline
    ///
    /// Returns `false` once the watch has stopped.
    pub fn update(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

/// Factory for debounced watch workers
pub struct DebouncedWatch;

impl DebouncedWatch {
    /// Spawn a debounce worker with the given quiet period
    ///
    /// The returned receiver yields one stabilized value per quiet period;
    /// it closes when the worker stops (cancellation or input drop).
    pub fn spawn<T: Send + 'static>(
        quiet: Duration,
        cancel: CancellationToken,
    ) -> (DebounceInput<T>, mpsc::UnboundedReceiver<T>) {
        let (in_tx, mut in_rx) = mpsc::unbounded_channel::<T>();
        let (out_tx, out_rx) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            let mut pending: Option<T> = None;
            let mut deadline = Instant::now();

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    received = in_rx.recv() => match received {
                        Some(value) => {
                            pending = Some(value);
                            deadline = Instant::now() + quiet;
                        }
                        // Input handle dropped: owner torn down, discard
                        // whatever was pending.
                        None => break,
                    },
                    _ = sleep_until(deadline), if pending.is_some() => {
                        if let Some(value) = pending.take()
                            && out_tx.send(value).is_err()
                        {
                            break;
                        }
                    }
                }
            }
        });

        (DebounceInput { tx: in_tx }, out_rx)
    }
}
