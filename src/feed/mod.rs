//! Polling feed for "real-time" collection updates.
//!
//! One timer task per feed polls the collaborator and broadcasts each full
//! snapshot to every subscriber. Dropping the [`Feed`] stops the timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::view::{Collaborator, TableRow};

/// Snapshots buffered per subscriber before the slowest one starts lagging.
const CHANNEL_CAPACITY: usize = 16;

/// A full collection snapshot, shared between subscribers.
pub type Snapshot<T> = Arc<Vec<T>>;

/// Handle to a running poll loop.
pub struct Feed<T: TableRow> {
    sender: broadcast::Sender<Snapshot<T>>,
    task: JoinHandle<()>,
}

impl<T: TableRow> Feed<T> {
    /// Start polling `source` every `interval`; the first poll happens immediately.
    pub fn spawn(source: Arc<dyn Collaborator<T>>, interval: Duration) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        let tx = sender.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match source.list().await {
                    Ok(rows) => {
                        tracing::trace!(rows = rows.len(), "Feed poll");
                        // No receivers is fine: the next subscriber gets the next tick.
                        let _ = tx.send(Arc::new(rows));
                    }
                    Err(e) => tracing::warn!("Feed poll failed: {}", e),
                }
            }
        });

        Self { sender, task }
    }

    /// New receiver for snapshots published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot<T>> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the timer. Subscribers see the channel close.
    pub fn stop(self) {
        drop(self);
    }
}

impl<T: TableRow> Drop for Feed<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Wait for the next snapshot, skipping over any the receiver lagged behind on.
///
/// Returns `None` once the feed has stopped.
pub async fn next_snapshot<T: TableRow>(
    receiver: &mut broadcast::Receiver<Snapshot<T>>,
) -> Option<Snapshot<T>> {
    loop {
        match receiver.recv().await {
            Ok(snapshot) => return Some(snapshot),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Feed subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}
