//! Fire-and-forget work queue for push notifications.
//!
//! The webhook handler enqueues intents with [`NotificationQueue::enqueue`],
//! which never waits. A single background worker drains the queue and calls
//! the dispatcher, bounding each delivery with a timeout. Delivery outcomes
//! are visible only in the logs.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use dashbot_types::error::DispatchError;
use dashbot_types::webhook::PushNotificationIntent;

use super::NotificationDispatcher;

/// Buffer size for pending push notifications.
pub const QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum EnqueueError {
    #[error("notification queue is full")]
    Full,

    #[error("notification queue is closed")]
    Closed,
}

/// Sending half of the notification work queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    sender: mpsc::Sender<PushNotificationIntent>,
}

impl NotificationQueue {
    /// Create the queue and spawn its worker on the current runtime.
    ///
    /// The worker exits once every `NotificationQueue` clone is dropped and
    /// the backlog is drained.
    pub fn start<D: NotificationDispatcher>(
        dispatcher: Arc<D>,
        timeout: Duration,
    ) -> (Self, JoinHandle<()>) {
        Self::with_capacity(dispatcher, timeout, QUEUE_CAPACITY)
    }

    pub fn with_capacity<D: NotificationDispatcher>(
        dispatcher: Arc<D>,
        timeout: Duration,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (queue, receiver) = Self::channel(capacity);
        let worker = tokio::spawn(run_worker(dispatcher, receiver, timeout));
        (queue, worker)
    }

    /// A queue without a worker; the caller drains the receiver.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<PushNotificationIntent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Queue an intent for delivery without waiting on it.
    pub fn enqueue(&self, intent: PushNotificationIntent) -> Result<(), EnqueueError> {
        self.sender.try_send(intent).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => EnqueueError::Full,
            mpsc::error::TrySendError::Closed(_) => EnqueueError::Closed,
        })
    }
}

async fn run_worker<D: NotificationDispatcher>(
    dispatcher: Arc<D>,
    mut receiver: mpsc::Receiver<PushNotificationIntent>,
    timeout: Duration,
) {
    debug!("notification worker started");
    while let Some(intent) = receiver.recv().await {
        let result = match tokio::time::timeout(timeout, dispatcher.push_received(&intent)).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::Timeout(timeout)),
        };

        match result {
            Ok(()) => info!(
                repo = %intent.repo_name,
                branch = %intent.branch,
                "push notification delivered"
            ),
            Err(DispatchError::Timeout(after)) => warn!(
                repo = %intent.repo_name,
                branch = %intent.branch,
                ?after,
                "push notification timed out"
            ),
            Err(e) => error!(
                repo = %intent.repo_name,
                branch = %intent.branch,
                error = %e,
                "push notification failed"
            ),
        }
    }
    debug!("notification worker stopped");
}
