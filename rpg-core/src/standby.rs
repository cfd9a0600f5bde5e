//! Waiting for a specific user's next message in a channel.
//!
//! The gateway loop offers every incoming message through [`ReplyWaiter::offer`]
//! before command dispatch. A handler that called
//! [`ReplyWaiter::wait_for_reply`] for the same channel and author receives
//! the message content instead.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::sync::{Mutex, oneshot};

type WaitKey = (u64, u64);

struct Pending {
    id: u64,
    sender: oneshot::Sender<String>,
}

#[derive(Clone, Default)]
pub struct ReplyWaiter {
    pending: Arc<Mutex<HashMap<WaitKey, Pending>>>,
    next_id: Arc<AtomicU64>,
}

impl ReplyWaiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next message by `author_id` in `channel_id`.
    ///
    /// Returns `None` on timeout, or when a newer wait for the same pair
    /// replaced this one.
    pub async fn wait_for_reply(
        &self,
        channel_id: u64,
        author_id: u64,
        timeout: Duration,
    ) -> Option<String> {
        let key = (channel_id, author_id);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = oneshot::channel();

        self.pending.lock().await.insert(key, Pending { id, sender });

        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(content)) => Some(content),
            Ok(Err(_)) => None,
            Err(_) => {
                let mut pending = self.pending.lock().await;
                if pending.get(&key).is_some_and(|entry| entry.id == id) {
                    pending.remove(&key);
                }
                None
            }
        }
    }

    /// Hand a message to a waiting handler.
    ///
    /// Returns `true` when the message was consumed and must not be
    /// dispatched as a command.
    pub async fn offer(&self, channel_id: u64, author_id: u64, content: &str) -> bool {
        let Some(entry) = self.pending.lock().await.remove(&(channel_id, author_id)) else {
            return false;
        };

        entry.sender.send(content.to_owned()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offered_message_reaches_the_waiter() {
        let waiter = ReplyWaiter::new();
        let task = {
            let waiter = waiter.clone();
            tokio::spawn(async move { waiter.wait_for_reply(1, 2, Duration::from_secs(5)).await })
        };

        while !waiter.offer(1, 2, "a sturdy rope").await {
            tokio::task::yield_now().await;
        }

        assert_eq!(task.await.unwrap().as_deref(), Some("a sturdy rope"));
    }

    #[tokio::test]
    async fn other_authors_are_not_consumed() {
        let waiter = ReplyWaiter::new();
        assert!(!waiter.offer(1, 2, "hello").await);

        let task = {
            let waiter = waiter.clone();
            tokio::spawn(async move {
                waiter
                    .wait_for_reply(1, 2, Duration::from_millis(50))
                    .await
            })
        };
        tokio::task::yield_now().await;

        assert!(!waiter.offer(1, 3, "not me").await);
        assert!(!waiter.offer(9, 2, "wrong channel").await);
        assert_eq!(task.await.unwrap(), None);
    }

    #[tokio::test]
    async fn timed_out_waits_are_cleared() {
        let waiter = ReplyWaiter::new();
        assert_eq!(
            waiter.wait_for_reply(1, 2, Duration::from_millis(10)).await,
            None
        );
        assert!(!waiter.offer(1, 2, "too late").await);
    }
}
