//! Single-slot broadcast channel with latest-value replay.
//!
//! [`ReplayChannel`] holds at most one value. Publishing overwrites whatever is
//! in the slot, so a reader that falls behind only ever sees the newest value
//! (older unread values are dropped). Every new [`Subscription`] receives the
//! current value immediately, before any later publication.
//!
//! The slot is a [`tokio::sync::watch`] channel carrying the value together
//! with a publication counter. Subscriptions compare the counter with the last
//! one they read, which is what gives a fresh subscriber its replay.
//!
//! # Architecture
//!
//! ```text
//! ReplayChannel (watch::Sender)
//!     │ publish(v): slot := { version + 1, Some(v) }
//!     ▼
//! ┌──────────────────────┐
//! │ Slot { version,      │ ◄── Subscription { watch::Receiver, seen }
//! │        value }       │     recv(): wait until version > seen
//! └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use photofeed::feed::ReplayChannel;
//!
//! # tokio_test_block(async {
//! let channel = ReplayChannel::new();
//! channel.publish(1);
//! channel.publish(2);
//!
//! // Late subscribers see only the latest value.
//! let mut sub = channel.subscribe();
//! assert_eq!(sub.recv().await, Some(2));
//! assert_eq!(sub.try_recv(), None);
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use futures_util::Stream;
use tokio::sync::watch;

#[derive(Debug)]
struct Slot<T> {
    version: u64,
    value: Option<T>,
}

/// Writer half of the single-slot broadcast.
///
/// There is exactly one writer per channel. Dropping it closes the channel:
/// subscribers drain the last unread value, then `recv` returns `None`.
#[derive(Debug)]
pub struct ReplayChannel<T> {
    tx: watch::Sender<Slot<T>>,
}

impl<T: Clone> ReplayChannel<T> {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::from_slot(Slot {
            version: 0,
            value: None,
        })
    }

    /// Creates a channel whose slot already holds `value`.
    #[must_use]
    pub fn with_initial(value: T) -> Self {
        Self::from_slot(Slot {
            version: 1,
            value: Some(value),
        })
    }

    fn from_slot(slot: Slot<T>) -> Self {
        let (tx, _) = watch::channel(slot);
        Self { tx }
    }

    /// Stores `value` in the slot, replacing any unread value, and wakes every
    /// waiting subscriber. Returns the new version number.
    pub fn publish(&self, value: T) -> u64 {
        let mut version = 0;
        self.tx.send_modify(|slot| {
            slot.version += 1;
            slot.value = Some(value);
            version = slot.version;
        });
        version
    }

    /// Returns a copy of the latest published value.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.tx.borrow().value.clone()
    }

    /// Returns the number of values published so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.tx.borrow().version
    }

    /// Opens a new reader. Its first `recv` yields the latest value, if any.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.tx.subscribe(),
            seen: 0,
        }
    }
}

impl<T: Clone> Default for ReplayChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reader half of a [`ReplayChannel`].
///
/// Each subscription tracks the last version it observed. Cloning a
/// subscription copies that position.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<Slot<T>>,
    seen: u64,
}

impl<T> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            seen: self.seen,
        }
    }
}

impl<T: Clone> Subscription<T> {
    /// Returns the latest value if it was published after the last one this
    /// subscription observed.
    pub fn try_recv(&mut self) -> Option<T> {
        let slot = self.rx.borrow_and_update();
        if slot.version > self.seen {
            self.seen = slot.version;
            slot.value.clone()
        } else {
            None
        }
    }

    /// Waits for a value newer than the last one observed.
    ///
    /// Returns `None` once the writer is dropped and no unread value remains.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            if let Some(value) = self.try_recv() {
                return Some(value);
            }
            if self.rx.changed().await.is_err() {
                return self.try_recv();
            }
        }
    }

    /// Converts the subscription into a stream of values.
    pub fn into_stream(self) -> impl Stream<Item = T>
    where
        T: Send,
    {
        futures_util::stream::unfold(self, |mut sub| async move {
            sub.recv().await.map(|value| (value, sub))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use std::time::Duration;

    #[tokio::test]
    async fn new_subscriber_replays_latest_value() {
        let channel = ReplayChannel::new();
        channel.publish("first");

        let mut sub = channel.subscribe();
        assert_eq!(sub.recv().await, Some("first"));
        assert_eq!(sub.try_recv(), None);

        let mut late = channel.subscribe();
        assert_eq!(late.try_recv(), Some("first"));
    }

    #[tokio::test]
    async fn empty_channel_replays_nothing() {
        let channel: ReplayChannel<u32> = ReplayChannel::new();
        let mut sub = channel.subscribe();
        assert_eq!(sub.try_recv(), None);
        assert_eq!(channel.latest(), None);
        assert_eq!(channel.version(), 0);
    }

    #[tokio::test]
    async fn unread_values_are_overwritten() {
        let channel = ReplayChannel::new();
        let mut sub = channel.subscribe();

        channel.publish(1);
        channel.publish(2);
        channel.publish(3);

        assert_eq!(sub.recv().await, Some(3));
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn every_subscriber_sees_each_publication() {
        let channel = ReplayChannel::with_initial(0);
        let mut a = channel.subscribe();
        let mut b = channel.subscribe();

        assert_eq!(a.recv().await, Some(0));
        assert_eq!(b.recv().await, Some(0));

        channel.publish(7);
        assert_eq!(a.recv().await, Some(7));
        assert_eq!(b.recv().await, Some(7));
    }

    #[tokio::test]
    async fn recv_wakes_on_publish_from_another_task() {
        let channel = std::sync::Arc::new(ReplayChannel::new());
        let mut sub = channel.subscribe();

        let writer = std::sync::Arc::clone(&channel);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            writer.publish(42u32);
        });

        assert_eq!(sub.recv().await, Some(42));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn closing_drains_last_value_then_ends() {
        let channel = ReplayChannel::new();
        let mut sub = channel.subscribe();
        channel.publish("last");
        drop(channel);

        assert_eq!(sub.recv().await, Some("last"));
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn stream_yields_values_until_closed() {
        let channel = ReplayChannel::with_initial(1);
        let stream = channel.subscribe().into_stream();
        drop(channel);

        let values: Vec<i32> = stream.collect().await;
        assert_eq!(values, vec![1]);
    }

    #[test]
    fn cloned_subscription_keeps_position() {
        let channel = ReplayChannel::with_initial('a');
        let mut sub = channel.subscribe();
        assert_eq!(sub.try_recv(), Some('a'));

        let mut copy = sub.clone();
        assert_eq!(copy.try_recv(), None);

        channel.publish('b');
        assert_eq!(copy.try_recv(), Some('b'));
        assert_eq!(sub.try_recv(), Some('b'));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_kept_for_later() {
        let channel = ReplayChannel::new();
        assert_eq!(channel.publish(5), 1);
        assert_eq!(channel.publish(6), 2);

        assert_eq!(channel.latest(), Some(6));
        assert_eq!(channel.subscribe().recv().await, Some(6));
    }
}
