//! Live check-in feed
//!
//! Per-event broadcast channels for dashboards watching the door. The
//! check-in service publishes after its write commits; whether anyone is
//! listening has no bearing on the admission result.
//!
//! ```text
//! check-in service ──► LiveFeed ──► broadcast(event 1) ──► SSE subscribers
//!                              └──► broadcast(event 2) ──► ...
//! ```
//!
//! Slow subscribers lag and drop messages (broadcast semantics); dashboards
//! re-query the attendance tally to resync.

use dashmap::DashMap;
use tokio::sync::broadcast;

use shared::models::CheckInNotice;

/// Buffered notices per event before slow subscribers start lagging
const CHANNEL_CAPACITY: usize = 256;

/// 入场实时广播
///
/// 每个 event_id 一个 broadcast 通道，按需创建。
#[derive(Debug, Default)]
pub struct LiveFeed {
    channels: DashMap<i64, broadcast::Sender<CheckInNotice>>,
}

impl LiveFeed {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to one event's admissions
    pub fn subscribe(&self, event_id: i64) -> broadcast::Receiver<CheckInNotice> {
        self.channels
            .entry(event_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Publish a committed admission. Fire-and-forget: a send error only
    /// means nobody is subscribed to this event right now.
    pub fn publish(&self, notice: CheckInNotice) {
        if let Some(sender) = self.channels.get(&notice.event_id) {
            match sender.send(notice) {
                Ok(subscribers) => {
                    tracing::debug!(subscribers, "Check-in notice published");
                }
                Err(_) => {
                    tracing::debug!("Check-in notice dropped (no subscribers)");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(event_id: i64, purchase_id: i64) -> CheckInNotice {
        CheckInNotice {
            event_id,
            purchase_id,
            staff_name: "door-1".into(),
            quantity: 2,
            checked_in_at: shared::util::now_millis(),
            admitted_purchases: 1,
            sold_purchases: 10,
        }
    }

    #[tokio::test]
    async fn subscriber_receives_published_notice() {
        let feed = LiveFeed::new();
        let mut rx = feed.subscribe(7);
        feed.publish(notice(7, 100));
        let received = rx.recv().await.unwrap();
        assert_eq!(received.purchase_id, 100);
    }

    #[tokio::test]
    async fn events_are_isolated() {
        let feed = LiveFeed::new();
        let mut rx_a = feed.subscribe(1);
        let _rx_b = feed.subscribe(2);
        feed.publish(notice(2, 200));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let feed = LiveFeed::new();
        // No channel for this event at all
        feed.publish(notice(99, 1));
        // Channel exists but the only receiver is dropped
        drop(feed.subscribe(5));
        feed.publish(notice(5, 2));
    }
}
