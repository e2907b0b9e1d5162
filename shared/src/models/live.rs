//! Live feed payloads
//!
//! Broadcast to dashboards subscribed to an event; a notification channel
//! strictly decoupled from the check-in write path.

use serde::{Deserialize, Serialize};

/// Published once per successful admission, after the write commits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInNotice {
    pub event_id: i64,
    pub purchase_id: i64,
    pub staff_name: String,
    /// Party size admitted by this scan
    pub quantity: i64,
    pub checked_in_at: i64,
    /// Running totals at publish time (advisory, may lag under load)
    pub admitted_purchases: i64,
    pub sold_purchases: i64,
}

/// Sold vs admitted tally for one event
///
/// Display-only; never used to gate an admission decision.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AttendanceSummary {
    pub event_id: i64,
    /// Purchases sold (rows), excluding refunded
    pub sold_purchases: i64,
    /// Guests covered by sold purchases (sum of quantity)
    pub sold_guests: i64,
    /// Purchases checked in
    pub admitted_purchases: i64,
    /// Guests admitted (sum of quantity over checked-in purchases)
    pub admitted_guests: i64,
}
