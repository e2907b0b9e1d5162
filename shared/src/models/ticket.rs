//! Ticket Purchase Model

use serde::{Deserialize, Serialize};

/// Purchase lifecycle status
///
/// `Active → Refunded` happens at most once and is driven by the external
/// payment flow. A refunded purchase is permanently non-admissible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PurchaseStatus {
    Active,
    Refunded,
}

/// Ticket purchase entity (门票购买记录)
///
/// One row per paid purchase. `quantity` is the party size covered by a
/// single verification code; it is fixed at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TicketPurchase {
    pub id: i64,
    pub event_id: i64,
    pub venue_id: i64,
    pub fan_id: i64,
    /// Denormalized for door display (photo-ID spot checks)
    pub fan_name: String,
    pub quantity: i64,
    pub amount_paid: f64,
    /// Grouped verification code, unique per purchase
    pub verification_code: String,
    pub status: PurchaseStatus,
    pub purchased_at: i64,
    pub refunded_at: Option<i64>,
}

impl TicketPurchase {
    pub fn is_refunded(&self) -> bool {
        self.status == PurchaseStatus::Refunded
    }
}

/// Create ticket purchase payload
///
/// Supplied by the external payment/booking flow once payment has settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketPurchaseCreate {
    pub event_id: i64,
    pub venue_id: i64,
    pub fan_id: i64,
    pub fan_name: String,
    pub quantity: i64,
    pub amount_paid: f64,
}

/// Fan-facing ticket pass (rendered as QR + grouped text)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketPass {
    pub purchase_id: i64,
    pub event_id: i64,
    pub venue_id: i64,
    pub fan_name: String,
    pub quantity: i64,
    pub status: PurchaseStatus,
    pub purchased_at: i64,
    /// Human-readable grouped code (e.g. `GM-XXXXXXXX-XXXXXXXX-XXXXXXXX`)
    pub code: String,
    /// Payload to encode into the QR image; same string as `code`
    pub qr_payload: String,
}
