//! Shared types for the GigMatch ticket admission subsystem
//!
//! Common types used by both gate-server and scanner-client: ledger row
//! models, the scan outcome taxonomy, live-feed payloads, and id/time
//! utilities.
//!
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]` so
//! the client crate can depend on the models without pulling in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::check_in::{CheckInRecord, ScanMethod};
pub use models::live::{AttendanceSummary, CheckInNotice};
pub use models::scan::{CheckInRequest, InvalidReason, ScanOutcome, VerifyRequest};
pub use models::ticket::{PurchaseStatus, TicketPass, TicketPurchase, TicketPurchaseCreate};
