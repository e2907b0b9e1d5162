//! Check-In Record Model

use serde::{Deserialize, Serialize};

/// How the code reached the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ScanMethod {
    /// Camera decoded a QR payload
    Optical,
    /// Staff typed the code by hand
    Manual,
}

/// Check-in record (入场记录)
///
/// At most one row per purchase — enforced by a UNIQUE(purchase_id) index,
/// not by application code. Who/when/method never change after insert;
/// `times_scanned` counts repeat presentations of an already-admitted code
/// so staff can see how often it has been shown at the door.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CheckInRecord {
    pub id: i64,
    pub purchase_id: i64,
    pub event_id: i64,
    pub venue_id: i64,
    pub staff_id: i64,
    pub staff_name: String,
    pub method: ScanMethod,
    pub times_scanned: i64,
    pub checked_in_at: i64,
}
