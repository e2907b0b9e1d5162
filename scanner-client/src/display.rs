//! Door display rendering
//!
//! Staff glance at a color, not a paragraph. Green admits, yellow means
//! "look at the details", red denies, grey means the system does not know
//! and the operator must retry or decide — grey is never a deny.

use chrono::{TimeZone, Utc};

use shared::models::{InvalidReason, ScanOutcome};

/// 门闸显示颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayColor {
    /// Admissible / admitted
    Green,
    /// Already used — operator judgment (re-entry is the venue's policy)
    Yellow,
    /// Not admissible
    Red,
    /// Unknown — infrastructure failure, retry; never deny on grey
    Grey,
}

/// What the gate screen shows for one scan
#[derive(Debug, Clone)]
pub struct GateDisplay {
    pub color: DisplayColor,
    pub headline: String,
    pub detail: Option<String>,
    /// Whether this came from a committed check-in (final) or a read-only
    /// verification (provisional). Final always wins on screen.
    pub authoritative: bool,
}

impl GateDisplay {
    /// Render a scan outcome
    pub fn from_outcome(outcome: &ScanOutcome, authoritative: bool) -> Self {
        match outcome {
            ScanOutcome::Valid {
                fan_name, quantity, ..
            } => Self {
                color: DisplayColor::Green,
                headline: if authoritative {
                    "Ticket valid".to_string()
                } else {
                    "Ticket valid — confirm to admit".to_string()
                },
                detail: Some(format!("{fan_name} · party of {quantity}")),
                authoritative,
            },
            ScanOutcome::Admitted { record } => Self {
                color: DisplayColor::Green,
                headline: "Admitted".to_string(),
                detail: Some(format!("checked in by {}", record.staff_name)),
                authoritative,
            },
            ScanOutcome::AlreadyUsed { record } => Self {
                color: DisplayColor::Yellow,
                headline: "Ticket already admitted — see details".to_string(),
                detail: Some(format!(
                    "scanned by {} at {} · {} scans",
                    record.staff_name,
                    format_clock(record.checked_in_at),
                    record.times_scanned
                )),
                authoritative,
            },
            ScanOutcome::Invalid { reason } => Self {
                color: DisplayColor::Red,
                headline: match reason {
                    InvalidReason::InvalidFormat => "Code not recognized — re-scan or re-type",
                    InvalidReason::NotFound => "No matching ticket",
                    InvalidReason::WrongEvent => "Ticket is for a different event",
                    InvalidReason::Refunded => "Ticket was refunded",
                }
                .to_string(),
                detail: None,
                authoritative,
            },
        }
    }

    /// Render an infrastructure failure: the one screen that forces a
    /// human decision instead of making one
    pub fn unknown_retry(error: impl std::fmt::Display) -> Self {
        Self {
            color: DisplayColor::Grey,
            headline: "Connection problem — retry".to_string(),
            detail: Some(format!("{error} · do not deny entry on this screen")),
            authoritative: false,
        }
    }
}

/// Unix millis → wall-clock HH:MM (UTC) for the door detail line
fn format_clock(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => millis.to_string(),
    }
}
