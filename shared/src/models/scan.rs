//! Scan request/outcome taxonomy
//!
//! Every possible door decision is a *value* in [`ScanOutcome`], never an
//! error: only infrastructure failures (ledger unreachable, malformed HTTP)
//! surface through the error channel. The scanner must be able to tell
//! "denied" apart from "unknown — retry" or staff will turn people away on
//! a network hiccup.

use serde::{Deserialize, Serialize};

use super::check_in::{CheckInRecord, ScanMethod};

/// Verification request — read-only admissibility check
///
/// `event_id`/`venue_id` scope the scan to the scanning venue's own event;
/// a code from another event answers `wrong_event` even though the purchase
/// itself would resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// Raw code as scanned or typed, pre-normalization
    pub code: String,
    pub event_id: i64,
    pub venue_id: i64,
}

/// Check-in request — the one mutating call
///
/// Staff identity travels in the request rather than ambient session state,
/// so the service stays testable in isolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub code: String,
    pub event_id: i64,
    pub venue_id: i64,
    pub staff_id: i64,
    pub staff_name: String,
    pub method: ScanMethod,
}

/// Why a code is not admissible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// Fails the syntax check — rejected before any ledger lookup
    InvalidFormat,
    /// Well-formed code with no matching purchase (typo, or foreign system)
    NotFound,
    /// Purchase exists but belongs to a different event/venue pair
    WrongEvent,
    /// Purchase was refunded; permanently non-admissible
    Refunded,
}

/// Outcome of a verify or check-in call
///
/// `AlreadyUsed` is the expected result of a double-scan, not a failure —
/// it carries the winning admission's metadata for the operator
/// ("already scanned by Staff X at 8:04pm").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Would currently be admitted (verification only; not a commitment)
    Valid {
        purchase_id: i64,
        fan_name: String,
        quantity: i64,
        purchased_at: i64,
    },
    /// First successful check-in; this call won the insert
    Admitted { record: CheckInRecord },
    /// A prior call (or a concurrent one) already admitted this purchase
    AlreadyUsed { record: CheckInRecord },
    /// Not admissible, with the reason
    Invalid { reason: InvalidReason },
}

impl ScanOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, ScanOutcome::Admitted { .. })
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ScanOutcome::Valid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_snake_case_tag() {
        let json = serde_json::to_value(ScanOutcome::Invalid {
            reason: InvalidReason::WrongEvent,
        })
        .unwrap();
        assert_eq!(json["outcome"], "invalid");
        assert_eq!(json["reason"], "wrong_event");
    }

    #[test]
    fn valid_outcome_round_trips() {
        let outcome = ScanOutcome::Valid {
            purchase_id: 42,
            fan_name: "Ada".into(),
            quantity: 2,
            purchased_at: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let back: ScanOutcome = serde_json::from_str(&json).unwrap();
        assert!(back.is_valid());
    }
}
