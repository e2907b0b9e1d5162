//! The gate loop
//!
//! verify → provisional display → confirm (or auto-admit) → check-in →
//! authoritative display. The scanner never decides admissibility itself;
//! it renders what the ledger answered.

use shared::models::{
    AttendanceSummary, CheckInRequest, ScanMethod, ScanOutcome, TicketPurchase, VerifyRequest,
};

use crate::display::GateDisplay;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::{ClientError, ScannerConfig};

/// One completed pass through the gate loop
#[derive(Debug)]
pub struct GateResult {
    /// What the screen showed after verification (absent if verification
    /// itself failed at the transport level)
    pub provisional: Option<GateDisplay>,
    /// What the screen shows now; authoritative when a check-in committed
    pub display: GateDisplay,
    /// The last outcome the server returned, if any call got through
    pub outcome: Option<ScanOutcome>,
}

/// A scanning device at one gate
#[derive(Debug, Clone)]
pub struct Scanner {
    http: HttpClient,
    config: ScannerConfig,
}

impl Scanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            http: HttpClient::new(&config),
            config,
        }
    }

    /// Read-only verification — freely retryable
    pub async fn verify(&self, raw_code: &str) -> ClientResult<ScanOutcome> {
        self.http
            .post(
                "api/scan/verify",
                &VerifyRequest {
                    code: raw_code.to_string(),
                    event_id: self.config.event_id,
                    venue_id: self.config.venue_id,
                },
            )
            .await
    }

    /// Commit the admission. Safe to retry: an already-admitted purchase
    /// answers `already_used`, never a duplicate admission.
    pub async fn check_in(&self, raw_code: &str, method: ScanMethod) -> ClientResult<ScanOutcome> {
        self.http
            .post(
                "api/scan/check-in",
                &CheckInRequest {
                    code: raw_code.to_string(),
                    event_id: self.config.event_id,
                    venue_id: self.config.venue_id,
                    staff_id: self.config.staff_id,
                    staff_name: self.config.staff_name.clone(),
                    method,
                },
            )
            .await
    }

    /// Full gate pass for one presented code.
    ///
    /// With `auto_admit` off, stops after the provisional display; the
    /// operator confirms by calling [`Scanner::confirm`]. With it on,
    /// a `valid` verification flows straight into the check-in.
    pub async fn present(&self, raw_code: &str, method: ScanMethod) -> GateResult {
        let verified = match self.verify(raw_code).await {
            Ok(outcome) => outcome,
            Err(e) => return Self::unknown(e, None),
        };

        let provisional = GateDisplay::from_outcome(&verified, false);

        if !(self.config.auto_admit && verified.is_valid()) {
            return GateResult {
                display: provisional.clone(),
                provisional: Some(provisional),
                outcome: Some(verified),
            };
        }

        match self.check_in(raw_code, method).await {
            // The authoritative answer replaces the provisional one even
            // when they disagree — that is the race being resolved
            Ok(committed) => GateResult {
                display: GateDisplay::from_outcome(&committed, true),
                provisional: Some(provisional),
                outcome: Some(committed),
            },
            Err(e) => Self::unknown(e, Some(provisional)),
        }
    }

    /// Operator confirmation after a provisional `valid`
    pub async fn confirm(&self, raw_code: &str, method: ScanMethod) -> GateResult {
        match self.check_in(raw_code, method).await {
            Ok(committed) => GateResult {
                display: GateDisplay::from_outcome(&committed, true),
                provisional: None,
                outcome: Some(committed),
            },
            Err(e) => Self::unknown(e, None),
        }
    }

    /// Advisory sold-vs-admitted tally; display only, never gates
    pub async fn attendance(&self) -> ClientResult<AttendanceSummary> {
        self.http
            .get(&format!("api/events/{}/attendance", self.config.event_id))
            .await
    }

    /// Reconnect path: after an abandoned check-in call, re-query the
    /// authoritative state by purchase id instead of re-submitting blindly
    pub async fn purchase(&self, purchase_id: i64) -> ClientResult<TicketPurchase> {
        self.http.get(&format!("api/tickets/{purchase_id}")).await
    }

    fn unknown(error: ClientError, provisional: Option<GateDisplay>) -> GateResult {
        tracing::warn!(error = %error, retryable = error.is_retryable(), "Scan call failed");
        GateResult {
            display: GateDisplay::unknown_retry(&error),
            provisional,
            outcome: None,
        }
    }
}
