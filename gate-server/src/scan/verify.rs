//! Verification Service — read-only admissibility check

use shared::models::{ScanOutcome, VerifyRequest};

use super::{Resolution, resolve};
use crate::core::ServerState;
use crate::db::repository::check_in;
use crate::utils::AppResult;

/// Answer whether a code would currently be admitted, without mutating
/// anything.
///
/// Idempotent: repeated calls with no intervening check-in return identical
/// outcomes. A `Valid` answer is advisory only — the authoritative decision
/// happens at check-in, which re-runs these checks.
pub async fn verify(state: &ServerState, req: &VerifyRequest) -> AppResult<ScanOutcome> {
    let ticket = match resolve(&state.pool, &req.code, req.event_id, req.venue_id).await? {
        Resolution::Invalid(reason) => return Ok(ScanOutcome::Invalid { reason }),
        Resolution::Ticket(ticket) => ticket,
    };

    match check_in::find_by_purchase(&state.pool, ticket.id).await? {
        // Echo the prior admission for operator judgment — re-entry policy
        // is the venue's call, not ours
        Some(record) => Ok(ScanOutcome::AlreadyUsed { record }),
        None => Ok(ScanOutcome::Valid {
            purchase_id: ticket.id,
            fan_name: ticket.fan_name,
            quantity: ticket.quantity,
            purchased_at: ticket.purchased_at,
        }),
    }
}
