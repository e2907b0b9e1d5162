//! Check-In Service — the single state-changing operation

use shared::models::{
    CheckInNotice, CheckInRecord, CheckInRequest, InvalidReason, ScanOutcome, TicketPurchase,
};

use super::{Resolution, resolve};
use crate::core::ServerState;
use crate::db::repository::check_in::{self, AppendResult};
use crate::db::repository::ticket;
use crate::utils::AppResult;

/// Attempt the `ACTIVE → ADMITTED` transition for the purchase behind a
/// code.
///
/// Every admissibility check re-runs here — a client-reported "valid" from
/// an earlier verify call is never trusted, since time may have passed or a
/// race may have occurred. The transition itself is one conditional insert
/// at the ledger; of N concurrent calls for the same purchase exactly one
/// returns `Admitted` and the rest `AlreadyUsed`.
pub async fn check_in(state: &ServerState, req: &CheckInRequest) -> AppResult<ScanOutcome> {
    let ticket = match resolve(&state.pool, &req.code, req.event_id, req.venue_id).await? {
        Resolution::Invalid(reason) => return Ok(ScanOutcome::Invalid { reason }),
        Resolution::Ticket(ticket) => ticket,
    };

    match check_in::append(
        &state.pool,
        ticket.id,
        req.staff_id,
        &req.staff_name,
        req.method,
    )
    .await?
    {
        AppendResult::Created(record) => {
            tracing::info!(
                purchase_id = ticket.id,
                event_id = ticket.event_id,
                staff = %req.staff_name,
                quantity = ticket.quantity,
                "Ticket admitted"
            );
            publish_admission(state, &ticket, &record).await;
            Ok(ScanOutcome::Admitted { record })
        }
        // Lost the race or re-scan of an admitted code — the expected
        // double-scan outcome, reported with the winner's metadata
        AppendResult::Existing(record) => Ok(ScanOutcome::AlreadyUsed { record }),
        // The status guard refused the insert: a refund committed between
        // our check above and the write. The ledger's ordering is final.
        AppendResult::NotActive => match ticket::find_by_id(&state.pool, ticket.id).await? {
            Some(t) if t.is_refunded() => Ok(ScanOutcome::Invalid {
                reason: InvalidReason::Refunded,
            }),
            _ => Ok(ScanOutcome::Invalid {
                reason: InvalidReason::NotFound,
            }),
        },
    }
}

/// Notify live dashboards after the write has committed. Strictly
/// best-effort: a failed count query or absent subscribers never bubbles
/// into the admission result.
async fn publish_admission(state: &ServerState, ticket: &TicketPurchase, record: &CheckInRecord) {
    let sold = ticket::count_sold(&state.pool, ticket.event_id).await;
    let admitted = check_in::count_admitted(&state.pool, ticket.event_id).await;

    let (sold_purchases, admitted_purchases) = match (sold, admitted) {
        (Ok((sold, _)), Ok((admitted, _))) => (sold, admitted),
        (sold, admitted) => {
            tracing::warn!(?sold, ?admitted, "Skipping live notice: tally query failed");
            return;
        }
    };

    state.live.publish(CheckInNotice {
        event_id: ticket.event_id,
        purchase_id: ticket.id,
        staff_name: record.staff_name.clone(),
        quantity: ticket.quantity,
        checked_in_at: record.checked_in_at,
        admitted_purchases,
        sold_purchases,
    });
}
