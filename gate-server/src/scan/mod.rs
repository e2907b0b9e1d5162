//! Door scan services
//!
//! The two calls a scanner makes:
//!
//! - [`verify`] — read-only "would this code currently be admitted?";
//!   freely retryable, requires no coordination.
//! - [`check_in`] — the single mutating operation; at most one concurrent
//!   caller per purchase wins, decided by the ledger's conditional insert.
//!
//! Both run the same admissibility checks; check-in re-runs them at commit
//! time because a verify result may be stale the moment it is rendered.

mod check_in;
mod verify;

pub use check_in::check_in;
pub use verify::verify;

use shared::models::{InvalidReason, TicketPurchase};
use sqlx::SqlitePool;

use crate::codec;
use crate::db::repository::ticket;
use crate::utils::AppResult;

/// Shared admissibility pipeline: syntax → lookup → scope → refund.
enum Resolution {
    Ticket(TicketPurchase),
    Invalid(InvalidReason),
}

async fn resolve(
    pool: &SqlitePool,
    raw_code: &str,
    event_id: i64,
    venue_id: i64,
) -> AppResult<Resolution> {
    // Syntax first — malformed input never reaches the ledger
    let code = match codec::parse(raw_code) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected malformed code");
            return Ok(Resolution::Invalid(InvalidReason::InvalidFormat));
        }
    };

    let Some(ticket) = ticket::find_by_code(pool, code.as_str()).await? else {
        return Ok(Resolution::Invalid(InvalidReason::NotFound));
    };

    // Scope the scan to the scanning venue's own event; a ticket from
    // elsewhere resolves but is not admissible here
    if ticket.event_id != event_id || ticket.venue_id != venue_id {
        return Ok(Resolution::Invalid(InvalidReason::WrongEvent));
    }

    if ticket.is_refunded() {
        return Ok(Resolution::Invalid(InvalidReason::Refunded));
    }

    Ok(Resolution::Ticket(ticket))
}
