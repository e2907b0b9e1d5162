//! Event API Handlers

use std::convert::Infallible;

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use tokio::sync::broadcast;

use crate::core::ServerState;
use crate::db::repository::{check_in, ticket};
use crate::utils::AppResult;
use shared::models::{AttendanceSummary, TicketPurchase};

/// GET /api/events/:event_id/tickets - 演出售票列表
pub async fn list_tickets(
    State(state): State<ServerState>,
    Path(event_id): Path<i64>,
) -> AppResult<Json<Vec<TicketPurchase>>> {
    let tickets = ticket::find_by_event(&state.pool, event_id).await?;
    Ok(Json(tickets))
}

/// GET /api/events/:event_id/attendance - 售出 vs 入场统计
///
/// Advisory only — scanners display it, nothing gates on it.
pub async fn attendance(
    State(state): State<ServerState>,
    Path(event_id): Path<i64>,
) -> AppResult<Json<AttendanceSummary>> {
    let (sold_purchases, sold_guests) = ticket::count_sold(&state.pool, event_id).await?;
    let (admitted_purchases, admitted_guests) =
        check_in::count_admitted(&state.pool, event_id).await?;

    Ok(Json(AttendanceSummary {
        event_id,
        sold_purchases,
        sold_guests,
        admitted_purchases,
        admitted_guests,
    }))
}

/// GET /api/events/:event_id/live - 入场实时流 (SSE)
///
/// Dashboards subscribe here instead of polling the tally. Lagged
/// subscribers skip ahead (dropped notices); the stream ends only when the
/// client disconnects.
pub async fn live(
    State(state): State<ServerState>,
    Path(event_id): Path<i64>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.live.subscribe(event_id);

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(notice) => {
                    let event = match Event::default().event("check_in").json_data(&notice) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to serialize check-in notice");
                            continue;
                        }
                    };
                    return Some((Ok::<_, Infallible>(event), rx));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Live subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
