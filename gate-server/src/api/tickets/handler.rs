//! Ticket API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::codec;
use crate::core::ServerState;
use crate::db::repository::ticket;
use crate::utils::{AppError, AppResult};
use shared::models::{TicketPass, TicketPurchase, TicketPurchaseCreate};

/// POST /api/tickets - 创建票据账本记录
///
/// Called by the external payment flow once payment has settled. The
/// verification code is derived from the new purchase id here, so the row
/// and its code are born together.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TicketPurchaseCreate>,
) -> AppResult<Json<TicketPurchase>> {
    if payload.quantity < 1 {
        return Err(AppError::Validation("quantity must be at least 1".into()));
    }
    if payload.fan_name.trim().is_empty() {
        return Err(AppError::Validation("fan_name must not be empty".into()));
    }

    let id = shared::util::snowflake_id();
    let code = codec::encode(id, &state.config.code_secret);
    let created = ticket::create(&state.pool, id, &code, payload).await?;

    tracing::info!(
        purchase_id = created.id,
        event_id = created.event_id,
        quantity = created.quantity,
        "Ticket purchase recorded"
    );

    Ok(Json(created))
}

/// GET /api/tickets/:id - 按 id 查询
///
/// Also the reconnect path: a scanner that abandoned a check-in call
/// mid-flight re-queries here instead of re-submitting blindly.
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TicketPurchase>> {
    let t = ticket::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ticket purchase {} not found", id)))?;
    Ok(Json(t))
}

/// GET /api/tickets/:id/pass - 粉丝端票面
pub async fn get_pass(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TicketPass>> {
    let t = ticket::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ticket purchase {} not found", id)))?;

    // The stored column is authoritative; re-downloading a pass never
    // touches redemption state.
    Ok(Json(TicketPass {
        purchase_id: t.id,
        event_id: t.event_id,
        venue_id: t.venue_id,
        fan_name: t.fan_name.clone(),
        quantity: t.quantity,
        status: t.status,
        purchased_at: t.purchased_at,
        qr_payload: t.verification_code.clone(),
        code: t.verification_code,
    }))
}

/// POST /api/tickets/:id/refund - 标记退款 (active → refunded)
///
/// Driven by the external payment flow; once refunded the ticket is
/// permanently non-admissible regardless of check-in history.
pub async fn refund(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TicketPurchase>> {
    let t = ticket::mark_refunded(&state.pool, id).await?;

    tracing::info!(purchase_id = t.id, event_id = t.event_id, "Ticket purchase refunded");

    Ok(Json(t))
}
