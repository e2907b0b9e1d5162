//! Ticket Purchase Repository

use super::{RepoError, RepoResult};
use shared::models::{TicketPurchase, TicketPurchaseCreate};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, event_id, venue_id, fan_id, fan_name, quantity, amount_paid, verification_code, status, purchased_at, refunded_at FROM ticket_purchase";

/// Insert a purchase row created by the external payment flow.
///
/// `id` and `verification_code` are supplied by the caller because the code
/// is derived from the id before insert.
pub async fn create(
    pool: &SqlitePool,
    id: i64,
    verification_code: &str,
    data: TicketPurchaseCreate,
) -> RepoResult<TicketPurchase> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "INSERT INTO ticket_purchase (id, event_id, venue_id, fan_id, fan_name, quantity, amount_paid, verification_code, status, purchased_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'active', ?9)",
    )
    .bind(id)
    .bind(data.event_id)
    .bind(data.venue_id)
    .bind(data.fan_id)
    .bind(&data.fan_name)
    .bind(data.quantity)
    .bind(data.amount_paid)
    .bind(verification_code)
    .bind(now)
    .execute(pool)
    .await;

    if let Err(sqlx::Error::Database(db_err)) = &result
        && db_err.is_unique_violation()
    {
        return Err(RepoError::Duplicate(format!(
            "Verification code already issued: {verification_code}"
        )));
    }
    result?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create ticket purchase".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<TicketPurchase>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, TicketPurchase>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Lookup by canonical verification code — the scan path's entry point
pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<TicketPurchase>> {
    let sql = format!("{SELECT} WHERE verification_code = ?");
    let row = sqlx::query_as::<_, TicketPurchase>(&sql)
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_event(pool: &SqlitePool, event_id: i64) -> RepoResult<Vec<TicketPurchase>> {
    let sql = format!("{SELECT} WHERE event_id = ? ORDER BY purchased_at DESC");
    let rows = sqlx::query_as::<_, TicketPurchase>(&sql)
        .bind(event_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Mark a purchase refunded (active → refunded, at most once).
///
/// Driven by the external payment flow. Safe to repeat: a second call finds
/// the row already refunded and returns it unchanged.
pub async fn mark_refunded(pool: &SqlitePool, id: i64) -> RepoResult<TicketPurchase> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE ticket_purchase SET status = 'refunded', refunded_at = ?1 WHERE id = ?2 AND status = 'active'",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Ticket purchase {id} not found")))
}

/// Sold counts for one event: (purchases, guests), refunded excluded
pub async fn count_sold(pool: &SqlitePool, event_id: i64) -> RepoResult<(i64, i64)> {
    let row: (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(quantity), 0) FROM ticket_purchase WHERE event_id = ? AND status = 'active'",
    )
    .bind(event_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
