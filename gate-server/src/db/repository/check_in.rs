//! Check-In Repository
//!
//! The single contended table in the subsystem. Admission races are decided
//! here, by one conditional INSERT, never by check-then-insert in
//! application code.

use super::{RepoError, RepoResult};
use shared::models::{CheckInRecord, ScanMethod};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, purchase_id, event_id, venue_id, staff_id, staff_name, method, times_scanned, checked_in_at FROM check_in";

/// Result of [`append`]
#[derive(Debug)]
pub enum AppendResult {
    /// This caller's insert won; the purchase is now admitted
    Created(CheckInRecord),
    /// Another call already admitted this purchase; here is the winning row
    Existing(CheckInRecord),
    /// The purchase is no longer active (refunded mid-flight) — the guard
    /// in the INSERT refused the row and no prior check-in exists
    NotActive,
}

/// Atomic conditional insert: admit the purchase if and only if it is still
/// active and has never been checked in.
///
/// Both conditions ride on a single statement so two gates racing on the
/// same code, or a refund racing an in-flight scan, are serialized by the
/// ledger:
/// - `UNIQUE(purchase_id)` + `ON CONFLICT DO NOTHING` — exactly one of N
///   concurrent callers inserts; the losers observe the winner's row.
/// - `WHERE status = 'active'` on the source SELECT — a refund that commits
///   first makes the insert a no-op.
///
/// No lock is held across any await point; there is nothing to leak when a
/// client disconnects mid-call.
pub async fn append(
    pool: &SqlitePool,
    purchase_id: i64,
    staff_id: i64,
    staff_name: &str,
    method: ScanMethod,
) -> RepoResult<AppendResult> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let method_str = match method {
        ScanMethod::Optical => "optical",
        ScanMethod::Manual => "manual",
    };

    let result = sqlx::query(
        "INSERT INTO check_in (id, purchase_id, event_id, venue_id, staff_id, staff_name, method, times_scanned, checked_in_at) \
         SELECT ?1, tp.id, tp.event_id, tp.venue_id, ?2, ?3, ?4, 1, ?5 \
         FROM ticket_purchase tp WHERE tp.id = ?6 AND tp.status = 'active' \
         ON CONFLICT(purchase_id) DO NOTHING",
    )
    .bind(id)
    .bind(staff_id)
    .bind(staff_name)
    .bind(method_str)
    .bind(now)
    .bind(purchase_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 1 {
        let record = find_by_purchase(pool, purchase_id)
            .await?
            .ok_or_else(|| RepoError::Database("Check-in row missing after insert".into()))?;
        return Ok(AppendResult::Created(record));
    }

    // Insert was a no-op: either a prior admission exists, or the purchase
    // is not active. Distinguish by reading the winner.
    match find_by_purchase(pool, purchase_id).await? {
        Some(record) => {
            let record = bump_times_scanned(pool, record.id).await?.unwrap_or(record);
            Ok(AppendResult::Existing(record))
        }
        None => Ok(AppendResult::NotActive),
    }
}

pub async fn find_by_purchase(
    pool: &SqlitePool,
    purchase_id: i64,
) -> RepoResult<Option<CheckInRecord>> {
    let sql = format!("{SELECT} WHERE purchase_id = ?");
    let row = sqlx::query_as::<_, CheckInRecord>(&sql)
        .bind(purchase_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Admitted counts for one event: (purchases, guests)
pub async fn count_admitted(pool: &SqlitePool, event_id: i64) -> RepoResult<(i64, i64)> {
    let row: (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(tp.quantity), 0) FROM check_in ci JOIN ticket_purchase tp ON ci.purchase_id = tp.id WHERE ci.event_id = ?",
    )
    .bind(event_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Count one more presentation of an already-admitted code.
/// Who/when/method are immutable; only the counter moves.
async fn bump_times_scanned(pool: &SqlitePool, id: i64) -> RepoResult<Option<CheckInRecord>> {
    sqlx::query("UPDATE check_in SET times_scanned = times_scanned + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    let sql = format!("{SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, CheckInRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
