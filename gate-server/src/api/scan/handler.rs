//! Scan API Handlers
//!
//! Thin HTTP shims over the scan services. Every door decision returns 200
//! with a [`ScanOutcome`] body; non-200 means infrastructure failure and
//! the scanner renders "unknown — retry".

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::scan;
use crate::utils::{AppError, AppResult};
use shared::models::{CheckInRequest, ScanOutcome, VerifyRequest};

/// POST /api/scan/verify - 只读校验
pub async fn verify(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyRequest>,
) -> AppResult<Json<ScanOutcome>> {
    let outcome = scan::verify(&state, &payload).await?;
    Ok(Json(outcome))
}

/// POST /api/scan/check-in - 原子入场
pub async fn check_in(
    State(state): State<ServerState>,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<Json<ScanOutcome>> {
    if payload.staff_name.trim().is_empty() {
        return Err(AppError::Validation("staff_name must not be empty".into()));
    }

    let outcome = scan::check_in(&state, &payload).await?;
    Ok(Json(outcome))
}
