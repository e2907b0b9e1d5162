//! Event API 模块
//!
//! 按演出维度的查询：售票列表、入场统计、实时入场流 (SSE)。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/events", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{event_id}/tickets", get(handler::list_tickets))
        .route("/{event_id}/attendance", get(handler::attendance))
        .route("/{event_id}/live", get(handler::live))
}
