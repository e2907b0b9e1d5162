//! Ticket ledger API 模块
//!
//! 外部支付流程在收款后创建账本记录；退款也由外部驱动。
//! `/pass` 是粉丝端票面 (二维码 + 分组文本)。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tickets", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/pass", get(handler::get_pass))
        .route("/{id}/refund", post(handler::refund))
}
