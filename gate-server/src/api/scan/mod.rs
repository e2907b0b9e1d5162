//! Scan API 模块
//!
//! 门闸设备调用的两个接口：verify (只读) 和 check-in (原子写入)。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/scan", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/verify", post(handler::verify))
        .route("/check-in", post(handler::check_in))
}
