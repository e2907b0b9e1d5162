//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`scan`] - 门闸扫描接口 (verify / check-in)
//! - [`tickets`] - 票据账本接口
//! - [`events`] - 按演出查询：售票、入场统计、实时流

pub mod events;
pub mod health;
pub mod scan;
pub mod tickets;

use axum::Router;

use crate::core::ServerState;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(scan::router())
        .merge(tickets::router())
        .merge(events::router())
}
