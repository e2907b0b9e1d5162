//! Data models
//!
//! Shared between gate-server and scanner-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod check_in;
pub mod live;
pub mod scan;
pub mod ticket;

// Re-exports
pub use check_in::*;
pub use live::*;
pub use scan::*;
pub use ticket::*;
