//! Scanner Client - HTTP client for the GigMatch Gate Server
//!
//! The gate-side half of the door flow: read a code (camera or keyboard),
//! ask the server "would this be admitted?", show staff a provisional
//! answer fast, then commit the admission and show the authoritative
//! result.
//!
//! The authoritative result always wins over the provisional one — a
//! check-in that answers `already_used` right after a `valid` verification
//! is not a bug, it is a race another gate won, and it renders calmly.

pub mod config;
pub mod display;
pub mod error;
pub mod http;
pub mod scanner;

pub use config::ScannerConfig;
pub use display::{DisplayColor, GateDisplay};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use scanner::{GateResult, Scanner};

// Re-export shared types for convenience
pub use shared::models::{
    AttendanceSummary, CheckInRequest, InvalidReason, ScanMethod, ScanOutcome, TicketPurchase,
    VerifyRequest,
};
