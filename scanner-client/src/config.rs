//! Scanner configuration

/// Configuration for one scanning device at one gate
///
/// The event/venue scope and staff identity travel with every request —
/// the server trusts no ambient session state.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Event this gate is scanning for
    pub event_id: i64,

    /// Venue operating the gate
    pub venue_id: i64,

    /// Staff member operating this device
    pub staff_id: i64,
    pub staff_name: String,

    /// Commit the check-in immediately after a `valid` verification,
    /// without waiting for operator confirmation
    pub auto_admit: bool,

    /// Request timeout in seconds — a slow call becomes "unknown — retry",
    /// never an implicit deny
    pub timeout: u64,
}

impl ScannerConfig {
    /// Create a new scanner configuration
    pub fn new(
        base_url: impl Into<String>,
        event_id: i64,
        venue_id: i64,
        staff_id: i64,
        staff_name: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            event_id,
            venue_id,
            staff_id,
            staff_name: staff_name.into(),
            auto_admit: false,
            timeout: 10,
        }
    }

    /// Admit on valid without a confirmation tap
    pub fn with_auto_admit(mut self, auto_admit: bool) -> Self {
        self.auto_admit = auto_admit;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create a scanner from this configuration
    pub fn build(self) -> super::Scanner {
        super::Scanner::new(self)
    }
}
