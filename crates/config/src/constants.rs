//! Centralized constants for the Clean Room TUI workspace.
//!
//! Default values used across crates to avoid magic number duplication.

// =============================================================================
// Connection Defaults
// =============================================================================

/// Default clean room API base URL (including the /api prefix).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3101/api";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of retries for rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

// =============================================================================
// Polling Defaults
// =============================================================================

/// Sync statistics polling interval while pulsing is active, in seconds.
pub const DEFAULT_SYNC_POLL_SECS: u64 = 10;

// =============================================================================
// TUI/UI Defaults
// =============================================================================

/// Default channel capacity for action messages.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Default UI tick interval for animations in milliseconds.
pub const DEFAULT_UI_TICK_MS: u64 = 250;

/// Number of rows shown in a CSV preview (header + 5 data rows).
pub const CSV_PREVIEW_ROWS: usize = 6;

/// Maximum number of sync stat records kept for display.
pub const SYNC_STATS_MAX_ITEMS: usize = 50;
