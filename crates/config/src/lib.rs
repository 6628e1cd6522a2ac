//! Configuration for the Clean Room TUI.
//!
//! Covers three concerns:
//! - connection settings (base URL, timeout, retries) with env-var and
//!   CLI override support (`loader`)
//! - persisted UI preferences such as the selected theme (`persistence`)
//! - the runtime theme palette expanded from the persisted choice (`types`)

pub mod constants;
pub mod loader;
pub mod persistence;
pub mod types;

pub use loader::{ConfigError, ConfigLoader};
pub use persistence::{ConfigManager, PersistedState};
pub use types::{ColorTheme, Config, ConnectionConfig, Theme};
