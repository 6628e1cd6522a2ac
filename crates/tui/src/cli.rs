//! Command-line argument parsing for cleanroom-tui.
//!
//! Configuration precedence (highest to lowest):
//! 1. CLI arguments (e.g., --base-url)
//! 2. Environment variables (CLEANROOM_BASE_URL, ...)
//! 3. Default values

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for cleanroom-tui.
#[derive(Debug, Parser)]
#[command(
    name = "cleanroom-tui",
    about = "Terminal dashboard for a healthcare data clean room",
    version,
    after_help = "Examples:\n  cleanroom-tui\n  cleanroom-tui --base-url http://cleanroom.internal:3101/api\n  cleanroom-tui --log-dir /var/log/cleanroom-tui --no-mouse\n  cleanroom-tui --fresh\n"
)]
pub struct Cli {
    /// Base URL of the clean room API
    #[arg(long, env = "CLEANROOM_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to a custom persisted-state file
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Disable mouse capture
    #[arg(long)]
    pub no_mouse: bool,

    /// Start with fresh state, ignoring any persisted state
    #[arg(long)]
    pub fresh: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["cleanroom-tui"]);
        assert!(cli.base_url.is_none());
        assert!(!cli.no_mouse);
        assert!(!cli.fresh);
        assert_eq!(cli.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_base_url_flag() {
        let cli = Cli::parse_from(["cleanroom-tui", "--base-url", "http://x:3101/api"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://x:3101/api"));
    }

    #[test]
    fn test_fresh_flag() {
        let cli = Cli::parse_from(["cleanroom-tui", "--fresh"]);
        assert!(cli.fresh);
    }
}
