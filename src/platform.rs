//! Platform-specific configuration

/// Submit shortcut display for the status bar
/// Ctrl+S is used on all platforms (Cmd+S is taken by most terminals on macOS)
pub const SUBMIT_SHORTCUT: &str = "^S";

/// Dismiss shortcut display for the status bar
pub const DISMISS_SHORTCUT: &str = "Esc";
