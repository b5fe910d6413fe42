// Shared ANSI/VT100 sequences used by the board renderer.

/// Reset terminal styling to defaults.
pub const STYLE_RESET: &str = crate::csi!("0m");
/// Bold text.
pub const STYLE_BOLD: &str = crate::csi!("1m");
/// Light gray foreground.
pub const FG_LIGHT_GRAY: &str = crate::csi!("37m");
/// Occupied slots and active statuses.
pub const FG_BLUE: &str = crate::csi!("34m");
/// Empty slots and canceled statuses.
pub const FG_RED: &str = crate::csi!("31m");
/// Ready (closed) statuses.
pub const FG_GREEN: &str = crate::csi!("32m");

/// Wrap `s` in a color, resetting afterwards.
pub fn paint<S: AsRef<str>>(color: &str, s: S) -> String {
    format!("{}{}{}", color, s.as_ref(), STYLE_RESET)
}
