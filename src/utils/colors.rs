/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Uptime percentage color:
/// \>= 99 → green
/// \>= 90 → yellow
/// otherwise → red
pub fn color_for_uptime(pct: f64) -> &'static str {
    if pct >= 99.0 {
        GREEN
    } else if pct >= 90.0 {
        YELLOW
    } else {
        RED
    }
}
