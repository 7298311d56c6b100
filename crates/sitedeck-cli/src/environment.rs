//! Terminal environment
//!
//! Supplies what the core asks of the host: currently only whether a dark
//! color scheme is preferred, guessed from `COLORFGBG`.

use sitedeck_core::Environment;

/// Environment backed by the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalEnvironment {
    colorfgbg: Option<String>,
}

impl TerminalEnvironment {
    /// Capture the current process environment
    pub fn detect() -> Self {
        Self {
            colorfgbg: std::env::var("COLORFGBG").ok(),
        }
    }
}

impl Environment for TerminalEnvironment {
    fn prefers_dark(&self) -> bool {
        self.colorfgbg
            .as_deref()
            .and_then(background_is_dark)
            .unwrap_or(false)
    }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); the last field is the
/// background palette index. 0-6 and 8 are the dark ones.
fn background_is_dark(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}
