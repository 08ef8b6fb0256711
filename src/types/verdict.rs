//! Window verdict definitions

use serde::{Deserialize, Serialize};

/// Outcome of evaluating a stability window after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Window not yet full, no decision taken
    Accumulating,
    /// Nothing to report, window kept as is
    Stable,
    /// Correct and incorrect samples mixed, window reset
    Moving,
    /// Same incorrect posture held for the whole window, window reset
    Flagged,
}

impl Verdict {
    /// Did this verdict clear the window?
    pub fn resets_window(&self) -> bool {
        matches!(self, Verdict::Moving | Verdict::Flagged)
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Verdict::Accumulating => "\x1b[90m", // Gray
            Verdict::Stable => "\x1b[32m",       // Green
            Verdict::Moving => "\x1b[33m",       // Yellow
            Verdict::Flagged => "\x1b[31m",      // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for verdict
    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::Accumulating => "⏳",
            Verdict::Stable => "🟢",
            Verdict::Moving => "🔶",
            Verdict::Flagged => "🔴",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Verdict::Accumulating => "ACCUMULATING",
            Verdict::Stable => "STABLE",
            Verdict::Moving => "MOVING",
            Verdict::Flagged => "FLAGGED",
        };
        write!(f, "{}", name)
    }
}
