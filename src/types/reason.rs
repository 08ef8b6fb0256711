//! Reason codes attached to every region verdict

use serde::{Deserialize, Serialize};
use crate::types::{PostureLabel, Verdict};

/// Reason codes for all verdicts and window changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // P001: Window fill
    // =========================================================================
    /// Window still filling, evaluation deferred
    P001_WINDOW_ACCUMULATING,

    // =========================================================================
    // P002: Verdicts
    // =========================================================================
    /// Whole window holds reclined samples
    P002_SUSTAINED_RECLINED,
    /// Whole window holds forward-leaning samples
    P002_SUSTAINED_FORWARD,
    /// Correct and incorrect samples in the same window
    P002_TRANSITION_DETECTED,
    /// No incorrect posture held
    P002_POSTURE_STABLE,
}

impl ReasonCode {
    /// Reason for a verdict; `flagged` is the label recorded on FLAGGED
    pub fn for_verdict(verdict: Verdict, flagged: Option<PostureLabel>) -> Self {
        match verdict {
            Verdict::Accumulating => Self::P001_WINDOW_ACCUMULATING,
            Verdict::Stable => Self::P002_POSTURE_STABLE,
            Verdict::Moving => Self::P002_TRANSITION_DETECTED,
            Verdict::Flagged => match flagged {
                Some(PostureLabel::Reclined) => Self::P002_SUSTAINED_RECLINED,
                _ => Self::P002_SUSTAINED_FORWARD,
            },
        }
    }

    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::P001_WINDOW_ACCUMULATING => "P001_WINDOW_ACCUMULATING",
            Self::P002_SUSTAINED_RECLINED => "P002_SUSTAINED_RECLINED",
            Self::P002_SUSTAINED_FORWARD => "P002_SUSTAINED_FORWARD",
            Self::P002_TRANSITION_DETECTED => "P002_TRANSITION_DETECTED",
            Self::P002_POSTURE_STABLE => "P002_POSTURE_STABLE",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::P001_WINDOW_ACCUMULATING => "Collecting samples",
            Self::P002_SUSTAINED_RECLINED => "Reclined for the whole window",
            Self::P002_SUSTAINED_FORWARD => "Leaning forward for the whole window",
            Self::P002_TRANSITION_DETECTED => "User is moving",
            Self::P002_POSTURE_STABLE => "Posture stable",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_per_verdict() {
        assert_eq!(ReasonCode::for_verdict(Verdict::Accumulating, None), ReasonCode::P001_WINDOW_ACCUMULATING);
        assert_eq!(ReasonCode::for_verdict(Verdict::Stable, None), ReasonCode::P002_POSTURE_STABLE);
        assert_eq!(ReasonCode::for_verdict(Verdict::Moving, None), ReasonCode::P002_TRANSITION_DETECTED);
    }

    #[test]
    fn test_flagged_reason_follows_label() {
        assert_eq!(
            ReasonCode::for_verdict(Verdict::Flagged, Some(PostureLabel::Reclined)),
            ReasonCode::P002_SUSTAINED_RECLINED
        );
        assert_eq!(
            ReasonCode::for_verdict(Verdict::Flagged, Some(PostureLabel::ForwardLeaning)),
            ReasonCode::P002_SUSTAINED_FORWARD
        );
    }

    #[test]
    fn test_code_matches_serialized_name() {
        let json = serde_json::to_string(&ReasonCode::P002_TRANSITION_DETECTED).unwrap();
        assert_eq!(json, format!("\"{}\"", ReasonCode::P002_TRANSITION_DETECTED.code()));
    }
}
