//! PostureGuard: posture stability classifier
//!
//! Per-frame posture labels (back and neck) flow into fixed-capacity rolling
//! windows. After every tick each window is evaluated: a window full of the
//! same incorrect posture is FLAGGED, a window mixing correct and incorrect
//! samples is MOVING, anything else is STABLE.

pub mod core;
pub mod error;
pub mod types;

pub use error::{PostureError, Result};

// =============================================================================
// SAMPLING DEFAULTS
// =============================================================================

/// Sampling rate of the pose pipeline (frames per second)
/// Measured average on the reference device
pub const DEFAULT_FPS: u32 = 19;

/// How long an incorrect posture must be held before an alert (seconds)
pub const DEFAULT_DURATION_SECS: u32 = 10;

/// Only every second frame is classified, so a window holds half the frames
pub const FRAMES_PER_SAMPLE: u32 = 2;

/// Largest window a region may use: 10 minutes at 120 fps
pub const MAX_CAPACITY: usize = 10 * 60 * 120;

/// Number of samples covering `duration_secs` at `fps`
///
/// Never returns 0: a window always holds at least one sample.
pub fn frames_for(duration_secs: u32, fps: u32) -> usize {
    let frames = duration_secs.saturating_mul(fps) / FRAMES_PER_SAMPLE;
    frames.max(1) as usize
}

// =============================================================================
// REPORTING
// =============================================================================

/// Reported for a session that produced no alerts
pub const NO_INCORRECT_POSTURES: &str = "No Incorrect Postures";

/// Capacity of the live-update broadcast channel per API session
pub const UPDATE_CHANNEL_CAPACITY: usize = 100;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
