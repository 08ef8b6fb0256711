//! Keypoint geometry used by the label producers
//!
//! Pure functions over 2D keypoints in normalized image coordinates.

use std::f64::consts::PI;
use serde::{Deserialize, Serialize};

const DEGREES_PER_RADIAN: f64 = 180.0 / PI;

/// A body keypoint in image space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Keypoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Angle at `p2` from `p1` to `p3`, in degrees within [0, 360)
///
/// Direction-sensitive: swapping `p1` and `p3` gives `360 - angle`.
pub fn angle_between(p1: Keypoint, p2: Keypoint, p3: Keypoint) -> f64 {
    let to_p3 = (p3.y - p2.y).atan2(p3.x - p2.x);
    let to_p1 = (p1.y - p2.y).atan2(p1.x - p2.x);
    let angle = (to_p3 - to_p1) * DEGREES_PER_RADIAN;
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Planar distance between two keypoints
pub fn euclidean_distance(a: Keypoint, b: Keypoint) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}
