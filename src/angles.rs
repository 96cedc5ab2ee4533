//! Head orientation angles from landmark pairs.
//!
//! Attached to every profile but not yet weighted by the comparator.

use serde::{Deserialize, Serialize};

use crate::landmarks::Landmark;
use crate::types::{LandmarkSet, Point};

/// Orientation angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialAngles {
    /// Roll of the outer eye corner line. 0.0 for a level head.
    pub eye_angle: f64,
    /// Direction from nose tip to chin. PI/2 for an upright face (image y grows downward).
    pub nose_angle: f64,
}

impl FacialAngles {
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        Self {
            eye_angle: angle(
                landmarks[Landmark::LeftEyeOuter],
                landmarks[Landmark::RightEyeOuter],
            ),
            nose_angle: angle(landmarks[Landmark::NoseTip], landmarks[Landmark::Chin]),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.eye_angle.is_finite() && self.nose_angle.is_finite()
    }
}

fn angle(from: Point, to: Point) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}
