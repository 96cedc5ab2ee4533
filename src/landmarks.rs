//! Named indices into the 68-point landmark scheme.
//!
//! Regions, in point order:
//! - 0-16: jaw line
//! - 17-21: left eyebrow, 22-26: right eyebrow
//! - 27-35: nose (bridge 27-30, base 31-35)
//! - 36-41: left eye, 42-47: right eye
//! - 48-67: mouth (outer lip 48-59, inner lip 60-67)
//!
//! Left and right are as seen in the image: "left" points have the smaller x.
//! Anatomically they belong to the subject's right side.

use std::ops::RangeInclusive;

use crate::types::{BoundingBox, LandmarkSet, Point};

/// Number of points in every landmark set.
pub const LANDMARK_COUNT: usize = 68;

pub const JAW: RangeInclusive<usize> = 0..=16;
pub const LEFT_EYEBROW: RangeInclusive<usize> = 17..=21;
pub const RIGHT_EYEBROW: RangeInclusive<usize> = 22..=26;
pub const EYEBROWS: RangeInclusive<usize> = 17..=26;
pub const NOSE: RangeInclusive<usize> = 27..=35;
pub const LEFT_EYE: RangeInclusive<usize> = 36..=41;
pub const RIGHT_EYE: RangeInclusive<usize> = 42..=47;
pub const MOUTH: RangeInclusive<usize> = 48..=67;

/// Anatomical points the scoring engine reads directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    JawLeft = 0,
    Chin = 8,
    JawRight = 16,
    NoseBridge = 27,
    NoseLeft = 31,
    /// Centre of the nose base; the nose tip reference for all measurements.
    NoseTip = 33,
    NoseRight = 35,
    LeftEyeOuter = 36,
    RightEyeOuter = 45,
    MouthLeft = 48,
    MouthRight = 54,
}

impl Landmark {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Points compared pixel-for-pixel by the landmark alignment score.
pub const ALIGNMENT_POINTS: [Landmark; 6] = [
    Landmark::LeftEyeOuter,
    Landmark::RightEyeOuter,
    Landmark::NoseTip,
    Landmark::MouthLeft,
    Landmark::MouthRight,
    Landmark::Chin,
];

/// Average frontal face in normalized [0,1] box coordinates.
///
/// Region labels use image-side naming (see the module docs).
const MEAN_FACE: [(f64, f64); LANDMARK_COUNT] = [
    // Jaw line (0-16)
    (0.10, 0.35),
    (0.11, 0.45),
    (0.12, 0.55),
    (0.14, 0.65),
    (0.18, 0.73),
    (0.24, 0.80),
    (0.32, 0.85),
    (0.41, 0.88),
    (0.50, 0.89), // Chin center
    (0.59, 0.88),
    (0.68, 0.85),
    (0.76, 0.80),
    (0.82, 0.73),
    (0.86, 0.65),
    (0.88, 0.55),
    (0.89, 0.45),
    (0.90, 0.35),
    // Left eyebrow (17-21)
    (0.20, 0.26),
    (0.25, 0.22),
    (0.32, 0.21),
    (0.38, 0.23),
    (0.43, 0.27),
    // Right eyebrow (22-26)
    (0.57, 0.27),
    (0.62, 0.23),
    (0.68, 0.21),
    (0.75, 0.22),
    (0.80, 0.26),
    // Nose bridge (27-30)
    (0.50, 0.32),
    (0.50, 0.40),
    (0.50, 0.48),
    (0.50, 0.55),
    // Nose bottom (31-35)
    (0.40, 0.58),
    (0.45, 0.60),
    (0.50, 0.62),
    (0.55, 0.60),
    (0.60, 0.58),
    // Left eye (36-41)
    (0.24, 0.32),
    (0.28, 0.29),
    (0.34, 0.29),
    (0.38, 0.33),
    (0.34, 0.35),
    (0.28, 0.35),
    // Right eye (42-47)
    (0.62, 0.33),
    (0.66, 0.29),
    (0.72, 0.29),
    (0.76, 0.32),
    (0.72, 0.35),
    (0.66, 0.35),
    // Outer lip (48-59)
    (0.32, 0.72),
    (0.38, 0.68),
    (0.44, 0.66),
    (0.50, 0.67),
    (0.56, 0.66),
    (0.62, 0.68),
    (0.68, 0.72),
    (0.62, 0.78),
    (0.56, 0.80),
    (0.50, 0.81),
    (0.44, 0.80),
    (0.38, 0.78),
    // Inner lip (60-67)
    (0.36, 0.72),
    (0.44, 0.70),
    (0.50, 0.70),
    (0.56, 0.70),
    (0.64, 0.72),
    (0.56, 0.74),
    (0.50, 0.75),
    (0.44, 0.74),
];

/// A neutral frontal face laid out inside `bbox`.
///
/// Useful as a reference shape and as a starting point for synthetic captures.
pub fn mean_face(bbox: &BoundingBox) -> LandmarkSet {
    let points = MEAN_FACE
        .iter()
        .map(|&(x, y)| Point::new(bbox.x + x * bbox.width, bbox.y + y * bbox.height))
        .collect();
    LandmarkSet::from_points_unchecked(points)
}
