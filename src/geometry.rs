//! Scale-invariant facial proportions.
//!
//! Face width and height are not measured directly: width is approximated from the
//! outer eye corners and the forehead top is taken as the eye midline at the highest
//! eyebrow point. Every ratio is normalized by one of those two lengths, so the same
//! face photographed at a different distance or resolution produces the same values.

use serde::{Deserialize, Serialize};

use crate::landmarks::{Landmark, EYEBROWS};
use crate::types::{LandmarkSet, Point};

/// Face width as a multiple of the outer eye corner distance.
pub const FACE_WIDTH_PER_EYE_DISTANCE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryRatios {
    /// Face width over face height.
    pub face_aspect_ratio: f64,
    pub eye_distance_to_face_width: f64,
    /// Nose tip to mouth centre, over face height.
    pub nose_to_mouth_ratio: f64,
    pub mouth_to_face_width_ratio: f64,
    /// Eye midpoint to nose tip, over face height.
    pub eye_to_nose_ratio: f64,
    /// Raw pixel distance, left outer eye corner to nose tip.
    pub left_eye_to_nose: f64,
    /// Raw pixel distance, right outer eye corner to nose tip.
    pub right_eye_to_nose: f64,
    /// Left/right eye-to-nose imbalance over eye distance. 0.0 is perfectly symmetric.
    pub face_symmetry: f64,
}

impl GeometryRatios {
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        let left_eye = landmarks[Landmark::LeftEyeOuter];
        let right_eye = landmarks[Landmark::RightEyeOuter];
        let nose_tip = landmarks[Landmark::NoseTip];
        let mouth_left = landmarks[Landmark::MouthLeft];
        let mouth_right = landmarks[Landmark::MouthRight];
        let chin = landmarks[Landmark::Chin];

        let eye_distance = left_eye.distance(&right_eye);
        let face_width = eye_distance * FACE_WIDTH_PER_EYE_DISTANCE;

        let eyebrow_top = landmarks.points()[EYEBROWS]
            .iter()
            .map(|p| p.y)
            .fold(f64::INFINITY, f64::min);
        let eye_center = left_eye.midpoint(&right_eye);
        let forehead_top = Point::new(eye_center.x, eyebrow_top);
        let face_height = forehead_top.distance(&chin);

        let mouth_center = mouth_left.midpoint(&mouth_right);
        let left_eye_to_nose = left_eye.distance(&nose_tip);
        let right_eye_to_nose = right_eye.distance(&nose_tip);

        Self {
            face_aspect_ratio: face_width / face_height,
            eye_distance_to_face_width: eye_distance / face_width,
            nose_to_mouth_ratio: nose_tip.distance(&mouth_center) / face_height,
            mouth_to_face_width_ratio: mouth_left.distance(&mouth_right) / face_width,
            eye_to_nose_ratio: eye_center.distance(&nose_tip) / face_height,
            left_eye_to_nose,
            right_eye_to_nose,
            face_symmetry: (left_eye_to_nose - right_eye_to_nose).abs() / eye_distance,
        }
    }

    /// The five ratios that take part in profile comparison, in a fixed order.
    pub fn compared_ratios(&self) -> [f64; 5] {
        [
            self.face_aspect_ratio,
            self.eye_distance_to_face_width,
            self.nose_to_mouth_ratio,
            self.mouth_to_face_width_ratio,
            self.eye_to_nose_ratio,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.compared_ratios().iter().all(|v| v.is_finite())
            && self.left_eye_to_nose.is_finite()
            && self.right_eye_to_nose.is_finite()
            && self.face_symmetry.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::mean_face;
    use crate::types::BoundingBox;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn eye_distance_ratio_is_fixed_by_width_estimate() {
        let face = mean_face(&BoundingBox::new(0.0, 0.0, 200.0, 200.0));
        let g = GeometryRatios::from_landmarks(&face);
        assert!(close(g.eye_distance_to_face_width, 1.0 / FACE_WIDTH_PER_EYE_DISTANCE));
    }

    #[test]
    fn mean_face_measurements() {
        let face = mean_face(&BoundingBox::new(0.0, 0.0, 100.0, 100.0));
        let g = GeometryRatios::from_landmarks(&face);

        // Eyes at y=32 spanning x 24..76, highest eyebrow point y=21, chin at (50, 89).
        let face_width = 52.0 * 1.5;
        let face_height = 68.0;
        assert!(close(g.face_aspect_ratio, face_width / face_height));
        assert!(close(g.mouth_to_face_width_ratio, 36.0 / face_width));
        assert!(close(g.eye_to_nose_ratio, 30.0 / face_height));
        assert!(close(g.nose_to_mouth_ratio, 10.0 / face_height));
        assert!(close(g.face_symmetry, 0.0));
        assert!(g.is_finite());
    }

    #[test]
    fn ratios_ignore_image_scale() {
        let small = mean_face(&BoundingBox::new(10.0, 20.0, 120.0, 150.0));
        let large = mean_face(&BoundingBox::new(300.0, 40.0, 480.0, 600.0));
        let a = GeometryRatios::from_landmarks(&small).compared_ratios();
        let b = GeometryRatios::from_landmarks(&large).compared_ratios();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(close(*x, *y), "{x} != {y}");
        }
    }

    #[test]
    fn collapsed_eyes_are_not_finite() {
        let face = mean_face(&BoundingBox::new(0.0, 0.0, 0.0, 0.0));
        assert!(!GeometryRatios::from_landmarks(&face).is_finite());
    }
}
