//! Secondary shape descriptors: eye and mouth openness, eyebrow arches, nose shape.

use serde::{Deserialize, Serialize};

use crate::angles::FacialAngles;
use crate::landmarks::{Landmark, LEFT_EYE, LEFT_EYEBROW, MOUTH, RIGHT_EYE, RIGHT_EYEBROW};
use crate::types::{LandmarkSet, Point};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyebrowArch {
    pub left_arch: f64,
    pub right_arch: f64,
    pub asymmetry: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricFeatures {
    pub left_eye_aspect_ratio: f64,
    pub right_eye_aspect_ratio: f64,
    /// Absolute difference of the two eye aspect ratios.
    pub eye_asymmetry: f64,
    pub nose_aspect_ratio: f64,
    pub mouth_aspect_ratio: f64,
    /// Raw pixel distance between the jaw line endpoints.
    pub jaw_width: f64,
    pub eyebrow_arch: EyebrowArch,
    /// Filled in by the profile assembler.
    pub facial_angles: Option<FacialAngles>,
}

impl BiometricFeatures {
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        let points = landmarks.points();

        let left_eye_aspect_ratio = eye_aspect_ratio(&points[LEFT_EYE]);
        let right_eye_aspect_ratio = eye_aspect_ratio(&points[RIGHT_EYE]);

        let nose_height = landmarks[Landmark::NoseBridge].distance(&landmarks[Landmark::NoseTip]);
        let nose_width = landmarks[Landmark::NoseLeft].distance(&landmarks[Landmark::NoseRight]);

        let left_arch = eyebrow_arch(&points[LEFT_EYEBROW]);
        let right_arch = eyebrow_arch(&points[RIGHT_EYEBROW]);

        Self {
            left_eye_aspect_ratio,
            right_eye_aspect_ratio,
            eye_asymmetry: (left_eye_aspect_ratio - right_eye_aspect_ratio).abs(),
            nose_aspect_ratio: nose_height / nose_width,
            mouth_aspect_ratio: mouth_aspect_ratio(&points[MOUTH]),
            jaw_width: landmarks[Landmark::JawLeft].distance(&landmarks[Landmark::JawRight]),
            eyebrow_arch: EyebrowArch {
                left_arch,
                right_arch,
                asymmetry: (left_arch - right_arch).abs(),
            },
            facial_angles: None,
        }
    }

    /// The five features that take part in profile comparison, in a fixed order.
    pub fn compared_features(&self) -> [f64; 5] {
        [
            self.left_eye_aspect_ratio,
            self.right_eye_aspect_ratio,
            self.nose_aspect_ratio,
            self.mouth_aspect_ratio,
            self.eye_asymmetry,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.compared_features().iter().all(|v| v.is_finite())
            && self.jaw_width.is_finite()
            && self.eyebrow_arch.left_arch.is_finite()
            && self.eyebrow_arch.right_arch.is_finite()
            && self.facial_angles.map_or(true, |a| a.is_finite())
    }
}

/// Eye aspect ratio from six points: outer corner, two upper lid points,
/// inner corner, two lower lid points.
pub fn eye_aspect_ratio(eye: &[Point]) -> f64 {
    debug_assert_eq!(eye.len(), 6);
    let vertical = eye[1].distance(&eye[5]) + eye[2].distance(&eye[4]);
    vertical / (2.0 * eye[0].distance(&eye[3]))
}

/// Mouth aspect ratio from the 20 mouth points, outer lip first.
pub fn mouth_aspect_ratio(mouth: &[Point]) -> f64 {
    debug_assert_eq!(mouth.len(), 20);
    let vertical = mouth[2].distance(&mouth[10]) + mouth[4].distance(&mouth[8]);
    vertical / (2.0 * mouth[0].distance(&mouth[6]))
}

/// Height of the middle eyebrow point relative to the higher of its two ends.
///
/// In image coordinates a raised arch gives a negative value.
pub fn eyebrow_arch(brow: &[Point]) -> f64 {
    debug_assert_eq!(brow.len(), 5);
    brow[2].y - brow[0].y.min(brow[4].y)
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
    fn open_eye_ratio() {
        // 4 wide, lids 1 above and 1 below the corners.
        let eye = [
            Point::new(0.0, 0.0),
            Point::new(1.0, -1.0),
            Point::new(3.0, -1.0),
            Point::new(4.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(1.0, 1.0),
        ];
        assert!(close(eye_aspect_ratio(&eye), 0.5));
    }

    #[test]
    fn arch_uses_higher_end() {
        let brow = [
            Point::new(0.0, 10.0),
            Point::new(1.0, 7.0),
            Point::new(2.0, 6.0),
            Point::new(3.0, 7.0),
            Point::new(4.0, 8.0),
        ];
        assert!(close(eyebrow_arch(&brow), -2.0));
    }

    #[test]
    fn mean_face_features() {
        let face = mean_face(&BoundingBox::new(0.0, 0.0, 100.0, 100.0));
        let f = BiometricFeatures::from_landmarks(&face);

        // Lids 6 apart, corners offset by (14, 1).
        let ear = 12.0 / (2.0 * 197.0_f64.sqrt());
        assert!(close(f.left_eye_aspect_ratio, ear));
        assert!(close(f.right_eye_aspect_ratio, ear));
        assert!(close(f.eye_asymmetry, 0.0));
        assert!(close(f.mouth_aspect_ratio, 14.0 / 36.0));
        assert!(close(f.nose_aspect_ratio, 30.0 / 20.0));
        assert!(close(f.jaw_width, 80.0));
        assert!(close(f.eyebrow_arch.left_arch, -5.0));
        assert!(close(f.eyebrow_arch.asymmetry, 0.0));
        assert!(f.facial_angles.is_none());
        assert!(f.is_finite());
    }
}
