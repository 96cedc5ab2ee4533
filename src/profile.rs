//! Face profiles: the unit of comparison.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::angles::FacialAngles;
use crate::biometrics::BiometricFeatures;
use crate::error::{Error, Result};
use crate::geometry::GeometryRatios;
use crate::types::{BoundingBox, Descriptor, LandmarkSet, Point};

/// Captures scoring below this detector confidence are rejected.
pub const MIN_DETECTION_SCORE: f64 = 0.8;

/// Raw output of the external face detector for one face.
///
/// Nothing here is trusted: [`FaceProfile::assemble`] validates every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub descriptor: Vec<f64>,
    pub landmarks: Vec<Point>,
    pub detection_score: f64,
    pub age: f64,
    pub gender: String,
    pub bbox: BoundingBox,
}

/// Source of detections, typically a neural landmark/descriptor model.
///
/// Implementations report "no face" as [`Error::NoFaceDetected`] and any other
/// model failure as [`Error::Extraction`].
pub trait FaceExtractor {
    type Image: ?Sized;

    fn extract(&self, image: &Self::Image) -> Result<Detection>;
}

/// Complete derived feature record for one captured face.
///
/// Profiles are immutable once assembled; a new capture replaces the whole profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceProfile {
    pub descriptor: Descriptor,
    pub landmarks: LandmarkSet,
    pub detection_score: f64,
    pub age: f64,
    pub gender: String,
    pub bbox: BoundingBox,
    pub face_geometry: GeometryRatios,
    pub biometric_features: BiometricFeatures,
}

impl FaceProfile {
    /// Build a profile from one detection.
    ///
    /// Landmarks are rounded to 3 decimal places before any measurement is taken.
    pub fn assemble(detection: Detection) -> Result<Self> {
        check_detection_score(detection.detection_score)?;

        let landmarks = LandmarkSet::new(detection.landmarks)?.rounded();
        let descriptor = Descriptor::new(detection.descriptor)?;

        let face_geometry = GeometryRatios::from_landmarks(&landmarks);
        let mut biometric_features = BiometricFeatures::from_landmarks(&landmarks);
        biometric_features.facial_angles = Some(FacialAngles::from_landmarks(&landmarks));

        let profile = Self {
            descriptor,
            landmarks,
            detection_score: detection.detection_score,
            age: detection.age,
            gender: detection.gender,
            bbox: detection.bbox,
            face_geometry,
            biometric_features,
        };
        profile.validate()?;

        debug!(
            descriptor_len = profile.descriptor.len(),
            score = profile.detection_score,
            "assembled face profile"
        );
        Ok(profile)
    }

    /// Check the invariants every profile must hold, however it was obtained.
    ///
    /// Landmark count and a non-empty descriptor are guaranteed by their types; this
    /// covers the detection score gate and finiteness of every stored value.
    pub fn validate(&self) -> Result<()> {
        check_detection_score(self.detection_score)?;

        if !self.landmarks.points().iter().all(Point::is_finite) {
            return Err(Error::Extraction("landmarks contain non-finite coordinates".into()));
        }
        if !self.descriptor.values().iter().all(|v| v.is_finite()) {
            return Err(Error::Extraction("descriptor contains non-finite values".into()));
        }
        if !self.age.is_finite() {
            return Err(Error::Extraction("age estimate is not finite".into()));
        }
        if !self.face_geometry.is_finite() {
            return Err(Error::DegenerateGeometry("face geometry ratios are not finite"));
        }
        if !self.biometric_features.is_finite() {
            return Err(Error::DegenerateGeometry("biometric features are not finite"));
        }
        Ok(())
    }

    /// Run `extractor` on `image` and assemble the result. Extractor errors pass through untouched.
    pub fn capture<E: FaceExtractor>(extractor: &E, image: &E::Image) -> Result<Self> {
        Self::assemble(extractor.extract(image)?)
    }

    pub fn facial_angles(&self) -> Option<FacialAngles> {
        self.biometric_features.facial_angles
    }
}

fn check_detection_score(score: f64) -> Result<()> {
    if score.is_nan() || score < MIN_DETECTION_SCORE {
        warn!(
            score,
            minimum = MIN_DETECTION_SCORE,
            "rejecting low confidence capture"
        );
        return Err(Error::LowConfidenceCapture {
            score,
            minimum: MIN_DETECTION_SCORE,
        });
    }
    Ok(())
}
