//! Profile comparison: four independent similarity scores, a weighted confidence
//! and a multi-factor match decision.
//!
//! Known limitation: the landmark alignment score compares raw pixel coordinates.
//! Unlike every other factor it is not scale invariant, so it is only meaningful
//! when both captures share similar framing and resolution.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::biometrics::BiometricFeatures;
use crate::error::Result;
use crate::geometry::GeometryRatios;
use crate::landmarks::ALIGNMENT_POINTS;
use crate::policy::{
    ScoringPolicy, AGE_PENALTY, BIOMETRIC_PENALTY, DESCRIPTOR_PENALTY, GEOMETRY_PENALTY,
    LANDMARK_PENALTY,
};
use crate::profile::FaceProfile;
use crate::types::LandmarkSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDetails {
    pub descriptor_distance: f64,
    pub descriptor_similarity: u32,
    pub geometry_score: u32,
    pub biometric_score: u32,
    pub landmark_score: u32,
    pub age_difference: u32,
    pub gender_match: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub descriptor_match: bool,
    pub geometry_match: bool,
    pub biometric_match: bool,
    pub landmark_match: bool,
    pub overall_match: bool,
    /// Weighted confidence, 0-100.
    pub confidence: u32,
    pub details: ComparisonDetails,
}

impl ComparisonResult {
    /// Number of matching critical factors: descriptor, geometry and biometric.
    pub fn critical_matches(&self) -> usize {
        count_true(&[self.descriptor_match, self.geometry_match, self.biometric_match])
    }
}

/// Compare two profiles under the default policy.
pub fn compare(a: &FaceProfile, b: &FaceProfile) -> Result<ComparisonResult> {
    ScoringPolicy::default().compare(a, b)
}

impl ScoringPolicy {
    /// Compare two profiles.
    ///
    /// Fails only when the descriptors have different lengths. Landmark counts are
    /// guaranteed by [`LandmarkSet`].
    pub fn compare(&self, a: &FaceProfile, b: &FaceProfile) -> Result<ComparisonResult> {
        let distance = a.descriptor.distance(&b.descriptor)?;
        let similarity = descriptor_similarity(distance);
        let descriptor_match = distance < self.thresholds.descriptor_distance;

        let geometry = geometry_score(&a.face_geometry, &b.face_geometry);
        let geometry_match = geometry > self.thresholds.geometry_score;

        let biometric = biometric_score(&a.biometric_features, &b.biometric_features);
        let biometric_match = biometric > self.thresholds.biometric_score;

        let landmark = landmark_score(&a.landmarks, &b.landmarks);
        let landmark_match = landmark > self.thresholds.landmark_score;

        let age_difference = round_score((a.age - b.age).abs());
        let gender_match = a.gender == b.gender;

        let w = &self.weights;
        let confidence = round_score(
            similarity * w.descriptor
                + f64::from(geometry) * w.geometry
                + f64::from(biometric) * w.biometric
                + f64::from(landmark) * w.landmark
                + age_score(age_difference) * w.age,
        );

        let rule = &self.decision;
        let critical_matches = count_true(&[descriptor_match, geometry_match, biometric_match]);

        let mut overall_match = critical_matches >= rule.min_critical_matches
            && confidence > rule.min_confidence
            && gender_match;
        if similarity > rule.strong_descriptor_similarity && gender_match {
            overall_match = true;
        }
        // Runs after the override on purpose: weak evidence vetoes even a strong descriptor.
        if critical_matches < rule.min_critical_matches && confidence < rule.veto_confidence {
            overall_match = false;
        }

        debug!(
            distance,
            similarity,
            geometry,
            biometric,
            landmark,
            age_difference,
            gender_match,
            critical_matches,
            confidence,
            overall_match,
            "compared face profiles"
        );

        Ok(ComparisonResult {
            descriptor_match,
            geometry_match,
            biometric_match,
            landmark_match,
            overall_match,
            confidence,
            details: ComparisonDetails {
                descriptor_distance: distance,
                descriptor_similarity: round_score(similarity),
                geometry_score: geometry,
                biometric_score: biometric,
                landmark_score: landmark,
                age_difference,
                gender_match,
            },
        })
    }
}

/// Unrounded descriptor similarity, 0-100.
pub fn descriptor_similarity(distance: f64) -> f64 {
    (100.0 - distance * DESCRIPTOR_PENALTY).max(0.0)
}

pub fn geometry_score(a: &GeometryRatios, b: &GeometryRatios) -> u32 {
    mean_similarity(&a.compared_ratios(), &b.compared_ratios(), GEOMETRY_PENALTY)
}

pub fn biometric_score(a: &BiometricFeatures, b: &BiometricFeatures) -> u32 {
    mean_similarity(&a.compared_features(), &b.compared_features(), BIOMETRIC_PENALTY)
}

/// Mean per-point similarity over the alignment points, using raw pixel distances.
pub fn landmark_score(a: &LandmarkSet, b: &LandmarkSet) -> u32 {
    let total: f64 = ALIGNMENT_POINTS
        .iter()
        .map(|&l| (100.0 - a[l].distance(&b[l]) * LANDMARK_PENALTY).max(0.0))
        .sum();
    round_score(total / ALIGNMENT_POINTS.len() as f64)
}

pub fn age_score(age_difference: u32) -> f64 {
    (100.0 - f64::from(age_difference) * AGE_PENALTY).max(0.0)
}

fn mean_similarity(a: &[f64], b: &[f64], penalty: f64) -> u32 {
    let total: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (100.0 - (x - y).abs() * penalty).max(0.0))
        .sum();
    round_score(total / a.len() as f64)
}

fn round_score(v: f64) -> u32 {
    v.round() as u32
}

fn count_true(flags: &[bool]) -> usize {
    flags.iter().filter(|&&f| f).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_similarity_clamps_at_zero() {
        assert_eq!(descriptor_similarity(0.0), 100.0);
        assert_eq!(descriptor_similarity(0.25), 75.0);
        assert_eq!(descriptor_similarity(1.0), 0.0);
        assert_eq!(descriptor_similarity(3.5), 0.0);
    }

    #[test]
    fn age_score_drops_ten_per_year() {
        assert_eq!(age_score(0), 100.0);
        assert_eq!(age_score(3), 70.0);
        assert_eq!(age_score(10), 0.0);
        assert_eq!(age_score(40), 0.0);
    }

    #[test]
    fn mean_similarity_averages_clamped_terms() {
        // One term clamps to 0, the other loses 50 points.
        let score = mean_similarity(&[0.0, 0.0], &[1.0, 0.1], GEOMETRY_PENALTY);
        assert_eq!(score, 25);
    }

    #[test]
    fn rounding_is_half_up_for_scores() {
        assert_eq!(round_score(84.5), 85);
        assert_eq!(round_score(84.49), 84);
        assert_eq!(round_score(0.0), 0);
    }
}
