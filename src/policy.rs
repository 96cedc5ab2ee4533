//! Scoring weights, match thresholds and the decision rule.
//!
//! [`ScoringPolicy::default`] is the production policy. Custom policies can be
//! loaded from JSON; any field left out keeps its default.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Similarity points lost per unit of descriptor distance.
pub const DESCRIPTOR_PENALTY: f64 = 100.0;
/// Similarity points lost per unit of geometry ratio difference.
pub const GEOMETRY_PENALTY: f64 = 500.0;
/// Similarity points lost per unit of biometric feature difference.
pub const BIOMETRIC_PENALTY: f64 = 200.0;
/// Similarity points lost per pixel of landmark displacement.
pub const LANDMARK_PENALTY: f64 = 1.0;
/// Score points lost per year of age difference.
pub const AGE_PENALTY: f64 = 10.0;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Contribution of each factor to the overall confidence. Sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Weights {
    pub descriptor: f64,
    pub geometry: f64,
    pub biometric: f64,
    pub landmark: f64,
    pub age: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            descriptor: 0.40,
            geometry: 0.25,
            biometric: 0.20,
            landmark: 0.10,
            age: 0.05,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.descriptor + self.geometry + self.biometric + self.landmark + self.age
    }

    fn as_array(&self) -> [f64; 5] {
        [
            self.descriptor,
            self.geometry,
            self.biometric,
            self.landmark,
            self.age,
        ]
    }
}

/// Per-factor match thresholds. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thresholds {
    /// Descriptors match when their distance is below this.
    pub descriptor_distance: f64,
    /// Geometry matches when its score is above this.
    pub geometry_score: u32,
    pub biometric_score: u32,
    pub landmark_score: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            descriptor_distance: 0.6,
            geometry_score: 85,
            biometric_score: 80,
            landmark_score: 75,
        }
    }
}

/// Parameters of the final match decision.
///
/// Applied in order: base rule, strong-descriptor override to true, weak-evidence
/// veto to false. The veto runs last and can undo the override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecisionRule {
    /// Critical matches (descriptor, geometry, biometric) needed by the base rule.
    pub min_critical_matches: usize,
    /// Base rule requires confidence above this.
    pub min_confidence: u32,
    /// Descriptor similarity above this forces a match when genders agree.
    pub strong_descriptor_similarity: f64,
    /// Too few critical matches with confidence below this forces a non-match.
    pub veto_confidence: u32,
}

impl Default for DecisionRule {
    fn default() -> Self {
        Self {
            min_critical_matches: 2,
            min_confidence: 75,
            strong_descriptor_similarity: 90.0,
            veto_confidence: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringPolicy {
    pub weights: Weights,
    pub thresholds: Thresholds,
    pub decision: DecisionRule,
}

impl ScoringPolicy {
    /// Load and validate a policy from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let policy: Self = serde_json::from_reader(BufReader::new(file))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        let weights = self.weights.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::InvalidPolicy(
                "weights must be finite and non-negative".into(),
            ));
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::InvalidPolicy(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }

        let t = &self.thresholds;
        if !t.descriptor_distance.is_finite() || t.descriptor_distance <= 0.0 {
            return Err(Error::InvalidPolicy(
                "descriptor distance threshold must be positive".into(),
            ));
        }
        if t.geometry_score > 100 || t.biometric_score > 100 || t.landmark_score > 100 {
            return Err(Error::InvalidPolicy(
                "score thresholds must be within 0-100".into(),
            ));
        }

        let d = &self.decision;
        if d.min_critical_matches > 3 {
            return Err(Error::InvalidPolicy(
                "at most 3 critical matches are available".into(),
            ));
        }
        if !d.strong_descriptor_similarity.is_finite()
            || d.min_confidence > 100
            || d.veto_confidence > 100
        {
            return Err(Error::InvalidPolicy(
                "decision thresholds must be within 0-100".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_policy_is_valid() {
        let policy = ScoringPolicy::default();
        policy.validate().unwrap();
        assert!((policy.weights.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
    }

    #[test]
    fn rejects_unbalanced_weights() {
        let mut policy = ScoringPolicy::default();
        policy.weights.age = 0.5;
        assert!(matches!(policy.validate(), Err(Error::InvalidPolicy(_))));

        let mut policy = ScoringPolicy::default();
        policy.weights.age = -0.05;
        policy.weights.descriptor = 0.5;
        assert!(matches!(policy.validate(), Err(Error::InvalidPolicy(_))));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "thresholds": { "geometryScore": 90 } }"#;
        let policy: ScoringPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.thresholds.geometry_score, 90);
        assert_eq!(policy.thresholds.biometric_score, 80);
        assert_eq!(policy.weights, Weights::default());
        assert_eq!(policy.decision, DecisionRule::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "weights": {{ "descriptor": 0.5, "geometry": 0.2, "biometric": 0.15, "landmark": 0.1, "age": 0.05 }} }}"#
        )
        .unwrap();
        let policy = ScoringPolicy::load(file.path()).unwrap();
        assert_eq!(policy.weights.descriptor, 0.5);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, r#"{{ "weights": {{ "descriptor": 0.9 }} }}"#).unwrap();
        assert!(matches!(
            ScoringPolicy::load(bad.path()),
            Err(Error::InvalidPolicy(_))
        ));
    }
}
