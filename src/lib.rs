//! # face-verify
//!
//! Deterministic face verification scoring in pure Rust.
//!
//! Given the output of an external face detector (a descriptor vector, 68 landmarks,
//! a detection score and demographic estimates), this crate:
//! - **Derives features**: scale-invariant geometry ratios, eye/mouth aspect ratios,
//!   eyebrow arches and head angles
//! - **Assembles profiles**: one immutable [`FaceProfile`] per accepted capture
//! - **Compares profiles**: four similarity scores, a weighted confidence and a
//!   multi-factor match decision
//! - **Serializes profiles**: an opaque text form and a binary template file
//!
//! ## Scoring Overview
//!
//! 1. Descriptor distance (Euclidean), similarity `100 - 100 * distance`
//! 2. Geometry ratio similarity, averaged over five ratios
//! 3. Biometric feature similarity, averaged over five features
//! 4. Landmark alignment over six anchor points, in raw pixels
//! 5. Age difference and gender equality
//! 6. Weighted confidence (0.40 / 0.25 / 0.20 / 0.10 / 0.05)
//! 7. Decision: base rule, then strong-descriptor override, then weak-evidence veto
//!
//! ## Quick Start
//!
//! ```rust
//! use face_verify::{compare, mean_face, BoundingBox, Detection, FaceProfile};
//!
//! let bbox = BoundingBox::new(100.0, 50.0, 200.0, 200.0);
//! let detection = Detection {
//!     descriptor: vec![0.1; 128],
//!     landmarks: mean_face(&bbox).points().to_vec(),
//!     detection_score: 0.95,
//!     age: 34.0,
//!     gender: "female".to_string(),
//!     bbox,
//! };
//!
//! let enrolled = FaceProfile::assemble(detection).unwrap();
//! let stored = enrolled.encode().unwrap();
//!
//! let restored = FaceProfile::decode(&stored).unwrap();
//! let result = compare(&enrolled, &restored).unwrap();
//! assert!(result.overall_match);
//! assert_eq!(result.confidence, 100);
//! ```

mod angles;
mod biometrics;
mod codec;
mod compare;
mod error;
mod geometry;
pub mod landmarks;
pub mod policy;
mod profile;
mod types;

pub use angles::FacialAngles;
pub use biometrics::{
    eye_aspect_ratio, eyebrow_arch, mouth_aspect_ratio, BiometricFeatures, EyebrowArch,
};
pub use compare::{
    age_score, biometric_score, compare, descriptor_similarity, geometry_score, landmark_score,
    ComparisonDetails, ComparisonResult,
};
pub use error::{Error, Result};
pub use geometry::GeometryRatios;
pub use landmarks::{mean_face, Landmark, LANDMARK_COUNT};
pub use policy::ScoringPolicy;
pub use profile::{Detection, FaceExtractor, FaceProfile, MIN_DETECTION_SCORE};
pub use types::{BoundingBox, Descriptor, LandmarkSet, Point};
