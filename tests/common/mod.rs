#![allow(dead_code)]

use face_verify::{mean_face, BoundingBox, Detection, FaceProfile, LandmarkSet, Point};

pub const DESCRIPTOR_LEN: usize = 128;

pub fn face_box() -> BoundingBox {
    BoundingBox::new(120.0, 90.0, 240.0, 260.0)
}

pub fn detection(descriptor: Vec<f64>, gender: &str) -> Detection {
    let bbox = face_box();
    Detection {
        descriptor,
        landmarks: mean_face(&bbox).points().to_vec(),
        detection_score: 0.96,
        age: 30.0,
        gender: gender.to_string(),
        bbox,
    }
}

/// Profile whose descriptor is all zeros except `offset` in the first component,
/// so the distance to [`base_profile`] is exactly `offset`.
pub fn profile_at_distance(offset: f64, gender: &str) -> FaceProfile {
    let mut descriptor = vec![0.0; DESCRIPTOR_LEN];
    descriptor[0] = offset;
    FaceProfile::assemble(detection(descriptor, gender)).unwrap()
}

pub fn base_profile() -> FaceProfile {
    profile_at_distance(0.0, "female")
}

/// Shift the compared geometry ratios by `delta` each.
pub fn shift_geometry(profile: &mut FaceProfile, delta: f64) {
    let g = &mut profile.face_geometry;
    g.face_aspect_ratio += delta;
    g.eye_distance_to_face_width += delta;
    g.nose_to_mouth_ratio += delta;
    g.mouth_to_face_width_ratio += delta;
    g.eye_to_nose_ratio += delta;
}

/// Shift the compared biometric features by `delta` each.
pub fn shift_biometrics(profile: &mut FaceProfile, delta: f64) {
    let f = &mut profile.biometric_features;
    f.left_eye_aspect_ratio += delta;
    f.right_eye_aspect_ratio += delta;
    f.nose_aspect_ratio += delta;
    f.mouth_aspect_ratio += delta;
    f.eye_asymmetry += delta;
}

/// Move every landmark by (dx, dy) pixels.
pub fn translate_landmarks(profile: &mut FaceProfile, dx: f64, dy: f64) {
    let moved = profile
        .landmarks
        .points()
        .iter()
        .map(|p| Point::new(p.x + dx, p.y + dy))
        .collect();
    profile.landmarks = LandmarkSet::new(moved).unwrap();
}
