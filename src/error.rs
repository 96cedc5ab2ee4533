use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("expected {expected} landmarks, found {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("descriptor length mismatch: {left} vs {right}")]
    DescriptorLength { left: usize, right: usize },

    #[error("descriptor is empty")]
    EmptyDescriptor,

    #[error("detection score {score:.3} is below the minimum of {minimum:.3}; reposition or relight and capture again")]
    LowConfidenceCapture { score: f64, minimum: f64 },

    #[error("no face detected")]
    NoFaceDetected,

    #[error("face extraction failed: {0}")]
    Extraction(String),

    #[error("degenerate landmark geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("invalid encoded data: {0}")]
    Decode(String),

    #[error("invalid scoring policy: {0}")]
    InvalidPolicy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template serialization error: {0}")]
    Template(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Malformed input shapes. These are programming or data errors, never recovered locally.
    pub fn is_input_shape(&self) -> bool {
        matches!(
            self,
            Error::LandmarkCount { .. } | Error::DescriptorLength { .. } | Error::EmptyDescriptor
        )
    }

    /// Capture-side failures where the caller should ask the user to try again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::LowConfidenceCapture { .. } | Error::NoFaceDetected | Error::Extraction(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(Error::LandmarkCount { expected: 68, actual: 5 }.is_input_shape());
        assert!(Error::DescriptorLength { left: 128, right: 64 }.is_input_shape());
        assert!(!Error::NoFaceDetected.is_input_shape());

        assert!(Error::LowConfidenceCapture { score: 0.5, minimum: 0.8 }.is_retryable());
        assert!(!Error::Decode("bad".into()).is_retryable());
    }

    #[test]
    fn decode_message_is_distinguishable() {
        let msg = Error::Decode("truncated".into()).to_string();
        assert!(msg.starts_with("invalid encoded data"));
    }
}
