//! Profile serialization.
//!
//! Two forms are supported:
//! - an opaque, text-safe string (base64 over canonical JSON) for key-value stores
//!   and request bodies,
//! - a compact binary template file (bincode) for on-disk enrollment.
//!
//! Both round-trip every field bit-exactly, and both re-check the profile
//! invariants while reading.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};
use crate::profile::FaceProfile;

impl FaceProfile {
    /// Serialize to an opaque string. Inverse of [`FaceProfile::decode`].
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Parse a string produced by [`FaceProfile::encode`].
    ///
    /// Malformed or truncated input fails with [`Error::Decode`]; a partial
    /// profile is never returned.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::Decode(e.to_string()))?;
        let json = std::str::from_utf8(&bytes).map_err(|e| Error::Decode(e.to_string()))?;
        let profile: Self =
            serde_json::from_str(json).map_err(|e| Error::Decode(e.to_string()))?;
        profile.validated()
    }

    /// Load a binary template file.
    ///
    /// A template that breaks a profile invariant fails with [`Error::Decode`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let profile: Self = bincode::deserialize(&bytes)?;
        profile.validated()
    }

    /// Save as a binary template file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let bytes = bincode::serialize(self)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// A profile read back from storage that breaks an invariant is corrupt data,
    /// not a capture problem.
    fn validated(self) -> Result<Self> {
        self.validate().map_err(|e| Error::Decode(e.to_string()))?;
        Ok(self)
    }
}
