// MIDI artifacts - Generated file bytes with their download metadata
// Hashing and optional persistence for hosts that keep generated files
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// MIME type of every generated file
pub const MIDI_MIME_TYPE: &str = "audio/midi";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// A finished Standard MIDI File
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MidiArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

impl MidiArtifact {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        MidiArtifact {
            bytes,
            file_name: file_name.into(),
            mime_type: MIDI_MIME_TYPE,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Hex SHA256 of the file bytes
    pub fn sha256(&self) -> String {
        calculate_sha256(&self.bytes)
    }

    /// Write the file into `dir` (created if needed) and return its path and SHA256 hash
    pub fn write_to(&self, dir: &Path) -> ArtifactResult<(PathBuf, String)> {
        fs::create_dir_all(dir)?;

        let file_path = dir.join(&self.file_name);
        let mut file = fs::File::create(&file_path)?;
        file.write_all(&self.bytes)?;

        log::debug!("Wrote {} ({} bytes)", file_path.display(), self.bytes.len());

        Ok((file_path, self.sha256()))
    }
}

/// Calculate SHA256 hash of data
pub fn calculate_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
