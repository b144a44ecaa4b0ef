use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use super::Layout;
use crate::error::SnapshotError;

impl Layout {
    /// Saves the layout to a file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let mut file = fs::File::create(path).map_err(|e| io_error(path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| io_error(path, e))?;
        Ok(())
    }

    /// Loads a layout snapshot from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let mut file = fs::File::open(path).map_err(|e| io_error(path, e))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| io_error(path, e))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> SnapshotError {
    SnapshotError::Io {
        path: path.display().to_string(),
        source,
    }
}
