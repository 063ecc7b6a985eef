//! File-backed aspect store.
//!
//! The file holds a JSON object mapping keys to JSON values, so other
//! entries written by neighbouring tools survive an export.

use std::io;

use camino::Utf8PathBuf;
use serde_json::{Map, Value};
use staysift_core::{AspectStore, ExportError, SELECTED_ASPECTS_KEY};

/// [`AspectStore`] persisted as a JSON object on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JsonFileAspectStore {
    path: Utf8PathBuf,
}

impl JsonFileAspectStore {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> ExportError {
        ExportError::Io {
            path: self.path.to_string(),
            source,
        }
    }

    fn read_entries(&self) -> Result<Map<String, Value>, ExportError> {
        let Some(raw) = staysift_fs::read_optional(&self.path).map_err(|e| self.io_error(e))?
        else {
            return Ok(Map::new());
        };
        serde_json::from_str(&raw).map_err(|e| self.io_error(io::Error::from(e)))
    }
}

impl AspectStore for JsonFileAspectStore {
    fn write_selected_aspects(&mut self, aspects: &[String]) -> Result<(), ExportError> {
        let mut entries = self.read_entries()?;
        let value =
            serde_json::to_value(aspects).map_err(|source| ExportError::Encode { source })?;
        entries.insert(SELECTED_ASPECTS_KEY.to_owned(), value);
        let payload = serde_json::to_string_pretty(&entries)
            .map_err(|source| ExportError::Encode { source })?;
        staysift_fs::write_replacing(&self.path, &payload).map_err(|e| self.io_error(e))
    }

    fn read_selected_aspects(&self) -> Result<Vec<String>, ExportError> {
        let mut entries = self.read_entries()?;
        let Some(value) = entries.remove(SELECTED_ASPECTS_KEY) else {
            return Ok(Vec::new());
        };
        serde_json::from_value(value).map_err(|source| ExportError::Decode {
            key: SELECTED_ASPECTS_KEY.to_owned(),
            source,
        })
    }
}
