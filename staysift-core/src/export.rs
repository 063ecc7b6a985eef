//! Export of the selected aspects to a cross-page key/value store.
//!
//! The detail view redisplays which aspects produced a score by reading the
//! list back. The engine only writes it; filtering never reads the store.

use std::collections::HashMap;

use thiserror::Error;

use crate::SelectionState;

/// Key the aspect list is stored under.
pub const SELECTED_ASPECTS_KEY: &str = "selectedAspects";

/// Errors raised while exporting or reading back the aspect list.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Encoding the aspect list as JSON failed.
    #[error("failed to encode selected aspects")]
    Encode {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The stored value under `key` is not a JSON list of strings.
    #[error("value stored under `{key}` is not a list of aspect names")]
    Decode {
        /// Key whose value failed to decode.
        key: String,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The backing store could not be read or written.
    #[error("aspect store at {path} is unavailable")]
    Io {
        /// Location of the backing store.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// A store holding the exported aspect list.
///
/// Writes replace any previous list; the order of `aspects` is preserved.
pub trait AspectStore {
    /// Persist `aspects` under [`SELECTED_ASPECTS_KEY`].
    ///
    /// # Errors
    /// Returns [`ExportError`] when encoding or the backing store fails.
    fn write_selected_aspects(&mut self, aspects: &[String]) -> Result<(), ExportError>;

    /// Read the list back. An absent entry yields an empty list.
    ///
    /// # Errors
    /// Returns [`ExportError`] when the stored value is malformed or the
    /// backing store fails.
    fn read_selected_aspects(&self) -> Result<Vec<String>, ExportError>;
}

/// Encode an aspect list the way stores persist it.
///
/// # Errors
/// Returns [`ExportError::Encode`] if serialisation fails.
pub fn encode_aspects(aspects: &[String]) -> Result<String, ExportError> {
    serde_json::to_string(aspects).map_err(|source| ExportError::Encode { source })
}

/// Decode a stored aspect list.
///
/// # Errors
/// Returns [`ExportError::Decode`] when `raw` is not a JSON list of strings.
pub fn decode_aspects(raw: &str) -> Result<Vec<String>, ExportError> {
    serde_json::from_str(raw).map_err(|source| ExportError::Decode {
        key: SELECTED_ASPECTS_KEY.to_owned(),
        source,
    })
}

/// Export the aspects selected in `state` to `store`.
///
/// # Errors
/// Propagates failures from the store.
///
/// # Examples
/// ```
/// use staysift_core::{AspectStore, MemoryAspectStore, SelectionState, export_selected_aspects};
///
/// # fn main() -> Result<(), staysift_core::ExportError> {
/// let state = SelectionState::new()
///     .with_aspect("service")
///     .with_aspect("cleanliness");
/// let mut store = MemoryAspectStore::default();
/// export_selected_aspects(&state, &mut store)?;
///
/// assert_eq!(
///     store.raw_selected_aspects(),
///     Some(r#"["service","cleanliness"]"#)
/// );
/// assert_eq!(store.read_selected_aspects()?, ["service", "cleanliness"]);
/// # Ok(())
/// # }
/// ```
pub fn export_selected_aspects<S>(state: &SelectionState, store: &mut S) -> Result<(), ExportError>
where
    S: AspectStore + ?Sized,
{
    store.write_selected_aspects(state.aspects())?;
    log::debug!("exported {} selected aspects", state.aspects().len());
    Ok(())
}

/// In-memory [`AspectStore`] holding JSON-encoded values by key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryAspectStore {
    entries: HashMap<String, String>,
}

impl MemoryAspectStore {
    /// The raw JSON stored under [`SELECTED_ASPECTS_KEY`], if any.
    #[must_use]
    pub fn raw_selected_aspects(&self) -> Option<&str> {
        self.entries.get(SELECTED_ASPECTS_KEY).map(String::as_str)
    }
}

impl AspectStore for MemoryAspectStore {
    fn write_selected_aspects(&mut self, aspects: &[String]) -> Result<(), ExportError> {
        let payload = encode_aspects(aspects)?;
        self.entries.insert(SELECTED_ASPECTS_KEY.to_owned(), payload);
        Ok(())
    }

    fn read_selected_aspects(&self) -> Result<Vec<String>, ExportError> {
        self.raw_selected_aspects()
            .map_or_else(|| Ok(Vec::new()), decode_aspects)
    }
}
