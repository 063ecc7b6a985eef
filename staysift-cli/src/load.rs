//! Listing input and JSON output shared by every command.

use std::io::Write;

use camino::Utf8Path;
use serde::Serialize;
use staysift_core::{Listing, ListingRecord, listings_from_records};

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match staysift_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load and validate a JSON array of listing records.
pub(crate) fn load_listings(path: &Utf8Path) -> Result<Vec<Listing>, CliError> {
    let raw = staysift_fs::read_to_string(path).map_err(|source| CliError::ReadListings {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<ListingRecord> =
        serde_json::from_str(&raw).map_err(|source| CliError::ParseListings {
            path: path.to_path_buf(),
            source,
        })?;
    let listings = listings_from_records(records).map_err(|source| CliError::InvalidListing {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} listings from {path}", listings.len());
    Ok(listings)
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
