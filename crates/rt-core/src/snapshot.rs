//! Timesheet snapshots for offline editing.
//!
//! A snapshot is the timesheet's edit document written as pretty JSON. The
//! client identity is not part of the document; it is supplied again when the
//! snapshot is loaded.
//!
//! Saving writes normalized JSON rather than the text that was read: object
//! keys come out sorted and hours are always written as decimals (`4.0`).

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{Edit, Identity, RestoreError, Timesheet};

/// Snapshot read/write errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid snapshot {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: RestoreError,
    },
}

/// Writes the timesheet's document to `path`, creating parent directories.
pub fn save(path: &Path, timesheet: &Timesheet) -> Result<(), SnapshotError> {
    let io_err = |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(timesheet.to_document()).map_err(|source| {
        SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    std::fs::write(path, json).map_err(io_err)?;

    tracing::debug!(path = %path.display(), timesheet = %timesheet.identity(), "saved snapshot");
    Ok(())
}

/// Reads the raw edit document of a snapshot.
pub fn read(path: &Path) -> Result<Edit, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a snapshot and resumes editing it on behalf of `client`.
pub fn load(path: &Path, client: Identity) -> Result<Timesheet, SnapshotError> {
    let document = read(path)?;
    let timesheet =
        Timesheet::restore(client, document).map_err(|source| SnapshotError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), timesheet = %timesheet.identity(), "loaded snapshot");
    Ok(timesheet)
}
