//! Byte materialization for attachment sources.
//!
//! Loading is lazy, re-entrant, and non-caching: every call re-resolves the
//! source, so a file modified between calls yields fresh bytes. All
//! filesystem and access-control faults are translated into the
//! [`DataLoadError`] taxonomy; a generic I/O error never escapes this module.

use bytes::Bytes;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

use crate::attachment::{AttachmentSource, SourceKind};
use crate::types::DataLoadError;

/// Process-wide predicate consulted before any attachment file read.
///
/// Installed and cleared explicitly by the host; the loader only ever reads
/// it. Its presence or absence does not change the construction contract of
/// envelope items.
pub trait ReadGuard: Send + Sync {
    /// Whether the current process may read the file at `path`.
    fn can_read(&self, path: &Path) -> bool;
}

static READ_GUARD: RwLock<Option<Arc<dyn ReadGuard>>> = RwLock::new(None);

/// Install the process-wide read guard, replacing any previous one.
pub fn install_read_guard(guard: Arc<dyn ReadGuard>) {
    let mut slot = match READ_GUARD.write() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    };
    *slot = Some(guard);
}

/// Remove the process-wide read guard.
pub fn clear_read_guard() {
    let mut slot = match READ_GUARD.write() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    };
    *slot = None;
}

fn read_guard() -> Option<Arc<dyn ReadGuard>> {
    let slot = match READ_GUARD.read() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    };
    slot.clone()
}

/// Reads an [`AttachmentSource`] into bytes on demand.
#[derive(Debug)]
pub struct ByteLoader;

impl ByteLoader {
    /// Materialize the source's bytes.
    ///
    /// `filename` is the attachment's declared name, used for diagnostics
    /// when the source is empty. Buffer-backed sources return their bytes
    /// verbatim (cheap reference-counted clone); path-backed sources are
    /// re-read from disk on every call.
    pub fn load(source: &AttachmentSource, filename: &str) -> Result<Bytes, DataLoadError> {
        match source.kind() {
            Some(SourceKind::Bytes(bytes)) => Ok(bytes.clone()),
            Some(SourceKind::Path(path)) => {
                let result = Self::load_file(path);
                if let Err(err) = &result {
                    warn!(path = %path.display(), error = %err, "attachment load failed");
                }
                result
            }
            None => Err(DataLoadError::MissingSource {
                filename: filename.to_string(),
            }),
        }
    }

    /// Read a whole file, checking in order: existence, regular-file,
    /// readability, read-guard veto.
    fn load_file(path: &Path) -> Result<Bytes, DataLoadError> {
        // (a) existence — metadata follows symlinks, so a symlink to a
        // regular file passes and a dangling one reports NotFound.
        let metadata = fs::metadata(path).map_err(|err| Self::map_open_error(err, path))?;

        // (b) regular file only; directories and devices are rejected
        if !metadata.is_file() {
            return Err(DataLoadError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        // (c) readability — opening performs the filesystem permission check
        let mut file = fs::File::open(path).map_err(|err| Self::map_open_error(err, path))?;

        // (d) read-guard veto, independent of filesystem permissions
        if let Some(guard) = read_guard() {
            if !guard.can_read(path) {
                return Err(DataLoadError::AccessControlDenied {
                    path: path.to_path_buf(),
                });
            }
        }

        let mut buf = Vec::with_capacity(metadata.len() as usize);
        file.read_to_end(&mut buf)
            .map_err(|err| Self::map_open_error(err, path))?;

        debug!(path = %path.display(), bytes = buf.len(), "attachment loaded");
        Ok(Bytes::from(buf))
    }

    fn map_open_error(err: std::io::Error, path: &Path) -> DataLoadError {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => DataLoadError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => DataLoadError::NotFound {
                path: path.to_path_buf(),
            },
        }
    }
}
