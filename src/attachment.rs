//! Attachments and their byte sources.
//!
//! An [`Attachment`] pairs declared metadata (filename, content type, kind,
//! size limit) with an [`AttachmentSource`] that says where the bytes live.
//! Construction never touches the filesystem; all reads happen later through
//! the loader.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::Limits;

/// Content type used when the caller declares none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Where an attachment's bytes come from.
///
/// Exactly one variant is populated on every publicly constructible value.
/// The empty state exists only for negative tests (via a crate-internal
/// constructor) and for defensive handling at load time; it is not reachable
/// through the public API.
#[derive(Debug, Clone)]
pub struct AttachmentSource {
    kind: Option<SourceKind>,
}

#[derive(Debug, Clone)]
pub(crate) enum SourceKind {
    Bytes(Bytes),
    Path(PathBuf),
}

impl AttachmentSource {
    /// Source backed by an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            kind: Some(SourceKind::Bytes(bytes.into())),
        }
    }

    /// Source backed by a filesystem path. The path is not checked here;
    /// a bad path surfaces as a [`crate::DataLoadError`] at read time.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: Some(SourceKind::Path(path.into())),
        }
    }

    /// Invalid empty state, reachable only from inside the crate.
    pub(crate) fn missing() -> Self {
        Self { kind: None }
    }

    pub(crate) fn kind(&self) -> Option<&SourceKind> {
        self.kind.as_ref()
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self.kind, Some(SourceKind::Bytes(_)))
    }

    /// The backing path, if this source references the filesystem.
    pub fn path(&self) -> Option<&Path> {
        match &self.kind {
            Some(SourceKind::Path(p)) => Some(p.as_path()),
            _ => None,
        }
    }
}

/// Kind of attachment, as declared by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AttachmentType {
    #[default]
    #[serde(rename = "event.attachment")]
    Attachment,
    #[serde(rename = "event.minidump")]
    Minidump,
}

/// A named binary blob to ship alongside an envelope's primary payload.
///
/// Owned by the caller until handed to an item constructor; the constructor
/// copies the declared metadata into the item header and never mutates the
/// attachment.
#[derive(Debug, Clone)]
pub struct Attachment {
    source: AttachmentSource,
    filename: String,
    content_type: String,
    attachment_type: AttachmentType,
    max_size_bytes: u64,
}

impl Attachment {
    /// Attachment backed by an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        Self::new(AttachmentSource::from_bytes(bytes), filename.into())
    }

    /// Attachment backed by a file on disk; the declared filename defaults to
    /// the path's final component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(AttachmentSource::from_path(path), filename)
    }

    /// Attachment backed by a file on disk with an explicitly declared
    /// filename (the name the transport reports, not the on-disk name).
    pub fn from_path_with_filename(
        path: impl Into<PathBuf>,
        filename: impl Into<String>,
    ) -> Self {
        Self::new(AttachmentSource::from_path(path), filename.into())
    }

    fn new(source: AttachmentSource, filename: String) -> Self {
        Self {
            source,
            filename,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            attachment_type: AttachmentType::default(),
            max_size_bytes: Limits::default().max_attachment_size_bytes,
        }
    }

    /// Attachment with no byte source at all. Test-only: the public
    /// constructors make this state unreachable.
    #[cfg(test)]
    pub(crate) fn without_source(filename: impl Into<String>) -> Self {
        Self::new(AttachmentSource::missing(), filename.into())
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_attachment_type(mut self, attachment_type: AttachmentType) -> Self {
        self.attachment_type = attachment_type;
        self
    }

    pub fn with_max_size_bytes(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    pub fn source(&self) -> &AttachmentSource {
        &self.source
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn attachment_type(&self) -> AttachmentType {
        self.attachment_type
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_populates_the_buffer_variant() {
        let attachment = Attachment::from_bytes(&b"hello"[..], "hello.txt");
        assert!(attachment.source().is_bytes());
        assert!(attachment.source().path().is_none());
        assert_eq!(attachment.filename(), "hello.txt");
        assert_eq!(attachment.content_type(), DEFAULT_CONTENT_TYPE);
        assert_eq!(attachment.attachment_type(), AttachmentType::Attachment);
    }

    #[test]
    fn from_path_derives_the_filename() {
        let attachment = Attachment::from_path("/var/log/app/crash.log");
        assert!(!attachment.source().is_bytes());
        assert_eq!(
            attachment.source().path(),
            Some(Path::new("/var/log/app/crash.log"))
        );
        assert_eq!(attachment.filename(), "crash.log");
    }

    #[test]
    fn declared_filename_wins_over_path_component() {
        let attachment = Attachment::from_path_with_filename("/tmp/xyz123", "report.json");
        assert_eq!(attachment.filename(), "report.json");
    }

    #[test]
    fn builder_overrides_apply() {
        let attachment = Attachment::from_bytes(&b"{}"[..], "meta.json")
            .with_content_type("application/json")
            .with_attachment_type(AttachmentType::Minidump)
            .with_max_size_bytes(1024);
        assert_eq!(attachment.content_type(), "application/json");
        assert_eq!(attachment.attachment_type(), AttachmentType::Minidump);
        assert_eq!(attachment.max_size_bytes(), 1024);
    }

    #[test]
    fn default_max_size_comes_from_limits() {
        let attachment = Attachment::from_bytes(&b""[..], "empty");
        assert_eq!(
            attachment.max_size_bytes(),
            Limits::default().max_attachment_size_bytes
        );
    }

    #[test]
    fn attachment_type_serde_wire_names() {
        assert_eq!(
            serde_json::to_string(&AttachmentType::Attachment).unwrap(),
            "\"event.attachment\""
        );
        assert_eq!(
            serde_json::to_string(&AttachmentType::Minidump).unwrap(),
            "\"event.minidump\""
        );
    }
}
