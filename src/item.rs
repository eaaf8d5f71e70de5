//! Envelope items: header metadata plus a payload byte producer.
//!
//! Construction is pure for every payload kind. JSON payloads (event,
//! session, user feedback) are serialized eagerly because serialization has
//! no fallible I/O; attachments stay lazy so that an unreadable file cannot
//! fail anything before the transport actually asks for the bytes.

use bytes::Bytes;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer as SerdeSerializer};
use std::sync::OnceLock;

use crate::attachment::Attachment;
use crate::loader::ByteLoader;
use crate::protocol::{Event, Session, UserFeedback};
use crate::serializer::Serializer;
use crate::types::{DataLoadError, Result};

/// Content type of JSON-encoded payload items.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Kind of payload an envelope item carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeItemType {
    Event,
    Session,
    #[serde(rename = "user_report")]
    UserFeedback,
    Attachment,
}

/// Item metadata.
///
/// The declared fields (type, content type, file name) are fixed at
/// construction and never fail. `length` is known only after the first
/// successful payload read and is frozen from then on.
#[derive(Debug)]
pub struct EnvelopeItemHeader {
    item_type: EnvelopeItemType,
    content_type: String,
    file_name: Option<String>,
    length: OnceLock<u64>,
}

impl EnvelopeItemHeader {
    fn new(
        item_type: EnvelopeItemType,
        content_type: impl Into<String>,
        file_name: Option<String>,
    ) -> Self {
        Self {
            item_type,
            content_type: content_type.into(),
            file_name,
            length: OnceLock::new(),
        }
    }

    pub fn item_type(&self) -> EnvelopeItemType {
        self.item_type
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Payload byte count, absent until the first successful read.
    pub fn length(&self) -> Option<u64> {
        self.length.get().copied()
    }
}

impl Serialize for EnvelopeItemHeader {
    fn serialize<S: SerdeSerializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut fields = 2;
        if self.length().is_some() {
            fields += 1;
        }
        if self.file_name.is_some() {
            fields += 1;
        }
        let mut state = serializer.serialize_struct("EnvelopeItemHeader", fields)?;
        state.serialize_field("type", &self.item_type)?;
        if let Some(length) = self.length() {
            state.serialize_field("length", &length)?;
        }
        state.serialize_field("content_type", &self.content_type)?;
        if let Some(file_name) = &self.file_name {
            state.serialize_field("filename", file_name)?;
        }
        state.end()
    }
}

#[derive(Debug)]
enum DataProducer {
    /// Bytes already materialized at construction (JSON payloads).
    Eager(Bytes),
    /// Bytes resolved from the attachment source on every read.
    Lazy(Attachment),
}

/// One typed payload inside an envelope.
#[derive(Debug)]
pub struct EnvelopeItem {
    header: EnvelopeItemHeader,
    producer: DataProducer,
}

impl EnvelopeItem {
    /// Item carrying a structured event, serialized eagerly.
    pub fn from_event<S: Serializer>(serializer: &S, event: &Event) -> Result<Self> {
        let bytes = serializer.to_bytes(event)?;
        Ok(Self::eager(EnvelopeItemType::Event, bytes))
    }

    /// Item carrying a session snapshot, serialized eagerly.
    ///
    /// Sessions are small and their serialization has no fallible I/O, so
    /// there is nothing to defer.
    pub fn from_session<S: Serializer>(serializer: &S, session: &Session) -> Result<Self> {
        let bytes = serializer.to_bytes(session)?;
        Ok(Self::eager(EnvelopeItemType::Session, bytes))
    }

    /// Item carrying user feedback, serialized eagerly.
    pub fn from_user_feedback<S: Serializer>(serializer: &S, feedback: &UserFeedback) -> Result<Self> {
        let bytes = serializer.to_bytes(feedback)?;
        Ok(Self::eager(EnvelopeItemType::UserFeedback, bytes))
    }

    /// Item carrying an attachment.
    ///
    /// Never touches the filesystem: the header takes the attachment's
    /// declared content type and filename, and the bytes are loaded only
    /// when [`payload`](Self::payload) is called.
    pub fn from_attachment(attachment: Attachment) -> Self {
        let header = EnvelopeItemHeader::new(
            EnvelopeItemType::Attachment,
            attachment.content_type(),
            Some(attachment.filename().to_string()),
        );
        Self {
            header,
            producer: DataProducer::Lazy(attachment),
        }
    }

    fn eager(item_type: EnvelopeItemType, bytes: Bytes) -> Self {
        let header = EnvelopeItemHeader::new(item_type, JSON_CONTENT_TYPE, None);
        // Bytes are in hand, so the length is known immediately.
        let _ = header.length.set(bytes.len() as u64);
        Self {
            header,
            producer: DataProducer::Eager(bytes),
        }
    }

    pub fn header(&self) -> &EnvelopeItemHeader {
        &self.header
    }

    /// Materialize the payload bytes.
    ///
    /// Idempotent and re-entrant: attachment sources are re-resolved on
    /// every call with no hidden cache, so a file modified between calls
    /// yields fresh bytes. The header length freezes at the first
    /// successful read; a failed read leaves it unset.
    pub fn payload(&self) -> std::result::Result<Bytes, DataLoadError> {
        let bytes = match &self.producer {
            DataProducer::Eager(bytes) => bytes.clone(),
            DataProducer::Lazy(attachment) => {
                ByteLoader::load(attachment.source(), attachment.filename())?
            }
        };
        let _ = self.header.length.set(bytes.len() as u64);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::JsonSerializer;
    use pretty_assertions::assert_eq;

    #[test]
    fn item_type_wire_names() {
        let cases = vec![
            (EnvelopeItemType::Event, "\"event\""),
            (EnvelopeItemType::Session, "\"session\""),
            (EnvelopeItemType::UserFeedback, "\"user_report\""),
            (EnvelopeItemType::Attachment, "\"attachment\""),
        ];
        for (variant, expected) in cases {
            assert_eq!(serde_json::to_string(&variant).unwrap(), expected);
        }
    }

    #[test]
    fn attachment_item_takes_declared_metadata() {
        let attachment = Attachment::from_bytes(&b"hello"[..], "hello.txt");
        let item = EnvelopeItem::from_attachment(attachment);

        assert_eq!(item.header().item_type(), EnvelopeItemType::Attachment);
        assert_eq!(item.header().content_type(), "application/octet-stream");
        assert_eq!(item.header().file_name(), Some("hello.txt"));
        assert_eq!(&item.payload().unwrap()[..], b"hello");
    }

    #[test]
    fn constructing_from_unreadable_attachment_never_fails() {
        let attachment = Attachment::from_path("nowhere/to/be/found.txt");
        // Construction must stay infallible; only the read fails.
        let item = EnvelopeItem::from_attachment(attachment);
        assert!(item.header().length().is_none());

        let err = item.payload().unwrap_err();
        assert!(matches!(err, DataLoadError::NotFound { .. }));
        // Length stays unset after a failed read.
        assert!(item.header().length().is_none());
    }

    #[test]
    fn missing_source_surfaces_at_read_time_only() {
        let attachment = Attachment::without_source("phantom.bin");
        let item = EnvelopeItem::from_attachment(attachment);

        let err = item.payload().unwrap_err();
        match err {
            DataLoadError::MissingSource { filename } => assert_eq!(filename, "phantom.bin"),
            other => panic!("expected MissingSource, got {other:?}"),
        }
    }

    #[test]
    fn length_freezes_at_first_successful_read() {
        let attachment = Attachment::from_bytes(vec![7u8; 1234], "blob.bin");
        let item = EnvelopeItem::from_attachment(attachment);
        assert!(item.header().length().is_none());

        item.payload().unwrap();
        assert_eq!(item.header().length(), Some(1234));

        // Repeated reads agree with the frozen length.
        assert_eq!(item.payload().unwrap().len() as u64, 1234);
        assert_eq!(item.header().length(), Some(1234));
    }

    #[test]
    fn session_item_contract() {
        let session = crate::protocol::Session::new("dis", "env", "rel");
        let item = EnvelopeItem::from_session(&JsonSerializer, &session).unwrap();

        assert_eq!(item.header().item_type(), EnvelopeItemType::Session);
        assert_eq!(item.header().content_type(), "application/json");
        assert_eq!(item.header().file_name(), None);
        assert!(item.header().length().is_some());

        let bytes = item.payload().unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(item.header().length(), Some(bytes.len() as u64));
    }

    #[test]
    fn header_serializes_logical_field_names() {
        let attachment = Attachment::from_bytes(&b"abc"[..], "a.txt");
        let item = EnvelopeItem::from_attachment(attachment);
        item.payload().unwrap();

        let json = serde_json::to_value(item.header()).unwrap();
        assert_eq!(json.get("type").unwrap().as_str(), Some("attachment"));
        assert_eq!(json.get("length").unwrap().as_u64(), Some(3));
        assert_eq!(
            json.get("content_type").unwrap().as_str(),
            Some("application/octet-stream")
        );
        assert_eq!(json.get("filename").unwrap().as_str(), Some("a.txt"));
    }

    #[test]
    fn header_omits_length_before_first_read() {
        let attachment = Attachment::from_bytes(&b"abc"[..], "a.txt");
        let item = EnvelopeItem::from_attachment(attachment);

        let json = serde_json::to_value(item.header()).unwrap();
        assert!(json.get("length").is_none());
    }
}
