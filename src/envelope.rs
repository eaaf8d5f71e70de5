//! Envelope assembly.
//!
//! An envelope is an insertion-ordered batch of items plus a header carrying
//! the correlation id, when the primary payload defines one. Assembly is
//! pure: attachment problems surface later, when the transport reads each
//! item's payload.

use serde::Serialize;

use crate::attachment::Attachment;
use crate::item::EnvelopeItem;
use crate::protocol::{Event, Session, UserFeedback};
use crate::serializer::Serializer;
use crate::types::{EventId, Result};

/// Envelope-level header.
#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeHeader {
    /// Correlation id linking the envelope to its primary event, when the
    /// payload kind defines one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
}

/// The primary payload an envelope is built around.
#[derive(Debug, Clone)]
pub enum EnvelopePayload {
    Event(Event),
    Session(Session),
    UserFeedback(UserFeedback),
}

impl EnvelopePayload {
    /// Correlation id, for payload kinds that define one.
    fn event_id(&self) -> Option<EventId> {
        match self {
            Self::Event(event) => Some(event.event_id),
            Self::UserFeedback(feedback) => Some(feedback.event_id),
            Self::Session(_) => None,
        }
    }
}

/// Ordered batch of heterogeneous telemetry items sent as one transport unit.
///
/// The envelope exclusively owns its items; items are never shared across
/// envelopes.
#[derive(Debug)]
pub struct Envelope {
    header: EnvelopeHeader,
    items: Vec<EnvelopeItem>,
}

impl Envelope {
    /// Envelope from pre-built items.
    pub fn new(header: EnvelopeHeader, items: Vec<EnvelopeItem>) -> Self {
        Self { header, items }
    }

    /// Build an envelope from a primary payload plus zero or more
    /// attachments, preserving caller-supplied attachment order.
    ///
    /// Fails only if the serializer rejects the payload; attachments cannot
    /// fail assembly.
    pub fn from<S: Serializer>(
        serializer: &S,
        payload: EnvelopePayload,
        attachments: Vec<Attachment>,
    ) -> Result<Self> {
        let header = EnvelopeHeader {
            event_id: payload.event_id(),
        };

        let primary = match &payload {
            EnvelopePayload::Event(event) => EnvelopeItem::from_event(serializer, event)?,
            EnvelopePayload::Session(session) => EnvelopeItem::from_session(serializer, session)?,
            EnvelopePayload::UserFeedback(feedback) => {
                EnvelopeItem::from_user_feedback(serializer, feedback)?
            }
        };

        let mut items = Vec::with_capacity(1 + attachments.len());
        items.push(primary);
        items.extend(attachments.into_iter().map(EnvelopeItem::from_attachment));

        Ok(Self { header, items })
    }

    pub fn header(&self) -> &EnvelopeHeader {
        &self.header
    }

    pub fn items(&self) -> &[EnvelopeItem] {
        &self.items
    }
}
