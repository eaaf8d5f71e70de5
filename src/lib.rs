//! # Envelope Core - Telemetry Envelope Construction
//!
//! Rust implementation of the envelope layer of a telemetry client:
//! - Typed envelope items (event, session, user feedback, attachment)
//! - Lazy attachment materialization with a precise fault taxonomy
//! - Envelope assembly with insertion-ordered items
//! - Pluggable process-wide read guard for attachment access control
//!
//! ## Architecture
//!
//! Construction is synchronous and side-effect-free; the only operation that
//! may block or fail is payload materialization:
//! ```text
//!   Event / Session / UserFeedback / Attachment
//!                    │
//!                    ▼  (pure, no I/O)
//!          EnvelopeItem constructors
//!                    │
//!                    ▼
//!              Envelope::from
//!                    │
//!                    ▼  (transport calls payload(), faults surface here)
//!          ByteLoader ── read guard ── filesystem
//! ```
//!
//! A transport iterates `Envelope::items` and calls [`EnvelopeItem::payload`]
//! exactly when it is ready to stream; an unreadable attachment yields a
//! [`DataLoadError`] for that item only and never poisons the rest of the
//! envelope.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod attachment;
pub mod envelope;
pub mod item;
pub mod loader;
pub mod protocol;
pub mod serializer;
pub mod types;

// Internal utilities
pub mod observability;

pub use attachment::{Attachment, AttachmentSource, AttachmentType};
pub use envelope::{Envelope, EnvelopeHeader, EnvelopePayload};
pub use item::{EnvelopeItem, EnvelopeItemHeader, EnvelopeItemType};
pub use loader::{clear_read_guard, install_read_guard, ByteLoader, ReadGuard};
pub use protocol::{Event, Level, Session, SessionStatus, UserFeedback};
pub use serializer::{JsonSerializer, Serializer};
pub use types::{Config, DataLoadError, Error, EventId, Result};
