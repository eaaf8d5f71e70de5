//! Core types for the envelope layer.
//!
//! This module provides foundational types used throughout the crate:
//! - **IDs**: Strongly-typed identifiers (EventId, DistinctId)
//! - **Errors**: Fault taxonomy with thiserror derives
//! - **Config**: Limits and observability configuration

mod config;
mod errors;
mod ids;

pub use config::{Config, Limits, ObservabilityConfig};
pub use errors::{DataLoadError, Error, Result};
pub use ids::{DistinctId, EventId};
