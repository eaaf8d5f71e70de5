//! Configuration structures.
//!
//! Loading from files or the environment is the host application's concern;
//! this crate only defines the typed shape and its defaults.

use serde::{Deserialize, Serialize};

/// Global envelope-layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Attachment limits.
    #[serde(default)]
    pub limits: Limits,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Attachment limits.
///
/// The loader itself never enforces a size cap; the limit is caller policy
/// applied before an attachment reaches the factory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Default maximum attachment size in bytes.
    pub max_attachment_size_bytes: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_attachment_size_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
