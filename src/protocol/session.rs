//! Session snapshot payload.
//!
//! A session arrives here as a finished value; state transitions and release
//! health bookkeeping happen in the client layer above. Wire field names
//! (`sid`, `did`, `attrs`) follow the session envelope format consumers
//! already speak.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DistinctId;

/// Terminal (or current) state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Ok,
    Exited,
    Crashed,
    Abnormal,
}

/// Attributes shared by every update of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAttributes {
    pub release: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// One session snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session id.
    pub sid: Uuid,

    /// Distinct (user) id. Absent when the caller supplied an empty id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did: Option<DistinctId>,

    /// Whether this is the first snapshot of the session.
    pub init: bool,

    pub status: SessionStatus,

    /// Errors observed during the session.
    pub errors: u32,

    pub started: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,

    pub attrs: SessionAttributes,
}

impl Session {
    pub fn new(
        distinct_id: impl Into<String>,
        environment: impl Into<String>,
        release: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sid: Uuid::new_v4(),
            did: DistinctId::from_string(distinct_id.into()).ok(),
            init: true,
            status: SessionStatus::Ok,
            errors: 0,
            started: now,
            timestamp: now,
            attrs: SessionAttributes {
                release: release.into(),
                environment: Some(environment.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_defaults() {
        let session = Session::new("dis", "env", "rel");
        assert_eq!(session.did.as_ref().map(|d| d.as_str()), Some("dis"));
        assert!(session.init);
        assert_eq!(session.status, SessionStatus::Ok);
        assert_eq!(session.errors, 0);
        assert_eq!(session.attrs.release, "rel");
        assert_eq!(session.attrs.environment.as_deref(), Some("env"));
        assert_eq!(session.started, session.timestamp);
    }

    #[test]
    fn empty_distinct_id_is_dropped() {
        let session = Session::new("", "env", "rel");
        assert!(session.did.is_none());
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("did").is_none());
    }

    #[test]
    fn status_serializes_snake_case() {
        let cases = vec![
            (SessionStatus::Ok, "\"ok\""),
            (SessionStatus::Exited, "\"exited\""),
            (SessionStatus::Crashed, "\"crashed\""),
            (SessionStatus::Abnormal, "\"abnormal\""),
        ];
        for (variant, expected) in cases {
            assert_eq!(serde_json::to_string(&variant).unwrap(), expected);
            let back: SessionStatus = serde_json::from_str(expected).unwrap();
            assert_eq!(back, variant);
        }
    }

    #[test]
    fn wire_shape_uses_short_keys() {
        let session = Session::new("user-1", "prod", "1.2.3");
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("sid").is_some());
        assert_eq!(json.get("did").unwrap().as_str(), Some("user-1"));
        assert_eq!(
            json.get("attrs").unwrap().get("release").unwrap().as_str(),
            Some("1.2.3")
        );
    }
}
