//! Serializer seam between payload values and envelope bytes.
//!
//! Item constructors do not pick an encoding themselves; they go through this
//! trait so hosts (and tests) can swap the implementation.

use bytes::Bytes;
use serde::Serialize;

use crate::types::{Error, Result};

/// Turns a payload value into the bytes carried by an envelope item.
pub trait Serializer {
    fn to_bytes<T: Serialize>(&self, value: &T) -> Result<Bytes>;
}

/// Default serializer: compact JSON via serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn to_bytes<T: Serialize>(&self, value: &T) -> Result<Bytes> {
        let vec = serde_json::to_vec(value).map_err(Error::Serialization)?;
        Ok(Bytes::from(vec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Probe {
        name: &'static str,
        count: u32,
    }

    #[test]
    fn json_serializer_produces_compact_json() {
        let bytes = JsonSerializer
            .to_bytes(&Probe {
                name: "probe",
                count: 3,
            })
            .unwrap();
        assert_eq!(&bytes[..], br#"{"name":"probe","count":3}"#);
    }
}
