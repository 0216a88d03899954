//! Types for the document store client

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A value materialized by the store at write time.
///
/// Serialized as the store's sentinel object (`{".sv": "timestamp"}`); the
/// store replaces it with the commit-time value, so timestamps are never
/// produced by this component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerValue {
    /// Replaced with the store's commit timestamp
    Timestamp,
}

impl Serialize for ServerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ServerValue::Timestamp => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(".sv", "timestamp")?;
                map.end()
            }
        }
    }
}
