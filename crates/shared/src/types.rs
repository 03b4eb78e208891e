//! Common types used across tenantweb

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// Timestamp Serialization Helper
// =============================================================================

mod timestamp_format {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn serialize<S>(dt: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&s, &Rfc3339).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// ID Wrappers
// =============================================================================

/// Identifier of whoever triggered a usage event.
///
/// Either the authenticated user's id (whatever shape the session stores) or a
/// randomly generated anonymous visitor id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    /// Generate a fresh anonymous visitor id (UUID v4)
    pub fn new_anonymous() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ActorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<Uuid> for ActorId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

// =============================================================================
// Usage Events
// =============================================================================

/// A single usage event as handed to the log sink
///
/// Serializes to `{"user": ..., "type": ..., "timestamp": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub user: ActorId,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(with = "timestamp_format")]
    pub timestamp: OffsetDateTime,
}

impl LogRecord {
    pub fn new(user: ActorId, event_type: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            user,
            event_type: event_type.into(),
            timestamp,
        }
    }

    /// Build a record stamped with the current UTC time (millisecond precision)
    pub fn now(user: ActorId, event_type: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        // Browsers report milliseconds; drop the rest so records compare stably
        let timestamp = now
            .replace_millisecond(now.millisecond())
            .unwrap_or(now);
        Self::new(user, event_type, timestamp)
    }
}
