//! Core event types for the alerting service
//!
//! This module defines the data structures used throughout the application
//! for representing client events and the keys their histories are bucketed
//! under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type for consistent time handling across the application
pub type Timestamp = DateTime<Utc>;

/// A discrete client event as recorded by the monitor
///
/// Immutable once recorded; the timestamp is supplied by the caller and
/// serialized as RFC 3339 on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Client the event belongs to
    pub client: String,
    /// Type of the event within the client's stream
    pub event_type: String,
    /// When the event occurred
    pub timestamp: Timestamp,
}

impl Event {
    /// Key under which this event's history is bucketed
    pub fn key(&self) -> EventKey {
        EventKey::from_parts(&self.client, &self.event_type)
    }
}

/// Composite identifier derived from client and event type
///
/// Rendered as `client + "-" + event_type`. Client and event type values
/// must not themselves contain the separator, or two distinct pairs would
/// share a history bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey(String);

impl EventKey {
    /// Derive the key for a (client, event type) pair
    pub fn from_parts(client: &str, event_type: &str) -> Self {
        Self(format!("{}-{}", client, event_type))
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
