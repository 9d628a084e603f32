//! Domain event abstractions.

use chrono::{DateTime, Utc};

/// Trait for events describing a state transition that already happened.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name, e.g. `playthrough.finished`.
    fn event_type(&self) -> &'static str;

    /// Returns when the transition took place.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;
}
