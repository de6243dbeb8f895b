//! Reader event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;

/// Metadata attached to every event a reading session publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for routing on the presentation side.
    pub event_type: String,
    /// Reading session this event belongs to.
    pub session_id: Uuid,
    /// Monotonically increasing position within the session.
    pub sequence_number: u64,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all session events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}

/// Stamps outgoing events with session-scoped metadata.
#[derive(Debug)]
pub struct EventStamper {
    session_id: Uuid,
    last_sequence: u64,
}

impl EventStamper {
    /// Creates a stamper for the given session.
    #[must_use]
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            last_sequence: 0,
        }
    }

    /// The session every stamped event belongs to.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Produces metadata for the next event in the session.
    pub fn stamp(&mut self, event_type: &'static str, clock: &dyn Clock) -> EventMetadata {
        self.last_sequence += 1;
        EventMetadata {
            event_id: Uuid::now_v7(),
            event_type: event_type.to_owned(),
            session_id: self.session_id,
            sequence_number: self.last_sequence,
            occurred_at: clock.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Frozen(DateTime<Utc>);

    impl Clock for Frozen {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_stamp_numbers_events_sequentially() {
        // Arrange
        let session_id = Uuid::new_v4();
        let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = Frozen(fixed_now);
        let mut stamper = EventStamper::new(session_id);

        // Act
        let first = stamper.stamp("reader.page_changed", &clock);
        let second = stamper.stamp("reader.page_completed", &clock);

        // Assert
        assert_eq!(first.sequence_number, 1);
        assert_eq!(second.sequence_number, 2);
        assert_eq!(first.session_id, session_id);
        assert_eq!(second.event_type, "reader.page_completed");
        assert_eq!(second.occurred_at, fixed_now);
        assert_ne!(first.event_id, second.event_id);
    }
}
