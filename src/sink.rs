//! Event sink contract between the decoder and the surrounding framework.

use crate::event::TimestampedEvent;

/// Receives decoded events and non-fatal warnings as they are produced.
///
/// The decoder streams into the sink in traversal order and never buffers
/// or reorders. Implementations own persistence, formatting and routing;
/// the decoder has no fatal error path, so a warning is the strongest
/// signal a sink will ever see.
pub trait EventSink {
    /// Accepts one decoded, timestamped event.
    fn produce_event(&mut self, event: TimestampedEvent);

    /// Accepts a non-fatal warning describing a decode fault.
    fn produce_warning(&mut self, message: String);
}

/// Sink that collects events and warnings in memory.
#[derive(Debug, Default)]
pub struct EventCollector {
    /// Collected events, in production order.
    pub events: Vec<TimestampedEvent>,

    /// Collected warnings, in production order.
    pub warnings: Vec<String>,
}

impl EventCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for EventCollector {
    fn produce_event(&mut self, event: TimestampedEvent) {
        self.events.push(event);
    }

    fn produce_warning(&mut self, message: String) {
        self.warnings.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_preserves_order() {
        let mut sink = EventCollector::new();
        sink.produce_warning("first".to_string());
        sink.produce_warning("second".to_string());

        assert_eq!(sink.warnings, vec!["first", "second"]);
        assert!(sink.events.is_empty());
    }
}
