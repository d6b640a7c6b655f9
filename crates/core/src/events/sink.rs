//! Session event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::SessionEvent;

/// Trait for receiving session events.
///
/// The session manager emits events through this trait after successful
/// transitions. Implementations translate them into platform-specific
/// actions (re-running inventory resolution, updating UI state, etc.).
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no network calls)
/// - Implementations should queue events for async processing
/// - Failure to emit must not affect session transitions (best-effort)
pub trait SessionEventSink: Send + Sync {
    /// Emit a single session event.
    fn emit(&self, event: SessionEvent);
}

/// No-op implementation for tests or contexts that don't need events.
#[derive(Clone, Default)]
pub struct NoOpSessionEventSink;

impl SessionEventSink for NoOpSessionEventSink {
    fn emit(&self, _event: SessionEvent) {
        // Intentionally empty - events are discarded
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockSessionEventSink {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl MockSessionEventSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl SessionEventSink for MockSessionEventSink {
    fn emit(&self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_does_not_panic() {
        let sink = NoOpSessionEventSink;
        sink.emit(SessionEvent::Disconnected);
    }

    #[test]
    fn test_mock_sink_collects_events() {
        let sink = MockSessionEventSink::new();
        assert!(sink.is_empty());

        sink.emit(SessionEvent::Disconnected);
        sink.emit(SessionEvent::ChainChanged {
            chain_id: 137,
            supported: true,
        });
        assert_eq!(sink.len(), 2);

        sink.clear();
        assert!(sink.is_empty());
    }
}
