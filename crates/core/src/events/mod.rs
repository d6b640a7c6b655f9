//! Session event types and sinks.

mod session_event;
mod sink;

pub use session_event::SessionEvent;
pub use sink::{MockSessionEventSink, NoOpSessionEventSink, SessionEventSink};
