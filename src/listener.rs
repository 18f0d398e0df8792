use std::sync::Arc;

use tokio::time::Instant;

use crate::event_log::EventLog;
use crate::gateway::MessageListener;
use crate::message::StateMessage;
use crate::record::EventRecord;

/// State shared between the listener and the report scheduler.
#[derive(Debug, Clone)]
pub struct MonitorContext {
    pub log: Arc<EventLog>,
    pub start_time: Instant,
}

impl MonitorContext {
    /// Captures the start time; record timestamps are relative to it.
    pub fn new() -> Self {
        MonitorContext {
            log: Arc::new(EventLog::new()),
            start_time: Instant::now(),
        }
    }
}

impl Default for MonitorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns every inbound [`StateMessage`] into an [`EventRecord`] in the log.
pub struct StateListener {
    context: MonitorContext,
}

impl StateListener {
    pub fn new(context: MonitorContext) -> Self {
        StateListener { context }
    }
}

impl MessageListener<StateMessage> for StateListener {
    fn message_received(&self, _to: u16, message: StateMessage) {
        let record = EventRecord::new(
            u16::from(message.id),
            u16::from(message.state),
            self.context.start_time,
        );
        log::trace!("{}", record);
        self.context.log.append(record);
    }
}
