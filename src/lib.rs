//! Host side tools for motes behind a serial bridge.
//!
//! The monitor records state changes reported by the motes and prints a
//! report every minute; the sender pushes test packets to a mote.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod event_log;
pub mod frame;
pub mod gateway;
pub mod listener;
pub mod logging;
pub mod message;
pub mod record;
pub mod scheduler;
pub mod sender;
pub mod source;

pub use aggregate::{Aggregator, Summary, WatchedMote};
pub use config::{MonitorConfig, SenderConfig};
pub use error::{GatewayError, UsageError};
pub use event_log::EventLog;
pub use gateway::{Gateway, MessageListener};
pub use listener::{MonitorContext, StateListener};
pub use message::{Message, StateMessage, TestMessage};
pub use record::EventRecord;
pub use scheduler::Scheduler;
pub use sender::{ReceptionLogger, Sender};
pub use source::Source;
