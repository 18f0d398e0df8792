use std::time::Duration;

use crate::aggregate::Aggregator;
use crate::source::Source;

pub static DEFAULT_DEVICE: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 115200;
pub static READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Time between two reports of the monitor
pub static REPORT_PERIOD: Duration = Duration::from_secs(60);
/// Time between two test packets of the sender
pub static SEND_PERIOD: Duration = Duration::from_secs(1);
pub const SEND_ADDRESS: u16 = 0;

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub source: Source,
    pub report_period: Duration,
    pub aggregator: Aggregator,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            source: Source::default(),
            report_period: REPORT_PERIOD,
            aggregator: Aggregator::default(),
        }
    }
}

impl MonitorConfig {
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn with_report_period(mut self, period: Duration) -> Self {
        self.report_period = period;
        self
    }

    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }
}

#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub source: Source,
    pub period: Duration,
    pub address: u16,
}

impl Default for SenderConfig {
    fn default() -> Self {
        SenderConfig {
            source: Source::default(),
            period: SEND_PERIOD,
            address: SEND_ADDRESS,
        }
    }
}

impl SenderConfig {
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn with_address(mut self, address: u16) -> Self {
        self.address = address;
        self
    }
}
