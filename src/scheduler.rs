//! Periodic report loop of the monitor.
//!
//! The loop waits one full period, drains the event log, prints the report
//! and goes back to waiting. The listener keeps appending while the loop
//! waits or prints; it only contends for the lock during the drain itself.

use std::io::{self, Write};
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::aggregate::{Aggregator, Summary};
use crate::listener::MonitorContext;

pub struct Scheduler {
    context: MonitorContext,
    aggregator: Aggregator,
    period: Duration,
}

impl Scheduler {
    pub fn new(context: MonitorContext, aggregator: Aggregator, period: Duration) -> Self {
        Scheduler {
            context,
            aggregator,
            period,
        }
    }

    /// Drains the log and reports what was in it.
    pub fn drain_and_report<W: Write>(&self, out: &mut W) -> io::Result<Summary> {
        let records = self.context.log.drain_all();
        log::debug!("Reporting {} events", records.len());
        self.aggregator.report(&records, out)
    }

    /// Reports once per period, forever. Only returns if writing the report fails.
    ///
    /// # Panics
    ///
    /// If the period is zero.
    pub async fn run<W: Write>(self, mut out: W) -> io::Result<()> {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.drain_and_report(&mut out)?;
        }
    }
}
