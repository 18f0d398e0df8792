use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use crate::config::SenderConfig;
use crate::gateway::{Gateway, MessageListener};
use crate::message::TestMessage;

/// Sends the same test packet to one address at a fixed cadence.
pub struct Sender {
    address: u16,
    period: Duration,
}

impl Sender {
    pub fn new(config: &SenderConfig) -> Self {
        Sender {
            address: config.address,
            period: config.period,
        }
    }

    /// Sends until the gateway fails, then returns how many packets went out.
    ///
    /// The console counter increments per packet; the payload itself stays fixed.
    pub async fn run<W: Write>(&self, gateway: &Gateway, out: &mut W) -> io::Result<u64> {
        let payload = TestMessage::default();
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut counter: u64 = 0;
        loop {
            ticker.tick().await;
            writeln!(out, "Sending packet {}", counter)?;
            out.flush()?;
            if let Err(e) = gateway.send(self.address, &payload).await {
                log::error!("Exception thrown when sending packets. Exiting.");
                log::error!("{}", e);
                return Ok(counter);
            }
            counter += 1;
        }
    }
}

/// Logs every test packet echoed back by the mote.
#[derive(Debug, Default)]
pub struct ReceptionLogger {
    received: AtomicU64,
}

impl ReceptionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packets seen so far
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}

impl MessageListener<TestMessage> for ReceptionLogger {
    fn message_received(&self, _to: u16, message: TestMessage) {
        self.received.fetch_add(1, Ordering::Relaxed);
        log::info!("Received packet sequence number {}", message.counter);
    }
}
