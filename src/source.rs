//! Transport locators of the form `serial@<device>[:<baud>]`.
//!
//! The baud rate may be given as a number or as the name of a mote platform,
//! e.g. `serial@/dev/ttyUSB0:telosb`.

use std::fmt;
use std::str::FromStr;

use crate::config::{DEFAULT_BAUD_RATE, DEFAULT_DEVICE};
use crate::error::GatewayError;

const SERIAL_PREFIX: &str = "serial@";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    device: String,
    baud_rate: u32,
}

impl Source {
    pub fn new(device: impl Into<String>, baud_rate: u32) -> Self {
        Source {
            device: device.into(),
            baud_rate,
        }
    }

    /// First serial port present on this machine, or [`DEFAULT_DEVICE`].
    pub fn local() -> Self {
        let device = match serialport::available_ports() {
            Ok(ports) if !ports.is_empty() => ports[0].port_name.clone(),
            Ok(_) => DEFAULT_DEVICE.to_string(),
            Err(e) => {
                log::warn!("Could not enumerate serial ports: {}", e);
                DEFAULT_DEVICE.to_string()
            }
        };
        Source::new(device, DEFAULT_BAUD_RATE)
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::new(DEFAULT_DEVICE, DEFAULT_BAUD_RATE)
    }
}

fn platform_baud_rate(name: &str) -> Option<u32> {
    match name {
        "telos" | "telosb" | "tmote" | "epic" | "eyesIFX" | "intelmote2" | "shimmer" => {
            Some(115200)
        }
        "mica" | "mica2" | "micaz" | "iris" | "mica2dot" => Some(57600),
        _ => None,
    }
}

impl FromStr for Source {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| GatewayError::InvalidSource {
            locator: s.to_string(),
            reason: reason.to_string(),
        };

        let rest = s
            .strip_prefix(SERIAL_PREFIX)
            .ok_or_else(|| invalid("only serial@<device>[:<baud>] sources are supported"))?;

        let (device, baud_rate) = match rest.rsplit_once(':') {
            Some((device, baud)) => {
                let baud_rate = baud
                    .parse::<u32>()
                    .ok()
                    .or_else(|| platform_baud_rate(baud))
                    .ok_or_else(|| invalid("unknown baud rate or platform"))?;
                (device, baud_rate)
            }
            None => (rest, DEFAULT_BAUD_RATE),
        };

        if device.is_empty() {
            return Err(invalid("missing device"));
        }
        Ok(Source::new(device, baud_rate))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{}", SERIAL_PREFIX, self.device, self.baud_rate)
    }
}
