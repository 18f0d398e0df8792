use std::io::{self, Write};

use crate::record::EventRecord;

/// A mote whose "on" transitions are counted in every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedMote {
    pub identifier: u16,
    pub name: String,
}

impl WatchedMote {
    pub fn new(identifier: u16, name: impl Into<String>) -> Self {
        WatchedMote {
            identifier,
            name: name.into(),
        }
    }
}

/// Threshold crossing counts of one report cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub primary: usize,
    pub secondary: usize,
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    primary: WatchedMote,
    secondary: WatchedMote,
}

impl Default for Aggregator {
    fn default() -> Self {
        Aggregator::new(
            WatchedMote::new(0, "Red mote"),
            WatchedMote::new(1, "Green mote"),
        )
    }
}

impl Aggregator {
    pub fn new(primary: WatchedMote, secondary: WatchedMote) -> Self {
        Aggregator { primary, secondary }
    }

    /// Counts records where a watched mote turned on. "off" never counts.
    pub fn count(&self, records: &[EventRecord]) -> Summary {
        let crossings = |mote: &WatchedMote| {
            records
                .iter()
                .filter(|r| r.identifier() == mote.identifier && r.state())
                .count()
        };
        Summary {
            primary: crossings(&self.primary),
            secondary: crossings(&self.secondary),
        }
    }

    /// Writes every record in the given order, then both counts.
    pub fn report<W: Write>(&self, records: &[EventRecord], out: &mut W) -> io::Result<Summary> {
        for record in records {
            writeln!(out, "{}", record)?;
        }
        let summary = self.count(records);
        writeln!(
            out,
            "{} went above its threshold {} times.",
            self.primary.name, summary.primary
        )?;
        writeln!(
            out,
            "{} went above its threshold {} times.",
            self.secondary.name, summary.secondary
        )?;
        out.flush()?;
        Ok(summary)
    }
}
