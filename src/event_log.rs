use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::record::EventRecord;

/// Append-only list of records, drained as a whole once per report cycle.
///
/// `append` and `drain_all` share one lock; a drain swaps the list out
/// under that lock, so every record lands in exactly one drained batch.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<EventRecord>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: EventRecord) {
        self.lock().push(record);
    }

    /// Returns everything appended since the previous drain and empties the log.
    pub fn drain_all(&self) -> Vec<EventRecord> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<EventRecord>> {
        // push and take leave the Vec consistent even if a holder panicked
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn record(n: u64) -> EventRecord {
        EventRecord::from_parts((n % 2) as u16, n % 3 == 0, n)
    }

    #[test]
    fn test_drain_then_drain_again_is_empty() {
        let log = EventLog::new();
        let appended: Vec<_> = (0..5).map(record).collect();
        appended.iter().for_each(|r| log.append(*r));

        assert_eq!(log.len(), 5);
        assert_eq!(log.drain_all(), appended);
        assert!(log.drain_all().is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_concurrent_appends_land_in_exactly_one_batch() {
        const PRODUCERS: u64 = 4;
        const PER_PRODUCER: u64 = 2_000;

        let log = Arc::new(EventLog::new());
        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        log.append(record(p * PER_PRODUCER + i));
                    }
                })
            })
            .collect();

        let mut batches = Vec::new();
        while producers.iter().any(|p| !p.is_finished()) {
            batches.push(log.drain_all());
        }
        for p in producers {
            p.join().unwrap();
        }
        batches.push(log.drain_all());

        let seen: Vec<u64> = batches
            .iter()
            .flatten()
            .map(|r| r.timestamp_ms())
            .collect();
        let unique: HashSet<u64> = seen.iter().copied().collect();
        assert_eq!(seen.len() as u64, PRODUCERS * PER_PRODUCER);
        assert_eq!(unique.len(), seen.len());
    }

    #[test]
    fn test_batches_keep_insertion_order() {
        let log = EventLog::new();
        log.append(record(1));
        log.append(record(2));
        let first = log.drain_all();
        log.append(record(3));
        let second = log.drain_all();

        assert_eq!(first, vec![record(1), record(2)]);
        assert_eq!(second, vec![record(3)]);
    }
}
