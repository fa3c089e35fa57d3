//! Bounded in-memory ledger of externally submitted range alerts.
//!
//! The ledger is the only shared mutable state in the engine. Append and
//! eviction happen under one lock acquisition so concurrent writers can
//! neither lose entries nor grow the buffer past its capacity.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

/// Number of alerts retained before the oldest are evicted.
pub const ALERT_LEDGER_CAPACITY: usize = 1000;

/// A range violation reported by the dashboard or PLC bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPayload {
    pub component_id: String,
    pub parameter: String,
    pub value: f64,
    pub limit: f64,
    pub source: String,
    /// Caller-supplied event time, stored verbatim.
    pub timestamp: String,
}

/// Fixed-capacity FIFO of [`AlertPayload`]s.
#[derive(Debug)]
pub struct AlertLedger {
    capacity: usize,
    entries: Mutex<VecDeque<AlertPayload>>,
}

impl Default for AlertLedger {
    fn default() -> Self {
        Self::with_capacity(ALERT_LEDGER_CAPACITY)
    }
}

impl AlertLedger {
    /// Create a ledger holding at most `capacity` alerts (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an alert, evicting the oldest entries beyond capacity.
    ///
    /// Returns the number of alerts stored after the append.
    pub fn record(&self, alert: AlertPayload) -> usize {
        let mut entries = self.lock();
        entries.push_back(alert);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
        entries.len()
    }

    /// Up to `limit` of the newest alerts, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<AlertPayload> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The deque is never left half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, VecDeque<AlertPayload>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn alert(value: f64) -> AlertPayload {
        AlertPayload {
            component_id: "Tank".to_string(),
            parameter: "Level".to_string(),
            value,
            limit: 90.0,
            source: "plc".to_string(),
            timestamp: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn record_reports_stored_count() {
        let ledger = AlertLedger::default();
        assert!(ledger.is_empty());
        assert_eq!(ledger.record(alert(1.0)), 1);
        assert_eq!(ledger.record(alert(2.0)), 2);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn keeps_only_newest_thousand() {
        let ledger = AlertLedger::default();
        for i in 0..1500 {
            ledger.record(alert(i as f64));
        }
        assert_eq!(ledger.len(), ALERT_LEDGER_CAPACITY);

        let all = ledger.recent(usize::MAX);
        assert_eq!(all.first().unwrap().value, 500.0);
        assert_eq!(all.last().unwrap().value, 1499.0);
    }

    #[test]
    fn recent_returns_tail_in_arrival_order() {
        let ledger = AlertLedger::with_capacity(10);
        for i in 0..5 {
            ledger.record(alert(i as f64));
        }
        let tail: Vec<f64> = ledger.recent(2).iter().map(|a| a.value).collect();
        assert_eq!(tail, vec![3.0, 4.0]);
        assert!(ledger.recent(0).is_empty());
    }

    #[test]
    fn concurrent_writers_never_exceed_capacity() {
        let ledger = Arc::new(AlertLedger::with_capacity(100));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    for i in 0..200 {
                        let stored = ledger.record(alert((t * 1000 + i) as f64));
                        assert!(stored <= 100);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(ledger.len(), 100);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let ledger = AlertLedger::with_capacity(0);
        ledger.record(alert(1.0));
        ledger.record(alert(2.0));
        assert_eq!(ledger.capacity(), 1);
        assert_eq!(ledger.recent(5)[0].value, 2.0);
    }
}
