//! Cancellable deferred removals keyed by id.

use std::collections::HashMap;
use std::hash::Hash;

use jiff::Timestamp;

/// Pending deadlines, one per key.
///
/// Scheduling and cancelling are O(1) hash map operations on the key. A key
/// has at most one deadline; scheduling it again replaces the old one.
/// Keys sharing a deadline fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct ExpiryScheduler<K> {
    deadlines: HashMap<K, Deadline>,
    next_sequence: u64,
}

/// A deadline tagged with its scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Deadline {
    at: Timestamp,
    sequence: u64,
}

impl<K> ExpiryScheduler<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self {
            deadlines: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Schedules `key` to fire at `deadline`, returning any deadline it replaced.
    pub fn schedule(&mut self, key: K, deadline: Timestamp) -> Option<Timestamp> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let previous = self.deadlines.insert(
            key,
            Deadline {
                at: deadline,
                sequence,
            },
        );
        previous.map(|previous| previous.at)
    }

    /// Cancels the pending deadline of `key`. Returns whether one existed.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.deadlines.remove(key).is_some()
    }

    /// Returns the deadline of `key`, if scheduled.
    pub fn deadline(&self, key: &K) -> Option<Timestamp> {
        self.deadlines.get(key).map(|deadline| deadline.at)
    }

    /// Removes and returns every key due at `now`, earliest deadline first.
    /// Ties keep scheduling order.
    ///
    /// Each key fires at most once.
    pub fn pop_due(&mut self, now: Timestamp) -> Vec<K> {
        let mut due: Vec<(Deadline, K)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| deadline.at <= now)
            .map(|(key, deadline)| (*deadline, *key))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        for (_, key) in &due {
            self.deadlines.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }

    /// Returns the earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.deadlines.values().map(|deadline| deadline.at).min()
    }

    /// Returns the number of pending deadlines.
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Returns whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Cancels everything.
    pub fn clear(&mut self) {
        self.deadlines.clear();
    }
}

impl<K> Default for ExpiryScheduler<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    fn at(millis: i64) -> Timestamp {
        Timestamp::UNIX_EPOCH + SignedDuration::from_millis(millis)
    }

    #[test]
    fn test_pop_due_orders_by_deadline() {
        let mut scheduler = ExpiryScheduler::new();
        scheduler.schedule('b', at(200));
        scheduler.schedule('a', at(100));
        scheduler.schedule('c', at(300));

        assert_eq!(scheduler.pop_due(at(250)), vec!['a', 'b']);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(at(300)));
    }

    #[test]
    fn test_pop_due_breaks_ties_by_schedule_order() {
        let mut scheduler = ExpiryScheduler::new();
        for key in 0..32 {
            scheduler.schedule(key, at(100));
        }
        // Rescheduling moves a key behind the others sharing its deadline.
        scheduler.schedule(0, at(100));

        let mut expected: Vec<i32> = (1..32).collect();
        expected.push(0);
        assert_eq!(scheduler.pop_due(at(100)), expected);
    }

    #[test]
    fn test_keys_fire_once() {
        let mut scheduler = ExpiryScheduler::new();
        scheduler.schedule(1, at(10));

        assert_eq!(scheduler.pop_due(at(10)), vec![1]);
        assert!(scheduler.pop_due(at(20)).is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = ExpiryScheduler::new();
        scheduler.schedule(1, at(10));

        assert!(scheduler.cancel(&1));
        assert!(!scheduler.cancel(&1));
        assert!(scheduler.pop_due(at(100)).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut scheduler = ExpiryScheduler::new();
        assert_eq!(scheduler.schedule(1, at(10)), None);
        assert_eq!(scheduler.schedule(1, at(50)), Some(at(10)));

        assert!(scheduler.pop_due(at(10)).is_empty());
        assert_eq!(scheduler.deadline(&1), Some(at(50)));
    }
}
