//! Deferred step queue
//!
//! Delayed effects (celebration, settle, lockout follow-ups) are queued
//! against a target session time and polled once per frame. Nothing here
//! owns a timer thread; a step only fires when the owner asks for due items.

/// A step waiting for its target time
#[derive(Debug, Clone)]
struct Scheduled<T> {
    at: f64,
    seq: u64,
    item: T,
}

/// Queue of future steps keyed by session time (seconds)
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    entries: Vec<Scheduled<T>>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `item` to fire once session time reaches `at`
    pub fn schedule(&mut self, at: f64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Scheduled { at, seq, item });
    }

    /// Remove and return every item due at `now`, earliest first.
    /// Items sharing a target time come out in scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.entries).into_iter().partition(|e| e.at <= now);
        self.entries = pending;
        due.sort_by(|a, b| a.at.total_cmp(&b.at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.item).collect()
    }

    /// Target time of the next pending item
    pub fn next_due(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.at).min_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_due_items_drain() {
        let mut queue = DeferredQueue::new();
        queue.schedule(2.0, "late");
        queue.schedule(1.0, "early");

        assert!(queue.drain_due(0.5).is_empty());
        assert_eq!(queue.drain_due(1.0), vec!["early"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_due(), Some(2.0));
        assert_eq!(queue.drain_due(5.0), vec!["late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(3.0, 'c');
        queue.schedule(1.0, 'a');
        queue.schedule(1.0, 'b');

        assert_eq!(queue.drain_due(10.0), vec!['a', 'b', 'c']);
    }
}
