//! Event bus between the session and its observers
//!
//! Events collect in an outbox during a tick. The host takes them once per
//! frame; taken events are also kept in a bounded history so scenario checks
//! and log dumps can look back without the session growing without limit.

use std::collections::VecDeque;

use super::types::GameEvent;

/// Most events the history keeps before dropping the oldest
pub const HISTORY_LIMIT: usize = 4096;

/// An event stamped with session time
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Milliseconds since session start
    pub time_ms: u32,
    pub event: GameEvent,
}

#[derive(Debug, Clone)]
pub struct EventBus {
    outbox: Vec<BusEvent>,
    history: VecDeque<BusEvent>,
    limit: usize,
    now_ms: u32,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// Bus whose history holds at most `limit` events (at least one)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            outbox: Vec::new(),
            history: VecDeque::new(),
            limit: limit.max(1),
            now_ms: 0,
        }
    }

    /// Set the stamp applied to subsequent emits
    pub fn update_time(&mut self, elapsed_secs: f64) {
        self.now_ms = (elapsed_secs * 1000.0) as u32;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.outbox.push(BusEvent {
            time_ms: self.now_ms,
            event,
        });
    }

    /// Take the outbox, copying it into the history
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let taken = std::mem::take(&mut self.outbox);
        for event in &taken {
            if self.history.len() == self.limit {
                self.history.pop_front();
            }
            self.history.push_back(event.clone());
        }
        taken
    }

    /// Drained events, oldest first
    pub fn history(&self) -> impl Iterator<Item = &BusEvent> + '_ {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
