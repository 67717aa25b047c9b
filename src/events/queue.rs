//! Outbound event queue.
//!
//! FIFO buffer between the engine and whoever renders the game. The engine
//! pushes, the transport drains. The buffer holds at most
//! `MAX_PENDING_EVENTS`; once full, each push drops the oldest event.

use std::collections::VecDeque;

use super::event::GameEvent;

/// Events kept while nobody drains the queue.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Pending events, oldest first.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event, dropping the oldest one if the queue is full.
    pub fn push(&mut self, event: GameEvent) {
        if self.pending.len() >= MAX_PENDING_EVENTS {
            if let Some(dropped) = self.pending.pop_front() {
                tracing::warn!(kind = dropped.kind(), "event queue full, dropping oldest event");
            }
        }
        tracing::trace!(kind = event.kind(), "event queued");
        self.pending.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
