//! One-shot event queue bridging async outcomes to the caller

use std::collections::VecDeque;

/// Append-only FIFO queue of one-shot notifications.
///
/// The caller inspects the front event with [`peek`](Self::peek), acts on
/// it, then removes it with [`acknowledge`](Self::acknowledge). Events are
/// drained strictly in arrival order, one at a time.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: VecDeque<T>,
}

impl<T: Clone> EventQueue<T> {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: T) {
        self.events.push_back(event);
    }

    /// The oldest unhandled event, if any.
    pub fn peek(&self) -> Option<T> {
        self.events.front().cloned()
    }

    /// Remove the oldest event. Acknowledging an empty queue is a no-op.
    pub fn acknowledge(&mut self) {
        self.events.pop_front();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T: Clone> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
