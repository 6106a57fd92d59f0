use crate::task::TaskRegistry;
use crate::time::{self, SimTime};
use std::collections::VecDeque;
use tracing::debug;

/// FIFO ready queue for Round Robin, holding registry indices.
///
/// Arrivals are admitted in registry order, which is arrival order. Entries
/// for tasks that finished while queued are discarded when popped.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    queue: VecDeque<usize>,
    admitted_until: Option<SimTime>,
}

impl ReadyQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            admitted_until: None,
        }
    }

    /// Get queued entry count, stale entries included
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued registry indices, front first
    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.queue.iter()
    }

    /// Append a task at the back
    pub fn push(&mut self, index: usize) {
        self.queue.push_back(index);
    }

    /// Enqueue every unfinished task that arrived since the previous
    /// admission, up to and including `now`
    pub fn admit_arrivals(&mut self, registry: &TaskRegistry, now: SimTime) {
        let since = self.admitted_until;
        for (index, task) in registry.tasks().iter().enumerate() {
            let fresh = since.map_or(true, |since| time::strictly_after(task.arrival(), since));
            if fresh && task.is_ready(now) {
                debug!("t={:.2} P{} joins ready queue", now, task.pid());
                self.queue.push_back(index);
            }
        }
        self.admitted_until = Some(since.map_or(now, |since| since.max(now)));
    }

    /// Pop the front task, skipping entries that already finished
    pub fn pop_live(&mut self, registry: &TaskRegistry) -> Option<usize> {
        while let Some(index) = self.queue.pop_front() {
            if registry.task(index).is_done() {
                debug!("Dropping stale queue entry for P{}", registry.task(index).pid());
                continue;
            }
            return Some(index);
        }
        None
    }
}
