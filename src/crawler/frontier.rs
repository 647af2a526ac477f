//! Frontier queue driving breadth-first traversal
//!
//! The frontier is a plain FIFO work queue of (URL, depth) pairs plus an
//! in-flight task counter. It does not interpret URLs; admission decisions
//! happen in the filter before anything is enqueued. FIFO order gives
//! breadth-first traversal at the logical level: items are only enqueued as
//! a result of processing a dequeued item, so every depth-d item enters the
//! queue before any depth-(d+1) item derived from it.

use std::collections::VecDeque;
use url::Url;

/// A unit of crawl work: an admitted URL and the depth it was found at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    /// The normalized absolute URL to fetch
    pub url: Url,

    /// Link distance from the seed (seed is depth 0)
    pub depth: u32,
}

/// FIFO work queue with drain detection
///
/// The crawl is finished only when the queue is empty AND no fetch task is
/// in flight, since a completing task can enqueue new items. The
/// coordinator re-checks [`is_drained`](Frontier::is_drained) after every
/// task completion.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierItem>,
    in_flight: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item to the back of the queue
    pub fn enqueue(&mut self, item: FrontierItem) {
        self.queue.push_back(item);
    }

    /// Removes and returns the oldest queued item
    pub fn dequeue(&mut self) -> Option<FrontierItem> {
        self.queue.pop_front()
    }

    /// Records that a fetch/process task was dispatched
    pub fn task_started(&mut self) {
        self.in_flight += 1;
    }

    /// Records that a fetch/process task completed
    pub fn task_finished(&mut self) {
        debug_assert!(self.in_flight > 0);
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Number of queued items (excluding in-flight work)
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of dispatched tasks that have not completed yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// True when no work is queued and none is in flight
    pub fn is_drained(&self) -> bool {
        self.queue.is_empty() && self.in_flight == 0
    }
}
