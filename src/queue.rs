//! Bounded blocking hand-off queue for the staged pipeline server (§4.7).
//!
//! Grounded on spec.md §4.7's description of the four `Q1..Q4` queues
//! between pipeline stages: a fixed-capacity queue guarded by one mutex and
//! two condition variables, one signalled when the queue becomes non-empty
//! (wakes a waiting consumer) and one signalled when it becomes non-full
//! (wakes a waiting producer). `std::sync::{Mutex, Condvar}` is the same
//! primitive pair used for the graph scheduler in
//! `other_examples/jasonwhite-button-rs/src/build/graph.rs`; this crate
//! stays with the standard library pair rather than reaching for a
//! lock-free channel, matching that usage.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

struct State<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// A capacity-bounded FIFO queue shared between a pipeline stage's producer
/// and consumer threads.
///
/// `push` blocks while the queue is full; `pop` blocks while the queue is
/// empty. Calling [`BoundedQueue::close`] wakes every blocked thread and
/// makes all subsequent `push`/`pop` calls return `None`/`Err` once drained,
/// used to shut a stage down cooperatively rather than killing its thread.
pub struct BoundedQueue<T> {
    capacity: usize,
    state: Mutex<State<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> BoundedQueue<T> {
        assert!(capacity > 0, "a zero-capacity queue can never be pushed to");
        BoundedQueue {
            capacity,
            state: Mutex::new(State {
                items: VecDeque::new(),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Push `item`, blocking while the queue is full. Returns `Err(item)`
    /// without pushing if the queue has been [`close`](Self::close)d.
    pub fn push(&self, item: T) -> Result<(), T> {
        let mut state = self.state.lock().unwrap();
        loop {
            if state.closed {
                return Err(item);
            }
            if state.items.len() < self.capacity {
                state.items.push_back(item);
                self.not_empty.notify_one();
                return Ok(());
            }
            state = self.not_full.wait(state).unwrap();
        }
    }

    /// Pop the oldest item, blocking while the queue is empty. Returns
    /// `None` once the queue is closed and drained.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(item) = state.items.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }
            if state.closed {
                return None;
            }
            state = self.not_empty.wait(state).unwrap();
        }
    }

    /// Mark the queue closed and wake every waiting producer/consumer.
    /// Already-queued items remain poppable until drained.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
