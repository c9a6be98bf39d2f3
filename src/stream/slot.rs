//! Latest-wins frame hand-off between a producer and a consumer
//!
//! Live capture outpaces decomposition, and visual freshness matters more
//! than processing every frame. The slot therefore holds at most one pending
//! frame: publishing replaces whatever is waiting, and the consumer always
//! takes the most recent frame. Dropped frames are counted, not buffered.

use std::sync::{Condvar, Mutex};

struct SlotState<T> {
    pending: Option<T>,
    closed: bool,
    dropped: u64,
}

/// Single-slot frame exchange with a drop-oldest policy
///
/// Shared between threads behind an `Arc`; the producer calls
/// [`FrameSlot::publish`], the consumer blocks in [`FrameSlot::take`].
pub struct FrameSlot<T> {
    state: Mutex<SlotState<T>>,
    ready: Condvar,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameSlot<T> {
    /// Create an empty open slot
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                pending: None,
                closed: false,
                dropped: 0,
            }),
            ready: Condvar::new(),
        }
    }

    /// Publish a frame, replacing any undelivered predecessor
    ///
    /// Publishing to a closed slot drops the frame silently; the producer
    /// side has no one left to deliver to.
    pub fn publish(&self, frame: T) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if state.closed {
            return;
        }
        if state.pending.replace(frame).is_some() {
            state.dropped += 1;
        }
        self.ready.notify_one();
    }

    /// Block until a frame is available or the slot closes
    ///
    /// Returns `None` only after [`FrameSlot::close`] with no pending frame
    /// left to drain.
    pub fn take(&self) -> Option<T> {
        let mut state = self.state.lock().ok()?;
        loop {
            if let Some(frame) = state.pending.take() {
                return Some(frame);
            }
            if state.closed {
                return None;
            }
            state = self.ready.wait(state).ok()?;
        }
    }

    /// Take the pending frame without blocking
    pub fn try_take(&self) -> Option<T> {
        self.state.lock().ok()?.pending.take()
    }

    /// Close the slot, waking any blocked consumer
    pub fn close(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.closed = true;
        }
        self.ready.notify_all();
    }

    /// Frames replaced before delivery
    pub fn dropped(&self) -> u64 {
        self.state.lock().map(|state| state.dropped).unwrap_or(0)
    }
}
