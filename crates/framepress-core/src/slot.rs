use std::sync::{Arc, Mutex, MutexGuard};

use crate::types::RawFrame;

/// Shared cell holding the most recently captured frame.
///
/// One writer (the capture feed) and one reader (the encoder) contend on a
/// single lock; there is no queue, the reader observes the latest frame or
/// none at all. The capture side holds the lock only for the duration of the
/// copy-in, the encode side may hold it for an entire multi-attempt search.
#[derive(Clone, Default)]
pub struct FrameSlot {
    cell: Arc<Mutex<Option<RawFrame>>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture-side write: replaces the previous frame, if any.
    pub fn publish(&self, frame: RawFrame) {
        *self.lock() = Some(frame);
    }

    /// Copy-out of the latest frame.
    pub fn snapshot(&self) -> Option<RawFrame> {
        self.lock().clone()
    }

    /// Runs `operation` with exclusive access to the cell for its whole
    /// duration. This is the encoder-side entry point: capture writes are
    /// fully serialized against the closure.
    pub fn with_locked<R>(&self, operation: impl FnOnce(Option<&RawFrame>) -> R) -> R {
        let guard = self.lock();
        operation(guard.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<RawFrame>> {
        self.cell.lock().unwrap()
    }
}
