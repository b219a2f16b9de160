//! Transaction buffer
//!
//! Staging area for client payloads between emissions. The lock guards only
//! the vector itself; nothing slow ever runs while it is held.

use parking_lot::Mutex;

/// Thread-safe append-only buffer drained once per emission.
#[derive(Debug, Default)]
pub struct TransactionBuffer {
    pending: Mutex<Vec<Vec<u8>>>,
}

impl TransactionBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a payload.
    pub fn submit(&self, payload: Vec<u8>) {
        self.pending.lock().push(payload);
    }

    /// Take everything buffered so far, leaving the buffer empty.
    pub fn drain(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Put a previously drained batch back in front of anything submitted
    /// since, so the batch keeps its position in the stream.
    pub fn requeue(&self, mut batch: Vec<Vec<u8>>) {
        if batch.is_empty() {
            return;
        }
        let mut pending = self.pending.lock();
        batch.append(&mut pending);
        *pending = batch;
    }

    /// Number of buffered payloads.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
