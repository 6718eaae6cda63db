/// Fixed-capacity circular buffer for raw sample data.
///
/// One writer, one reader, no internal locking. To share across threads
/// wrap in `Arc<parking_lot::Mutex<RingBuffer<T>>>`.
///
/// Overflow behavior: the write always lands and the oldest unread elements
/// are discarded. `store` reports this through its return value only.
///
/// State is just the two cursors: `start` (oldest unread) and `end` (next
/// write). `start == end` always means empty. The storage keeps one slot
/// more than `capacity` so that a full buffer never has equal cursors.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    storage: Vec<T>,
    start: usize,
    end: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Create a buffer that holds up to `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            storage: vec![T::default(); capacity + 1],
            start: 0,
            end: 0,
        }
    }

    /// Append `data`, returning `true` if unread elements were overwritten.
    ///
    /// Only the trailing `capacity` elements of an oversized write can
    /// survive, so anything before them is skipped outright.
    pub fn store(&mut self, data: &[T]) -> bool {
        if data.is_empty() {
            return false;
        }

        let capacity = self.capacity();
        let overflowed = self.count() + data.len() > capacity;
        let data = if data.len() > capacity {
            &data[data.len() - capacity..]
        } else {
            data
        };

        // At most two segments: up to the physical end, then from index 0.
        let slots = self.storage.len();
        let head = data.len().min(slots - self.end);
        self.storage[self.end..self.end + head].copy_from_slice(&data[..head]);
        let tail = data.len() - head;
        self.storage[..tail].copy_from_slice(&data[head..]);

        self.end = (self.end + data.len()) % slots;
        if overflowed {
            self.start = (self.end + 1) % slots;
        }
        overflowed
    }

    /// Move up to `out.len()` of the oldest elements into `out`.
    ///
    /// Returns how many were copied. Never blocks; returns 0 when nothing is
    /// pending.
    pub fn retrieve(&mut self, out: &mut [T]) -> usize {
        let count = out.len().min(self.count());
        if count == 0 {
            return 0;
        }

        let slots = self.storage.len();
        let head = count.min(slots - self.start);
        out[..head].copy_from_slice(&self.storage[self.start..self.start + head]);
        let tail = count - head;
        out[head..count].copy_from_slice(&self.storage[..tail]);

        self.start = (self.start + count) % slots;
        count
    }
}

impl<T> RingBuffer<T> {
    /// Number of unread elements, derived from the cursors.
    pub fn count(&self) -> usize {
        let slots = self.storage.len();
        (self.end + slots - self.start) % slots
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn capacity(&self) -> usize {
        self.storage.len() - 1
    }

    /// Drop all unread elements.
    pub fn reset(&mut self) {
        self.start = 0;
        self.end = 0;
    }
}
