use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use bytemuck::Pod;

// Global buffer id generator
static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// A fixed-size structured buffer with a CPU-side mirror.
///
/// The mirror is the authoritative copy: every write lands here immediately
/// and records the touched byte range. The matching GPU buffer is created and
/// kept in sync by [`crate::gpu::ResourceManager`], which drains the pending
/// ranges onto the device queue in program order. Keeping the mirror
/// authoritative makes upload coverage and buffer contents observable without
/// a device.
#[derive(Debug)]
pub struct StructuredBuffer {
    id: u64,
    label: String,
    stride: usize,
    len: usize,
    data: Vec<u8>,
    version: u64,
    pending: Vec<Range<usize>>,
}

impl StructuredBuffer {
    /// Creates a zero-initialized buffer of `len` elements of `stride` bytes.
    #[must_use]
    pub fn new(label: &str, stride: usize, len: usize) -> Self {
        assert!(stride > 0, "structured buffer stride must be non-zero");
        Self {
            id: NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed),
            label: label.to_string(),
            stride,
            len,
            data: vec![0u8; stride * len],
            version: 0,
            pending: Vec::new(),
        }
    }

    /// Creates a buffer initialized from `items`.
    #[must_use]
    pub fn from_slice<T: Pod>(label: &str, items: &[T]) -> Self {
        Self {
            id: NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed),
            label: label.to_string(),
            stride: size_of::<T>(),
            len: items.len(),
            data: bytemuck::cast_slice(items).to_vec(),
            version: 0,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn as_slice<T: Pod>(&self) -> &[T] {
        bytemuck::cast_slice(&self.data)
    }

    /// Writes a byte range into the mirror and records it for upload.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the buffer size.
    pub fn set_blob(&mut self, bytes: &[u8], byte_offset: usize) {
        let end = byte_offset + bytes.len();
        assert!(
            end <= self.data.len(),
            "write of {} bytes at offset {byte_offset} exceeds buffer {:?} ({} bytes)",
            bytes.len(),
            self.label,
            self.data.len()
        );
        self.data[byte_offset..end].copy_from_slice(bytes);
        self.version = self.version.wrapping_add(1);
        self.pending.push(byte_offset..end);
    }

    /// Replaces the entire contents.
    ///
    /// # Panics
    ///
    /// Panics if `items` does not match the buffer size.
    pub fn write_all<T: Pod>(&mut self, items: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(items);
        assert_eq!(
            bytes.len(),
            self.data.len(),
            "full write size mismatch for buffer {:?}",
            self.label
        );
        self.set_blob_full(bytes);
    }

    fn set_blob_full(&mut self, bytes: &[u8]) {
        self.data.copy_from_slice(bytes);
        self.version = self.version.wrapping_add(1);
        // A full write supersedes any finer-grained pending ranges.
        self.pending.clear();
        self.pending.push(0..self.data.len());
    }

    /// Adopts another buffer's contents.
    ///
    /// Used when the matching GPU copy is produced by a device-side
    /// buffer-to-buffer copy: the mirror is updated here and any pending
    /// upload ranges are dropped, since the device copy supplies the bytes.
    pub(crate) fn copy_from(&mut self, src: &StructuredBuffer) {
        assert_eq!(
            self.data.len(),
            src.data.len(),
            "buffer copy size mismatch ({:?} <- {:?})",
            self.label,
            src.label
        );
        self.data.copy_from_slice(&src.data);
        self.version = self.version.wrapping_add(1);
        self.pending.clear();
    }

    /// Byte ranges written since the last drain, in program order.
    #[must_use]
    pub fn pending_uploads(&self) -> &[Range<usize>] {
        &self.pending
    }

    /// Drains the recorded upload ranges.
    pub fn take_pending_uploads(&mut self) -> Vec<Range<usize>> {
        std::mem::take(&mut self.pending)
    }
}

/// A current/previous pair of identically shaped structured buffers.
///
/// The two slots alternate roles: `current` is an index into a 2-slot array,
/// and [`TemporalPair::swap`] toggles it instead of moving buffer ownership.
/// After a swap, the slot that held last frame's data serves as "previous"
/// while fresh data is written into the other slot.
#[derive(Debug)]
pub struct TemporalPair {
    slots: [StructuredBuffer; 2],
    current: usize,
    pending_copy: bool,
}

impl TemporalPair {
    #[must_use]
    pub fn new(label: &str, stride: usize, len: usize) -> Self {
        Self {
            slots: [
                StructuredBuffer::new(&format!("{label}[0]"), stride, len),
                StructuredBuffer::new(&format!("{label}[1]"), stride, len),
            ],
            current: 0,
            pending_copy: false,
        }
    }

    #[must_use]
    pub fn current(&self) -> &StructuredBuffer {
        &self.slots[self.current]
    }

    pub fn current_mut(&mut self) -> &mut StructuredBuffer {
        &mut self.slots[self.current]
    }

    #[must_use]
    pub fn previous(&self) -> &StructuredBuffer {
        &self.slots[self.current ^ 1]
    }

    pub fn previous_mut(&mut self) -> &mut StructuredBuffer {
        &mut self.slots[self.current ^ 1]
    }

    /// Exchanges the roles of the two slots without touching their contents.
    pub fn swap(&mut self) {
        self.current ^= 1;
    }

    /// Copies current into previous and schedules the matching device copy.
    pub fn copy_current_to_previous(&mut self) {
        let (left, right) = self.slots.split_at_mut(1);
        let (cur, prev) = if self.current == 0 {
            (&left[0], &mut right[0])
        } else {
            (&right[0], &mut left[0])
        };
        prev.copy_from(cur);
        self.pending_copy = true;
    }

    /// Whether a device-side current→previous copy is scheduled.
    #[must_use]
    pub fn has_pending_copy(&self) -> bool {
        self.pending_copy
    }

    pub(crate) fn take_pending_copy(&mut self) -> bool {
        std::mem::take(&mut self.pending_copy)
    }

    /// Combined size of both slots in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.slots[0].size() + self.slots[1].size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_blob_records_exact_range() {
        let mut buffer = StructuredBuffer::new("test", 16, 8);
        buffer.set_blob(&[1u8; 32], 16);

        assert_eq!(buffer.pending_uploads(), &[16..48]);
        assert_eq!(&buffer.as_bytes()[16..48], &[1u8; 32]);
        assert_eq!(&buffer.as_bytes()[..16], &[0u8; 16]);
    }

    #[test]
    fn write_all_supersedes_partial_ranges() {
        let mut buffer = StructuredBuffer::new("test", 4, 4);
        buffer.set_blob(&[7u8; 4], 4);
        buffer.write_all(&[2u32, 2, 2, 2]);

        assert_eq!(buffer.pending_uploads(), &[0..16]);
    }

    #[test]
    fn pair_swap_exchanges_roles_without_copying() {
        let mut pair = TemporalPair::new("test", 4, 1);
        pair.current_mut().write_all(&[11u32]);
        pair.swap();
        pair.current_mut().write_all(&[22u32]);

        assert_eq!(pair.previous().as_slice::<u32>(), &[11]);
        assert_eq!(pair.current().as_slice::<u32>(), &[22]);
    }

    #[test]
    fn copy_current_to_previous_schedules_device_copy() {
        let mut pair = TemporalPair::new("test", 4, 1);
        pair.current_mut().write_all(&[5u32]);
        pair.copy_current_to_previous();

        assert_eq!(pair.previous().as_slice::<u32>(), &[5]);
        assert!(pair.has_pending_copy());
        // The device copy supplies the bytes; no upload is pending on previous.
        assert!(pair.previous().pending_uploads().is_empty());
    }
}
