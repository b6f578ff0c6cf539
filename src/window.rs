//! Sliding history window addressed by backward distance.

use crate::error::{LzssError, Result};
use crate::token::WINDOW_SIZE;

/// Ring buffer holding the last `WINDOW_SIZE` bytes seen by an encode or
/// decode call.
#[derive(Debug, Clone)]
pub struct Window {
    buffer: Vec<u8>,
    // Total bytes ever pushed; the write cursor is `total & mask`.
    total: usize,
    mask: usize,
}

impl Window {
    pub fn new() -> Self {
        Self {
            buffer: vec![0; WINDOW_SIZE],
            total: 0,
            mask: WINDOW_SIZE - 1,
        }
    }

    /// Appends one byte, evicting the oldest once the window is full.
    pub fn push(&mut self, byte: u8) {
        self.buffer[self.total & self.mask] = byte;
        self.total += 1;
    }

    /// Number of addressable bytes, at most `WINDOW_SIZE`.
    pub fn len(&self) -> usize {
        self.total.min(self.buffer.len())
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Bytes pushed since the window was created.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the byte `distance` positions behind the write cursor.
    /// Distance 1 is the most recently pushed byte.
    pub fn at(&self, distance: usize) -> Result<u8> {
        let available = self.len();
        if distance == 0 || distance > available {
            return Err(LzssError::OutOfRange {
                distance,
                available,
            });
        }
        Ok(self.peek(distance))
    }

    /// Unchecked variant of [`Window::at`] for callers that already bounded
    /// `distance` by [`Window::len`].
    #[inline]
    pub(crate) fn peek(&self, distance: usize) -> u8 {
        self.buffer[self.total.wrapping_sub(distance) & self.mask]
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}
