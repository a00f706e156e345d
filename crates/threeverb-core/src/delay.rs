//! Fixed-length delay line for the reverb tank.
//!
//! The comb and allpass stages of a Schroeder/Freeverb tank never modulate
//! their delay times, so a plain circular buffer with a single cursor is all
//! they need: read the oldest sample, then overwrite it.
//!
//! # Memory
//!
//! The buffer is heap-allocated by [`DelayLine::new`] and
//! [`DelayLine::resize`]. No allocation happens while processing.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Circular delay line with a fixed length in samples.
///
/// # Example
///
/// ```rust
/// use threeverb_core::DelayLine;
///
/// let mut delay = DelayLine::new(3);
/// delay.write_and_advance(1.0);
/// delay.write_and_advance(0.0);
/// delay.write_and_advance(0.0);
///
/// // The impulse comes back after exactly three samples.
/// assert_eq!(delay.read(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    pos: usize,
}

impl DelayLine {
    /// Create a delay line of `length` samples (minimum 1).
    pub fn new(length: usize) -> Self {
        Self {
            buffer: vec![0.0; length.max(1)],
            pos: 0,
        }
    }

    /// Delay length in samples.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Read the sample written `capacity()` samples ago.
    #[inline]
    pub fn read(&self) -> f32 {
        self.buffer[self.pos]
    }

    /// Overwrite the oldest sample and move the cursor forward.
    #[inline]
    pub fn write_and_advance(&mut self, value: f32) {
        self.buffer[self.pos] = value;
        self.pos += 1;
        if self.pos >= self.buffer.len() {
            self.pos = 0;
        }
    }

    /// Zero the buffer contents.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.pos = 0;
    }

    /// Reallocate to a new length, discarding the contents.
    ///
    /// Allocates: call from setup paths only.
    pub fn resize(&mut self, length: usize) {
        self.buffer = vec![0.0; length.max(1)];
        self.pos = 0;
    }
}
