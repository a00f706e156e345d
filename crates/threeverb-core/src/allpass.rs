//! Schroeder allpass, the diffuser after the comb bank.
//!
//! Four in series turn the comb bank's discrete echoes into a dense,
//! smooth tail.

use crate::delay::DelayLine;
use crate::flush_denormal;

/// Freeverb's allpass approximation.
///
/// Unlike a textbook allpass the direct path is not scaled by the gain, so
/// the response is only roughly flat. The tank uses a fixed gain of 0.5.
///
/// # Example
///
/// ```rust
/// use threeverb_core::AllpassFilter;
///
/// let mut diffuser = AllpassFilter::new(556);
/// diffuser.set_feedback(0.5);
///
/// // The direct path is inverted; the delayed path arrives later.
/// assert_eq!(diffuser.process(1.0), -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    delay: DelayLine,
    feedback: f32,
}

impl AllpassFilter {
    /// Allpass of `delay_samples` length with gain 0.5.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            delay: DelayLine::new(delay_samples),
            feedback: 0.5,
        }
    }

    /// Loop gain, clamped to \[-0.99, 0.99\] to stay stable.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
    }

    /// Current loop gain.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// One sample in, one out: `tap - input`, storing `input + tap * g`.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let tap = self.delay.read();
        self.delay
            .write_and_advance(flush_denormal(input + tap * self.feedback));
        tap - input
    }

    /// Silence the delay.
    pub fn clear(&mut self) {
        self.delay.clear();
    }

    /// Reallocate the delay (setup paths only). State is cleared.
    pub fn set_delay_samples(&mut self, delay_samples: usize) {
        self.delay.resize(delay_samples);
    }

    /// Delay length in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}
