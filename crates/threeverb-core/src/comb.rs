//! Lowpass-feedback comb, the resonator of a Freeverb tank.
//!
//! Each comb recirculates its delay through a one-pole lowpass, so high
//! frequencies die away faster than lows the way they do in a real room.

use crate::delay::DelayLine;
use crate::flush_denormal;

/// Feedback comb with a one-pole lowpass in the loop.
///
/// `feedback` sets the decay time, `damping` how quickly highs fade
/// relative to lows. With feedback 1.0 and damping 0.0 the loop is lossless,
/// which is how a frozen tank holds its tail.
///
/// # Example
///
/// ```rust
/// use threeverb_core::CombFilter;
///
/// let mut comb = CombFilter::new(1116);
/// comb.set_feedback(0.84);
/// comb.set_damp(0.2);
///
/// // Output is the delay tap, silent until the first pass completes.
/// assert_eq!(comb.process(1.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CombFilter {
    delay: DelayLine,
    feedback: f32,
    damping: f32,
    lowpass: f32,
}

impl CombFilter {
    /// Comb of `delay_samples` length, feedback 0.5 and damping 0.5.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            delay: DelayLine::new(delay_samples),
            feedback: 0.5,
            damping: 0.5,
            lowpass: 0.0,
        }
    }

    /// Loop gain, clamped to \[0.0, 1.0\].
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 1.0);
    }

    /// Current loop gain.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Lowpass coefficient in the loop, clamped to \[0.0, 1.0\].
    ///
    /// 0.0 passes the tap through unchanged; higher values darken the tail.
    #[inline]
    pub fn set_damp(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    /// One sample in, the delay tap out.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let tap = self.delay.read();
        self.lowpass = flush_denormal(tap + (self.lowpass - tap) * self.damping);
        self.delay
            .write_and_advance(input + self.lowpass * self.feedback);
        tap
    }

    /// Silence the delay and the lowpass state.
    pub fn clear(&mut self) {
        self.delay.clear();
        self.lowpass = 0.0;
    }

    /// Reallocate the delay (setup paths only). State is cleared.
    pub fn set_delay_samples(&mut self, delay_samples: usize) {
        self.delay.resize(delay_samples);
        self.lowpass = 0.0;
    }

    /// Delay length in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}
