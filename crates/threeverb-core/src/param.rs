//! Per-sample ramps for gains and tank coefficients.
//!
//! The reverb receives new parameters once per block. Stepping a comb
//! feedback or an output gain at a block boundary clicks, so each value
//! glides to its new target over a fixed time instead.
//!
//! ```rust
//! use threeverb_core::LinearSmoothedParam;
//!
//! let mut wet = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
//! wet.set_target(1.5);
//!
//! // 10 ms at 48 kHz
//! let last = (0..480).map(|_| wet.advance()).last();
//! assert_eq!(last, Some(1.5));
//! assert!(wet.is_settled());
//! ```

/// Value that moves towards its target in equal steps.
///
/// Every ramp takes the same number of samples regardless of distance, so
/// the wet, dry and coefficient ramps started in one block finish together.
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    value: f32,
    target: f32,
    step: f32,
    remaining: u32,
    ramp_len: u32,
    ramp_ms: f32,
}

fn ramp_samples(sample_rate: f32, ramp_ms: f32) -> u32 {
    libm::roundf(ramp_ms * sample_rate / 1000.0).max(0.0) as u32
}

impl LinearSmoothedParam {
    /// Start settled at `initial`, ramping over `ramp_ms` at `sample_rate`.
    pub fn with_config(initial: f32, sample_rate: f32, ramp_ms: f32) -> Self {
        Self {
            value: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            ramp_len: ramp_samples(sample_rate, ramp_ms),
            ramp_ms,
        }
    }

    /// Begin a ramp towards `target`.
    ///
    /// Re-sending the current target leaves a ramp in flight alone.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < 1e-9 {
            return;
        }
        self.target = target;
        if self.ramp_len == 0 {
            self.snap_to_target();
        } else {
            self.step = (target - self.value) / self.ramp_len as f32;
            self.remaining = self.ramp_len;
        }
    }

    /// Recompute the ramp length. A ramp in flight completes at once.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.ramp_len = ramp_samples(sample_rate, self.ramp_ms);
        self.snap_to_target();
    }

    /// Step one sample and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.remaining {
            0 => {}
            1 => {
                self.remaining = 0;
                self.value = self.target;
            }
            _ => {
                self.remaining -= 1;
                self.value += self.step;
            }
        }
        self.value
    }

    /// Value after the last [`advance`](Self::advance).
    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Where the current ramp ends.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// `true` once the target has been reached.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.remaining == 0
    }

    /// Jump to the target, abandoning any ramp.
    pub fn snap_to_target(&mut self) {
        self.value = self.target;
        self.step = 0.0;
        self.remaining = 0;
    }
}

impl Default for LinearSmoothedParam {
    fn default() -> Self {
        Self::with_config(0.0, 44100.0, 10.0)
    }
}
