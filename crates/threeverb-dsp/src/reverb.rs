//! The ThreeVerb engine.
//!
//! Freeverb topology: per side, eight damped feedback combs in parallel
//! followed by four allpasses in series. The mono input sum feeds both sides;
//! the two side outputs are cross-mixed by the width control.
//!
//! Up to two tanks run side by side so four-channel (first-order ambisonic)
//! buffers get two independent stereo reverbs.

use threeverb_core::{AudioBuffer, LinearSmoothedParam, ReverbEngine, ReverbParameters};

use crate::tank::{Gains, Tank};

/// Input attenuation ahead of the combs.
const FIXED_GAIN: f32 = 0.015;
/// Damping control → comb damping coefficient.
const SCALE_DAMP: f32 = 0.4;
/// Room size control → comb feedback, `size * SCALE_ROOM + OFFSET_ROOM`.
const SCALE_ROOM: f32 = 0.28;
const OFFSET_ROOM: f32 = 0.7;
const SCALE_WET: f32 = 3.0;
const SCALE_DRY: f32 = 2.0;

/// Ramp time for gains and tank coefficients.
const SMOOTHING_MS: f32 = 10.0;

const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// How a buffer's channels map onto the tanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Routing {
    Silent,
    Mono,
    Stereo,
    StereoPlusMono,
    DualStereo,
}

impl Routing {
    fn for_channels(channels: usize) -> Self {
        match channels {
            0 => Self::Silent,
            1 => Self::Mono,
            2 => Self::Stereo,
            3 => Self::StereoPlusMono,
            _ => Self::DualStereo,
        }
    }
}

/// Freeverb-style stereo reverb implementing [`ReverbEngine`].
///
/// # Parameters
///
/// - `room_size`: comb feedback, 0.7 to 0.98
/// - `damping`: high-frequency loss inside the combs
/// - `width`: 0 sums both sides to the centre, 1 keeps them apart
/// - `wet_level` / `dry_level`: output gains (scaled by 3 and 2)
/// - `freeze_mode`: unity feedback, no damping and no new input
///
/// # Example
///
/// ```rust
/// use threeverb_core::{AudioBuffer, ReverbEngine, ReverbParameters};
/// use threeverb_dsp::ThreeVerb;
///
/// let mut reverb = ThreeVerb::new(48000.0);
/// reverb.set_parameters(&ReverbParameters {
///     room_size: 0.8,
///     ..ReverbParameters::default()
/// });
///
/// let mut left = vec![0.0f32; 256];
/// let mut right = vec![0.0f32; 256];
/// left[0] = 1.0;
/// let mut channels = [left.as_mut_slice(), right.as_mut_slice()];
/// let mut buffer = AudioBuffer::new(&mut channels).unwrap();
/// reverb.process(&mut buffer);
/// ```
#[derive(Debug, Clone)]
pub struct ThreeVerb {
    tanks: [Tank; 2],
    params: ReverbParameters,
    sample_rate: f64,

    // Smoothed per-sample values
    damping: LinearSmoothedParam,
    feedback: LinearSmoothedParam,
    dry: LinearSmoothedParam,
    wet1: LinearSmoothedParam,
    wet2: LinearSmoothedParam,
    input_gain: f32,

    // Coefficients last written into the combs
    applied: (f32, f32),
}

impl ThreeVerb {
    /// Create an engine at the given sample rate with default parameters.
    ///
    /// A non-finite or non-positive rate falls back to 44.1 kHz.
    pub fn new(sample_rate: f64) -> Self {
        let sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate
        } else {
            DEFAULT_SAMPLE_RATE
        };
        let smoothed =
            |v: f32| LinearSmoothedParam::with_config(v, sample_rate as f32, SMOOTHING_MS);
        let mut reverb = Self {
            tanks: [Tank::new(sample_rate), Tank::new(sample_rate)],
            params: ReverbParameters::default(),
            sample_rate,
            damping: smoothed(0.0),
            feedback: smoothed(0.0),
            dry: smoothed(0.0),
            wet1: smoothed(0.0),
            wet2: smoothed(0.0),
            input_gain: FIXED_GAIN,
            applied: (-1.0, -1.0),
        };
        reverb.set_parameters(&ReverbParameters::default());
        reverb.snap_smoothers();
        reverb.apply_coefficients();
        reverb
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Whether freeze mode is engaged.
    pub fn is_frozen(&self) -> bool {
        self.params.freeze_mode
    }

    fn snap_smoothers(&mut self) {
        self.damping.snap_to_target();
        self.feedback.snap_to_target();
        self.dry.snap_to_target();
        self.wet1.snap_to_target();
        self.wet2.snap_to_target();
    }

    fn apply_coefficients(&mut self) {
        let coeffs = (self.damping.get(), self.feedback.get());
        if coeffs.0.to_bits() == self.applied.0.to_bits()
            && coeffs.1.to_bits() == self.applied.1.to_bits()
        {
            return;
        }
        for tank in &mut self.tanks {
            tank.set_coefficients(coeffs.0, coeffs.1);
        }
        self.applied = coeffs;
    }

    /// Advance every smoother by one sample.
    #[inline]
    fn next_gains(&mut self) -> Gains {
        self.damping.advance();
        self.feedback.advance();
        self.apply_coefficients();
        Gains {
            input: self.input_gain,
            wet1: self.wet1.advance(),
            wet2: self.wet2.advance(),
            dry: self.dry.advance(),
        }
    }
}

impl Default for ThreeVerb {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl ReverbEngine for ThreeVerb {
    fn reset(&mut self) {
        for tank in &mut self.tanks {
            tank.clear();
        }
        self.snap_smoothers();
        self.apply_coefficients();
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return;
        }
        self.sample_rate = sample_rate;
        for tank in &mut self.tanks {
            tank.set_sample_rate(sample_rate);
        }
        let rate = sample_rate as f32;
        self.damping.set_sample_rate(rate);
        self.feedback.set_sample_rate(rate);
        self.dry.set_sample_rate(rate);
        self.wet1.set_sample_rate(rate);
        self.wet2.set_sample_rate(rate);

        // Resized combs start from fresh coefficients
        self.applied = (-1.0, -1.0);
        self.apply_coefficients();
    }

    fn set_parameters(&mut self, parameters: &ReverbParameters) {
        let p = parameters.sanitized();
        self.params = p;

        let wet = p.wet_level * SCALE_WET;
        self.dry.set_target(p.dry_level * SCALE_DRY);
        self.wet1.set_target(0.5 * wet * (1.0 + p.width));
        self.wet2.set_target(0.5 * wet * (1.0 - p.width));

        if p.freeze_mode {
            self.input_gain = 0.0;
            self.damping.set_target(0.0);
            self.feedback.set_target(1.0);
        } else {
            self.input_gain = FIXED_GAIN;
            self.damping.set_target(p.damping * SCALE_DAMP);
            self.feedback.set_target(p.room_size * SCALE_ROOM + OFFSET_ROOM);
        }
    }

    fn parameters(&self) -> ReverbParameters {
        self.params
    }

    fn process(&mut self, buffer: &mut AudioBuffer<'_, '_>) {
        match Routing::for_channels(buffer.num_channels()) {
            Routing::Silent => {}
            Routing::Mono => {
                let Some([mono]) = buffer.first_channels_mut::<1>() else {
                    return;
                };
                for s in mono.iter_mut() {
                    let g = self.next_gains();
                    *s = self.tanks[0].mono(*s, &g);
                }
            }
            Routing::Stereo => {
                let Some([left, right]) = buffer.first_channels_mut::<2>() else {
                    return;
                };
                for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                    let g = self.next_gains();
                    (*l, *r) = self.tanks[0].stereo(*l, *r, &g);
                }
            }
            Routing::StereoPlusMono => {
                let Some([left, right, mono]) = buffer.first_channels_mut::<3>() else {
                    return;
                };
                for ((l, r), m) in left.iter_mut().zip(right.iter_mut()).zip(mono.iter_mut()) {
                    let g = self.next_gains();
                    (*l, *r) = self.tanks[0].stereo(*l, *r, &g);
                    *m = self.tanks[1].mono(*m, &g);
                }
            }
            Routing::DualStereo => {
                let Some([l1, r1, l2, r2]) = buffer.first_channels_mut::<4>() else {
                    return;
                };
                let front = l1.iter_mut().zip(r1.iter_mut());
                let back = l2.iter_mut().zip(r2.iter_mut());
                for ((a, b), (c, d)) in front.zip(back) {
                    let g = self.next_gains();
                    (*a, *b) = self.tanks[0].stereo(*a, *b, &g);
                    (*c, *d) = self.tanks[1].stereo(*c, *d, &g);
                }
            }
        }
    }
}
