//! One stereo Freeverb tank: eight damped combs in parallel feeding four
//! allpasses in series, duplicated per side with a small stereo spread.

use threeverb_core::math::scale_to_rate;
use threeverb_core::{AllpassFilter, CombFilter};

/// Comb delay times at the 44.1 kHz reference rate.
/// Mutually prime to avoid stacked resonances.
const COMB_TUNINGS_44K: [usize; NUM_COMBS] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Allpass delay times at the 44.1 kHz reference rate.
const ALLPASS_TUNINGS_44K: [usize; NUM_ALLPASSES] = [556, 441, 341, 225];

/// Right-side offset in reference samples.
const STEREO_SPREAD: usize = 23;

/// Reference sample rate for the tuning constants.
const REFERENCE_RATE: f64 = 44100.0;

const NUM_COMBS: usize = 8;
const NUM_ALLPASSES: usize = 4;

/// Per-sample gains and coefficients shared by every tank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Gains {
    pub input: f32,
    pub wet1: f32,
    pub wet2: f32,
    pub dry: f32,
}

#[derive(Debug, Clone)]
pub(crate) struct Tank {
    combs: [[CombFilter; NUM_COMBS]; 2],
    allpasses: [[AllpassFilter; NUM_ALLPASSES]; 2],
}

fn side_delay(tuning: usize, side: usize, sample_rate: f64) -> usize {
    scale_to_rate(tuning + side * STEREO_SPREAD, sample_rate, REFERENCE_RATE)
}

impl Tank {
    pub fn new(sample_rate: f64) -> Self {
        let combs = core::array::from_fn(|side| {
            core::array::from_fn(|i| {
                CombFilter::new(side_delay(COMB_TUNINGS_44K[i], side, sample_rate))
            })
        });
        let allpasses = core::array::from_fn(|side| {
            core::array::from_fn(|i| {
                let mut ap =
                    AllpassFilter::new(side_delay(ALLPASS_TUNINGS_44K[i], side, sample_rate));
                ap.set_feedback(0.5);
                ap
            })
        });
        Self { combs, allpasses }
    }

    /// Reallocate every delay line for a new rate. Contents are cleared.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        for (side, combs) in self.combs.iter_mut().enumerate() {
            for (comb, &tuning) in combs.iter_mut().zip(&COMB_TUNINGS_44K) {
                comb.set_delay_samples(side_delay(tuning, side, sample_rate));
            }
        }
        for (side, allpasses) in self.allpasses.iter_mut().enumerate() {
            for (ap, &tuning) in allpasses.iter_mut().zip(&ALLPASS_TUNINGS_44K) {
                ap.set_delay_samples(side_delay(tuning, side, sample_rate));
            }
        }
    }

    pub fn clear(&mut self) {
        self.combs.iter_mut().flatten().for_each(CombFilter::clear);
        self.allpasses
            .iter_mut()
            .flatten()
            .for_each(AllpassFilter::clear);
    }

    pub fn set_coefficients(&mut self, damping: f32, feedback: f32) {
        for comb in self.combs.iter_mut().flatten() {
            comb.set_damp(damping);
            comb.set_feedback(feedback);
        }
    }

    #[inline]
    fn side(&mut self, side: usize, input: f32) -> f32 {
        let mut out = 0.0;
        for comb in &mut self.combs[side] {
            out += comb.process(input);
        }
        for ap in &mut self.allpasses[side] {
            out = ap.process(out);
        }
        out
    }

    /// Both sides fed from the summed input, cross-mixed by width.
    #[inline]
    pub fn stereo(&mut self, left: f32, right: f32, g: &Gains) -> (f32, f32) {
        let input = (left + right) * g.input;
        let out_l = self.side(0, input);
        let out_r = self.side(1, input);
        (
            out_l * g.wet1 + out_r * g.wet2 + left * g.dry,
            out_r * g.wet1 + out_l * g.wet2 + right * g.dry,
        )
    }

    /// Left side only.
    #[inline]
    pub fn mono(&mut self, sample: f32, g: &Gains) -> f32 {
        let out = self.side(0, sample * g.input);
        out * g.wet1 + sample * g.dry
    }

    #[cfg(test)]
    pub fn comb_delays(&self, side: usize) -> [usize; NUM_COMBS] {
        core::array::from_fn(|i| self.combs[side][i].capacity())
    }
}
