//! Small numeric helpers shared by the DSP building blocks.

/// Flush denormal (subnormal) values to zero.
///
/// Feedback paths that decay towards silence produce subnormal floats,
/// which are orders of magnitude slower to compute on most CPUs. Any
/// magnitude below `1e-20` is treated as silence.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Scale a delay length tuned at `reference_rate` to `target_rate`.
///
/// Always returns at least one sample.
#[inline]
pub fn scale_to_rate(samples: usize, target_rate: f64, reference_rate: f64) -> usize {
    let scaled = libm::round(samples as f64 * target_rate / reference_rate);
    (scaled as usize).max(1)
}

/// Returns `true` if every sample in the block is finite.
#[inline]
pub fn is_finite_block(block: &[f32]) -> bool {
    block.iter().all(|s| s.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_denormal_zeroes_tiny_values() {
        assert_eq!(flush_denormal(1e-30), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(0.25), 0.25);
        assert_eq!(flush_denormal(-1e-10), -1e-10);
    }

    #[test]
    fn scale_to_rate_tracks_sample_rate() {
        assert_eq!(scale_to_rate(1116, 44100.0, 44100.0), 1116);
        assert_eq!(scale_to_rate(1116, 88200.0, 44100.0), 2232);
        assert_eq!(scale_to_rate(441, 48000.0, 44100.0), 480);
        assert_eq!(scale_to_rate(1, 8000.0, 44100.0), 1);
    }

    #[test]
    fn finite_block_detection() {
        assert!(is_finite_block(&[0.0, 1.0, -1.0]));
        assert!(!is_finite_block(&[0.0, f32::NAN]));
        assert!(!is_finite_block(&[f32::INFINITY]));
        assert!(is_finite_block(&[]));
    }
}
