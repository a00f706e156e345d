//! Borrowed planar audio buffer.
//!
//! The host owns the sample memory for the duration of one processing call.
//! [`AudioBuffer`] is a view over those per-channel slices: processors and
//! engines may rewrite samples in place but can neither grow the buffer nor
//! keep it past the call.

use core::fmt;

/// Error building an [`AudioBuffer`] from host channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A channel's length differs from channel 0.
    LengthMismatch {
        /// Index of the offending channel.
        channel: usize,
        /// Length of channel 0.
        expected: usize,
        /// Length of the offending channel.
        found: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                channel,
                expected,
                found,
            } => write!(
                f,
                "channel {channel} has {found} samples, expected {expected}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BufferError {}

/// Planar view over host-owned channel slices of equal length.
///
/// # Example
///
/// ```rust
/// use threeverb_core::AudioBuffer;
///
/// let mut left = vec![1.0f32; 32];
/// let mut right = vec![1.0f32; 32];
/// let mut channels = [left.as_mut_slice(), right.as_mut_slice()];
///
/// let mut buffer = AudioBuffer::new(&mut channels).unwrap();
/// assert_eq!(buffer.num_channels(), 2);
/// assert_eq!(buffer.num_samples(), 32);
///
/// buffer.clear(1, 0, 32);
/// assert_eq!(buffer.channel(1).unwrap()[0], 0.0);
/// ```
pub struct AudioBuffer<'a, 'b> {
    channels: &'a mut [&'b mut [f32]],
    num_samples: usize,
}

impl<'a, 'b> AudioBuffer<'a, 'b> {
    /// Wrap host channels. All channels must have the same length.
    pub fn new(channels: &'a mut [&'b mut [f32]]) -> Result<Self, BufferError> {
        let num_samples = channels.first().map_or(0, |c| c.len());
        if let Some((channel, found)) = channels
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.len()))
            .find(|&(_, len)| len != num_samples)
        {
            return Err(BufferError::LengthMismatch {
                channel,
                expected: num_samples,
                found,
            });
        }
        Ok(Self {
            channels,
            num_samples,
        })
    }

    /// Number of channels in the buffer.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Read access to one channel.
    #[inline]
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(|c| &**c)
    }

    /// Write access to one channel.
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index).map(|c| &mut **c)
    }

    /// Simultaneous write access to two distinct channels.
    ///
    /// Returns `None` if `a == b` or either index is out of range.
    pub fn channel_pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut [f32], &mut [f32])> {
        if a == b || a >= self.channels.len() || b >= self.channels.len() {
            return None;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.channels.split_at_mut(hi);
        let lo_ch = &mut *head[lo];
        let hi_ch = &mut *tail[0];
        if a < b {
            Some((lo_ch, hi_ch))
        } else {
            Some((hi_ch, lo_ch))
        }
    }

    /// Every channel in order.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(|c| &mut **c)
    }

    /// The first `N` channels at once, or `None` if there are fewer.
    ///
    /// The slots stay owned by the buffer, so every returned slice has
    /// [`num_samples`](Self::num_samples) samples.
    pub fn first_channels_mut<const N: usize>(&mut self) -> Option<[&mut [f32]; N]> {
        let head: &mut [&'b mut [f32]; N] = self.channels.get_mut(..N)?.try_into().ok()?;
        Some(head.each_mut().map(|c| &mut **c))
    }

    /// Zero `len` samples of `channel` starting at `start`.
    ///
    /// The range is truncated to the buffer; an out-of-range channel is ignored.
    pub fn clear(&mut self, channel: usize, start: usize, len: usize) {
        if let Some(ch) = self.channels.get_mut(channel) {
            let start = start.min(ch.len());
            let end = start.saturating_add(len).min(ch.len());
            ch[start..end].fill(0.0);
        }
    }

    /// Zero every channel.
    pub fn clear_all(&mut self) {
        for ch in self.channels.iter_mut() {
            ch.fill(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_ragged_channels() {
        let mut a = [0.0f32; 8];
        let mut b = [0.0f32; 7];
        let mut channels = [&mut a[..], &mut b[..]];
        let err = AudioBuffer::new(&mut channels).err();
        assert_eq!(
            err,
            Some(BufferError::LengthMismatch {
                channel: 1,
                expected: 8,
                found: 7
            })
        );
    }

    #[test]
    fn empty_buffer_has_no_samples() {
        let mut channels: [&mut [f32]; 0] = [];
        let buffer = AudioBuffer::new(&mut channels).unwrap();
        assert_eq!(buffer.num_channels(), 0);
        assert_eq!(buffer.num_samples(), 0);
    }

    #[test]
    fn clear_truncates_range() {
        let mut a = [1.0f32; 8];
        {
            let mut channels = [&mut a[..]];
            let mut buffer = AudioBuffer::new(&mut channels).unwrap();
            buffer.clear(0, 6, 100);
            buffer.clear(3, 0, 8);
        }
        assert_eq!(a, [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn channel_pair_preserves_order() {
        let mut a = [1.0f32; 4];
        let mut b = [2.0f32; 4];
        let mut c = [3.0f32; 4];
        let mut channels = [&mut a[..], &mut b[..], &mut c[..]];
        let mut buffer = AudioBuffer::new(&mut channels).unwrap();

        let (x, y) = buffer.channel_pair_mut(2, 0).unwrap();
        assert_eq!(x[0], 3.0);
        assert_eq!(y[0], 1.0);

        let (x, y) = buffer.channel_pair_mut(0, 1).unwrap();
        assert_eq!(x[0], 1.0);
        assert_eq!(y[0], 2.0);

        assert!(buffer.channel_pair_mut(1, 1).is_none());
        assert!(buffer.channel_pair_mut(0, 3).is_none());
    }

    #[test]
    fn first_channels_are_equal_length_views() {
        let mut a = [1.0f32; 4];
        let mut b = [2.0f32; 4];
        let mut c = [3.0f32; 4];
        {
            let mut channels = [&mut a[..], &mut b[..], &mut c[..]];
            let mut buffer = AudioBuffer::new(&mut channels).unwrap();

            let [x, y] = buffer.first_channels_mut::<2>().unwrap();
            assert_eq!((x.len(), y.len()), (4, 4));
            x[0] = -1.0;
            y[3] = -2.0;

            assert!(buffer.first_channels_mut::<3>().is_some());
            assert!(buffer.first_channels_mut::<4>().is_none());
            assert_eq!(buffer.num_samples(), 4);
        }
        assert_eq!(a[0], -1.0);
        assert_eq!(b[3], -2.0);
        assert_eq!(c, [3.0; 4]);
    }

    #[test]
    fn channels_mut_visits_every_channel() {
        let mut a = [1.0f32; 3];
        let mut b = [1.0f32; 3];
        {
            let mut channels = [&mut a[..], &mut b[..]];
            let mut buffer = AudioBuffer::new(&mut channels).unwrap();
            for (gain, ch) in [0.5, 0.25].into_iter().zip(buffer.channels_mut()) {
                ch.iter_mut().for_each(|s| *s *= gain);
            }
        }
        assert_eq!(a, [0.5; 3]);
        assert_eq!(b, [0.25; 3]);
    }

    #[test]
    fn mutation_reaches_host_memory() {
        let mut a = [0.0f32; 4];
        {
            let mut channels = [&mut a[..]];
            let mut buffer = AudioBuffer::new(&mut channels).unwrap();
            buffer.channel_mut(0).unwrap()[2] = 0.5;
        }
        assert_eq!(a[2], 0.5);
    }

    #[test]
    fn error_display_names_channel() {
        let err = BufferError::LengthMismatch {
            channel: 2,
            expected: 64,
            found: 32,
        };
        assert_eq!(err.to_string(), "channel 2 has 32 samples, expected 64");
    }
}
