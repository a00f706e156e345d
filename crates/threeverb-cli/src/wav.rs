//! WAV file I/O with planar channel buffers.
//!
//! Integer PCM is scaled to \[-1.0, 1.0\); 32-bit files are written as float.

use anyhow::Context;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Decoded audio, one `Vec` per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarAudio {
    /// Per-channel samples, all the same length.
    pub channels: Vec<Vec<f32>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl PlanarAudio {
    /// Number of sample frames.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.num_frames() as f64 / f64::from(self.sample_rate)
    }
}

/// Read a WAV file into planar buffers.
pub fn read_wav(path: impl AsRef<Path>) -> anyhow::Result<PlanarAudio> {
    let path = path.as_ref();
    let reader =
        WavReader::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let spec = reader.spec();
    let num_channels = usize::from(spec.channels);

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(PlanarAudio {
        channels: deinterleave(&interleaved, num_channels),
        sample_rate: spec.sample_rate,
    })
}

/// Write planar buffers to a WAV file at 16, 24 or 32 (float) bits.
pub fn write_wav(
    path: impl AsRef<Path>,
    audio: &PlanarAudio,
    bit_depth: u16,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: u16::try_from(audio.channels.len())?,
        sample_rate: audio.sample_rate,
        bits_per_sample: bit_depth,
        sample_format: if bit_depth == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };
    let mut writer =
        WavWriter::create(path, spec).with_context(|| format!("cannot create {}", path.display()))?;

    let interleaved = interleave(&audio.channels);
    if bit_depth == 32 {
        for &sample in &interleaved {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i64 << (bit_depth - 1)) as f32;
        for &sample in &interleaved {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Split interleaved frames into one buffer per channel.
///
/// A trailing partial frame is dropped.
pub fn deinterleave(samples: &[f32], num_channels: usize) -> Vec<Vec<f32>> {
    if num_channels == 0 {
        return Vec::new();
    }
    let frames = samples.len() / num_channels;
    let mut channels = vec![Vec::with_capacity(frames); num_channels];
    for frame in samples.chunks_exact(num_channels) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }
    channels
}

/// Merge per-channel buffers into interleaved frames.
pub fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let frames = channels.first().map_or(0, Vec::len);
    let mut out = Vec::with_capacity(frames * channels.len());
    for i in 0..frames {
        out.extend(channels.iter().map(|c| c[i]));
    }
    out
}
