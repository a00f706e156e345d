//! Reverb engine capability and its parameter set.
//!
//! The processor never depends on a concrete reverb. It pushes a
//! [`ReverbParameters`] snapshot into whatever implements [`ReverbEngine`]
//! once per block, then hands over the buffer.
//!
//! ## Design Decisions
//!
//! - **Object-safe**: the processor is generic over the engine, but
//!   `Box<dyn ReverbEngine>` works too for runtime selection.
//! - **Buffer view only**: an engine sees host memory through
//!   [`AudioBuffer`]; raw channel pointers never cross this boundary.
//! - **No allocations**: `set_parameters` and `process` run on the audio
//!   thread. Only `set_sample_rate` may reallocate.

use crate::buffer::AudioBuffer;
use crate::param_info::{ParamDescriptor, ParamId, ParameterInfo};

/// Index of room size in [`ReverbParameters`]' parameter order.
pub const PARAM_SIZE: usize = 0;
/// Index of damping.
pub const PARAM_DAMPING: usize = 1;
/// Index of stereo width.
pub const PARAM_WIDTH: usize = 2;
/// Index of wet level.
pub const PARAM_WET: usize = 3;
/// Index of dry level.
pub const PARAM_DRY: usize = 4;
/// Index of the freeze switch.
pub const PARAM_FREEZE: usize = 5;
/// Number of reverb parameters.
pub const PARAM_COUNT: usize = 6;

/// The six values an engine needs for one block.
///
/// Continuous values live in \[0.0, 1.0\].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParameters {
    /// Room size; longer tails as it grows.
    pub room_size: f32,
    /// High-frequency absorption (0 = bright, 1 = dark).
    pub damping: f32,
    /// Stereo width of the wet signal (0 = mono, 1 = full).
    pub width: f32,
    /// Level of the unprocessed signal.
    pub dry_level: f32,
    /// Level of the reverberant signal.
    pub wet_level: f32,
    /// Sustain the current tail indefinitely and stop absorbing input.
    pub freeze_mode: bool,
}

impl Default for ReverbParameters {
    fn default() -> Self {
        Self {
            room_size: 0.5,
            damping: 0.5,
            width: 1.0,
            dry_level: 1.0,
            wet_level: 0.5,
            freeze_mode: false,
        }
    }
}

impl ReverbParameters {
    /// Copy with every continuous value clamped to \[0.0, 1.0\].
    ///
    /// NaN becomes the parameter default.
    pub fn sanitized(&self) -> Self {
        let mut out = *self;
        for index in 0..PARAM_FREEZE {
            out.set_param(index, self.get_param(index));
        }
        out
    }
}

impl ParameterInfo for ReverbParameters {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            PARAM_SIZE => Some(
                ParamDescriptor::unit_interval("Size", "Size", 0.5).with_id(ParamId(1500), "size"),
            ),
            PARAM_DAMPING => Some(
                ParamDescriptor::unit_interval("Damping", "Damp", 0.5)
                    .with_id(ParamId(1501), "damp"),
            ),
            PARAM_WIDTH => Some(
                ParamDescriptor::unit_interval("Width", "Width", 1.0)
                    .with_id(ParamId(1502), "width"),
            ),
            PARAM_WET => Some(
                ParamDescriptor::unit_interval("Wet", "Wet", 0.5).with_id(ParamId(1503), "wet"),
            ),
            PARAM_DRY => Some(
                ParamDescriptor::unit_interval("Dry", "Dry", 1.0).with_id(ParamId(1504), "dry"),
            ),
            PARAM_FREEZE => Some(
                ParamDescriptor::toggle("Freeze", "Freeze", false)
                    .with_id(ParamId(1505), "freeze"),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            PARAM_SIZE => self.room_size,
            PARAM_DAMPING => self.damping,
            PARAM_WIDTH => self.width,
            PARAM_WET => self.wet_level,
            PARAM_DRY => self.dry_level,
            PARAM_FREEZE => {
                if self.freeze_mode {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = self.param_info(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            PARAM_SIZE => self.room_size = value,
            PARAM_DAMPING => self.damping = value,
            PARAM_WIDTH => self.width = value,
            PARAM_WET => self.wet_level = value,
            PARAM_DRY => self.dry_level = value,
            PARAM_FREEZE => self.freeze_mode = value >= 0.5,
            _ => {}
        }
    }
}

/// Capability every reverb engine provides to the processor.
///
/// # Example
///
/// ```rust
/// use threeverb_core::{AudioBuffer, ReverbEngine, ReverbParameters};
///
/// /// Applies only the dry level; useful as a stand-in engine.
/// struct DryOnly {
///     params: ReverbParameters,
/// }
///
/// impl ReverbEngine for DryOnly {
///     fn reset(&mut self) {}
///     fn set_sample_rate(&mut self, _sample_rate: f64) {}
///     fn set_parameters(&mut self, parameters: &ReverbParameters) {
///         self.params = *parameters;
///     }
///     fn parameters(&self) -> ReverbParameters {
///         self.params
///     }
///     fn process(&mut self, buffer: &mut AudioBuffer<'_, '_>) {
///         let gain = self.params.dry_level;
///         for ch in buffer.channels_mut() {
///             ch.iter_mut().for_each(|s| *s *= gain);
///         }
///     }
/// }
/// ```
pub trait ReverbEngine: Send {
    /// Clear all internal state (delay memory, filter history).
    fn reset(&mut self);

    /// Update the sample rate and rescale anything that depends on it.
    ///
    /// Called from setup paths; may allocate.
    fn set_sample_rate(&mut self, sample_rate: f64);

    /// Apply a parameter snapshot. Called once per block on the audio thread.
    fn set_parameters(&mut self, parameters: &ReverbParameters);

    /// The snapshot most recently applied.
    fn parameters(&self) -> ReverbParameters;

    /// Process the buffer in place.
    fn process(&mut self, buffer: &mut AudioBuffer<'_, '_>);
}

impl<E: ReverbEngine + ?Sized> ReverbEngine for alloc_box::Box<E> {
    fn reset(&mut self) {
        (**self).reset();
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        (**self).set_sample_rate(sample_rate);
    }

    fn set_parameters(&mut self, parameters: &ReverbParameters) {
        (**self).set_parameters(parameters);
    }

    fn parameters(&self) -> ReverbParameters {
        (**self).parameters()
    }

    fn process(&mut self, buffer: &mut AudioBuffer<'_, '_>) {
        (**self).process(buffer);
    }
}

#[cfg(not(feature = "std"))]
mod alloc_box {
    pub use alloc::boxed::Box;
}

#[cfg(feature = "std")]
mod alloc_box {
    pub use std::boxed::Box;
}
