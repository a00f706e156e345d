//! ThreeVerb Core - DSP primitives and the reverb engine interface
//!
//! This crate provides the building blocks shared by the ThreeVerb processor
//! and its engines, designed for real-time audio processing with zero
//! allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Engine Interface
//!
//! - [`ReverbEngine`] - Object-safe capability trait every reverb engine implements
//! - [`ReverbParameters`] - The six-value parameter set pushed to an engine once per block
//! - [`AudioBuffer`] - Borrowed, planar view over host-owned channel slices
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`] - Metadata for host automation (range, default, stable ID)
//! - [`ParameterInfo`] - Index-based parameter introspection
//! - [`LinearSmoothedParam`] - Constant-rate ramps for zipper-free gain changes
//!
//! ## Reverb Building Blocks
//!
//! - [`DelayLine`] - Fixed-length circular buffer
//! - [`CombFilter`] - Feedback comb with one-pole damping
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! threeverb-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use threeverb_core::{AudioBuffer, ReverbEngine, ReverbParameters};
//!
//! struct Silence;
//!
//! impl ReverbEngine for Silence {
//!     fn reset(&mut self) {}
//!     fn set_sample_rate(&mut self, _sample_rate: f64) {}
//!     fn set_parameters(&mut self, _parameters: &ReverbParameters) {}
//!     fn parameters(&self) -> ReverbParameters {
//!         ReverbParameters::default()
//!     }
//!     fn process(&mut self, buffer: &mut AudioBuffer<'_, '_>) {
//!         buffer.clear_all();
//!     }
//! }
//!
//! let mut left = [0.5f32; 64];
//! let mut right = [0.5f32; 64];
//! let mut channels = [&mut left[..], &mut right[..]];
//! let mut buffer = AudioBuffer::new(&mut channels).unwrap();
//! Silence.process(&mut buffer);
//! assert!(left.iter().all(|&s| s == 0.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod buffer;
pub mod comb;
pub mod delay;
pub mod engine;
pub mod math;
pub mod param;
pub mod param_info;

// Re-export main types at crate root
pub use allpass::AllpassFilter;
pub use buffer::{AudioBuffer, BufferError};
pub use comb::CombFilter;
pub use delay::DelayLine;
pub use engine::{ReverbEngine, ReverbParameters};
pub use math::{flush_denormal, is_finite_block};
pub use param::LinearSmoothedParam;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
