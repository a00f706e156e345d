//! ThreeVerb DSP - the default reverb engine
//!
//! [`ThreeVerb`] is a Freeverb-topology stereo reverb built from the
//! `threeverb-core` comb and allpass primitives. It implements
//! [`ReverbEngine`](threeverb_core::ReverbEngine), so the processor can drive
//! it without knowing anything about its filter design.
//!
//! ## Example
//!
//! ```rust
//! use threeverb_core::{ReverbEngine, ReverbParameters};
//! use threeverb_dsp::ThreeVerb;
//!
//! let mut reverb = ThreeVerb::new(48000.0);
//! reverb.set_parameters(&ReverbParameters {
//!     room_size: 0.9,
//!     wet_level: 0.4,
//!     ..ReverbParameters::default()
//! });
//! reverb.reset();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod reverb;
mod tank;

pub use reverb::ThreeVerb;
