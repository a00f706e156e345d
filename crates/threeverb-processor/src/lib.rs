//! ThreeVerb Processor - the host-facing reverb processor shell
//!
//! Everything a plugin host talks to, in front of a pluggable
//! [`ReverbEngine`](threeverb_core::ReverbEngine):
//!
//! - [`ReverbShared`] - lock-free parameter bridge (six automatable values)
//! - [`ReverbProcessor`] - lifecycle, per-block dispatch, programs, state
//! - [`BusVariant`] / [`BusesLayout`] - channel layout negotiation
//! - [`LifecycleState`] - explicit host lifecycle state machine
//! - [`ScopedNoDenormals`] - flush-to-zero for the duration of a block
//!
//! # Example
//!
//! ```rust
//! use threeverb_core::AudioBuffer;
//! use threeverb_processor::{BusVariant, ReverbProcessor};
//!
//! let mut processor = ReverbProcessor::new(BusVariant::MonoStereo);
//! let control = processor.shared().clone();
//! processor.prepare_to_play(48000.0, 256).unwrap();
//!
//! // Control thread
//! let size = control.index_by_string_id("size").unwrap();
//! control.set_value(size, 0.9);
//!
//! // Audio thread
//! let mut left = vec![0.0f32; 256];
//! let mut right = vec![0.0f32; 256];
//! let mut channels = [left.as_mut_slice(), right.as_mut_slice()];
//! let mut buffer = AudioBuffer::new(&mut channels).unwrap();
//! processor.process_block(&mut buffer).unwrap();
//!
//! // Session save
//! let blob = processor.get_state_information().unwrap();
//! processor.set_state_information(&blob).unwrap();
//! ```

pub mod bus;
#[allow(unsafe_code)]
pub mod denormal;
pub mod error;
pub mod lifecycle;
pub mod processor;
pub mod shared;
pub mod state;

pub use bus::{BusVariant, BusesLayout, ChannelSet};
pub use denormal::ScopedNoDenormals;
pub use error::ProcessorError;
pub use lifecycle::{LifecycleEvent, LifecycleState};
pub use processor::{MAX_SAMPLE_RATE, PROCESSOR_NAME, ProcessStatus, ReverbProcessor};
pub use shared::{HostNotify, ReverbShared};
