//! Error types for the processor shell.

use crate::lifecycle::{LifecycleEvent, LifecycleState};
use thiserror::Error;

/// Errors reported by [`ReverbProcessor`](crate::ReverbProcessor).
///
/// `Copy` and allocation-free so the audio path can return it.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProcessorError {
    /// A block arrived before `prepare_to_play` or after `release_resources`.
    #[error("processor is not prepared; call prepare_to_play first")]
    NotPrepared,

    /// Sample rate was not finite or outside (0, [`MAX_SAMPLE_RATE`]].
    ///
    /// [`MAX_SAMPLE_RATE`]: crate::MAX_SAMPLE_RATE
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    /// The requested bus layout is not one this variant supports.
    #[error("unsupported bus layout")]
    UnsupportedLayout,

    /// The event is not allowed in the current lifecycle state.
    #[error("cannot {event} while {from}")]
    InvalidTransition {
        /// State the processor was in.
        from: LifecycleState,
        /// Rejected event.
        event: LifecycleEvent,
    },

    /// A state blob could not be restored.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The parameter state could not be encoded.
    #[error("failed to serialize state")]
    SerializeState,
}
