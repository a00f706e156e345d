//! Host lifecycle as an explicit state machine.
//!
//! | state / event | Prepare  | Process     | Release       |
//! |---------------|----------|-------------|---------------|
//! | Uninitialized | Prepared | NotPrepared | Uninitialized |
//! | Prepared      | Prepared | Processing  | Released      |
//! | Processing    | Prepared | Processing  | Released      |
//! | Released      | Prepared | NotPrepared | Released      |
//!
//! `Process` outside `Prepared`/`Processing` is refused with
//! [`ProcessorError::NotPrepared`]; `Reconfigure` (a bus layout change) is
//! refused while processing.

use core::fmt;

use crate::error::ProcessorError;

/// Where a processor instance is in its host lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    /// Constructed, never prepared.
    #[default]
    Uninitialized,
    /// Sample rate known, engine reset, no block processed yet.
    Prepared,
    /// At least one block processed since the last prepare.
    Processing,
    /// Resources released; a new prepare is required.
    Released,
}

/// Host-driven events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// `prepare_to_play`.
    Prepare,
    /// `process_block`.
    Process,
    /// `release_resources`.
    Release,
    /// Bus layout change.
    Reconfigure,
}

impl LifecycleState {
    /// Apply an event, returning the next state.
    pub fn on(self, event: LifecycleEvent) -> Result<Self, ProcessorError> {
        use LifecycleEvent as E;
        use LifecycleState as S;

        match (self, event) {
            (_, E::Prepare) => Ok(S::Prepared),
            (S::Prepared | S::Processing, E::Process) => Ok(S::Processing),
            (S::Uninitialized | S::Released, E::Process) => Err(ProcessorError::NotPrepared),
            (S::Prepared | S::Processing, E::Release) => Ok(S::Released),
            (S::Uninitialized | S::Released, E::Release) => Ok(self),
            (S::Processing, E::Reconfigure) => Err(ProcessorError::InvalidTransition {
                from: self,
                event,
            }),
            (_, E::Reconfigure) => Ok(self),
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Prepared => "prepared",
            Self::Processing => "processing",
            Self::Released => "released",
        })
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prepare => "prepare",
            Self::Process => "process",
            Self::Release => "release",
            Self::Reconfigure => "change bus layout",
        })
    }
}
