//! The host-facing processor: lifecycle, block dispatch, buses, programs
//! and state, all in front of a pluggable [`ReverbEngine`].

use threeverb_core::{AudioBuffer, ReverbEngine};
use threeverb_dsp::ThreeVerb;

use crate::bus::{BusVariant, BusesLayout};
use crate::denormal::ScopedNoDenormals;
use crate::error::ProcessorError;
use crate::lifecycle::{LifecycleEvent, LifecycleState};
use crate::shared::ReverbShared;
use crate::state;

/// Display name reported to hosts.
pub const PROCESSOR_NAME: &str = "ThreeVerb";

/// Highest sample rate `prepare_to_play` accepts. Delay lines scale with it.
pub const MAX_SAMPLE_RATE: f64 = 768_000.0;

/// What the host may do after a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Keep calling even on silent input (frozen tail).
    Continue,
    /// The host may stop calling once input and output are silent.
    ContinueIfNotQuiet,
}

/// Reverb processor shell.
///
/// Owns the engine and the shared parameter state. The control side holds
/// a [`ReverbShared`] clone; the audio thread calls
/// [`process_block`](Self::process_block).
///
/// # Example
///
/// ```rust
/// use threeverb_core::AudioBuffer;
/// use threeverb_processor::{BusVariant, ReverbProcessor};
///
/// let mut processor = ReverbProcessor::new(BusVariant::MonoStereo);
/// processor.prepare_to_play(48000.0, 512).unwrap();
///
/// let mut left = vec![0.0f32; 512];
/// let mut right = vec![0.0f32; 512];
/// let mut channels = [left.as_mut_slice(), right.as_mut_slice()];
/// let mut buffer = AudioBuffer::new(&mut channels).unwrap();
/// processor.process_block(&mut buffer).unwrap();
/// ```
#[derive(Debug)]
pub struct ReverbProcessor<E: ReverbEngine = ThreeVerb> {
    engine: E,
    shared: ReverbShared,
    variant: BusVariant,
    layout: BusesLayout,
    lifecycle: LifecycleState,
    sample_rate: f64,
    max_block_size: usize,
}

impl ReverbProcessor<ThreeVerb> {
    /// Processor with the default [`ThreeVerb`] engine.
    pub fn new(variant: BusVariant) -> Self {
        Self::with_engine(ThreeVerb::default(), variant)
    }
}

impl Default for ReverbProcessor<ThreeVerb> {
    fn default() -> Self {
        Self::new(BusVariant::default())
    }
}

impl<E: ReverbEngine> ReverbProcessor<E> {
    /// Processor around any engine, with fresh parameter state.
    pub fn with_engine(engine: E, variant: BusVariant) -> Self {
        Self::with_shared(engine, variant, ReverbShared::new(None))
    }

    /// Processor around any engine, sharing an existing parameter bridge
    /// (e.g. one created with a host-notify callback).
    pub fn with_shared(engine: E, variant: BusVariant, shared: ReverbShared) -> Self {
        Self {
            engine,
            shared,
            variant,
            layout: variant.default_layout(),
            lifecycle: LifecycleState::Uninitialized,
            sample_rate: 0.0,
            max_block_size: 0,
        }
    }

    /// Parameter bridge; clone it to hand to a control thread.
    pub fn shared(&self) -> &ReverbShared {
        &self.shared
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the wrapped engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Layout family chosen at construction.
    pub fn variant(&self) -> BusVariant {
        self.variant
    }

    /// Current lifecycle state.
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle
    }

    /// Sample rate from the last successful prepare (0 before that).
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Largest block size announced by the host.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Prepare for playback: reset the engine, set its sample rate and push
    /// the current parameters.
    pub fn prepare_to_play(
        &mut self,
        sample_rate: f64,
        max_block_size: usize,
    ) -> Result<(), ProcessorError> {
        if sample_rate.is_nan() || sample_rate <= 0.0 || sample_rate > MAX_SAMPLE_RATE {
            return Err(ProcessorError::InvalidSampleRate(sample_rate));
        }
        let next = self.lifecycle.on(LifecycleEvent::Prepare)?;

        self.engine.reset();
        self.engine.set_sample_rate(sample_rate);
        self.engine.set_parameters(&self.shared.snapshot());

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        tracing::info!(
            sample_rate,
            max_block_size,
            layout = %self.layout,
            "prepared {} ({} -> {})",
            PROCESSOR_NAME,
            self.lifecycle,
            next
        );
        self.lifecycle = next;
        Ok(())
    }

    /// Leave playback. The engine keeps its memory until the next prepare.
    pub fn release_resources(&mut self) {
        if let Ok(next) = self.lifecycle.on(LifecycleEvent::Release) {
            tracing::debug!("release ({} -> {})", self.lifecycle, next);
            self.lifecycle = next;
        }
    }

    // ── Block dispatch ──────────────────────────────────────────────────

    /// Process one host block in place.
    ///
    /// Channels at or beyond the layout's input count are zeroed before the
    /// engine runs. Real-time safe: no allocation, lock or logging.
    pub fn process_block(
        &mut self,
        buffer: &mut AudioBuffer<'_, '_>,
    ) -> Result<ProcessStatus, ProcessorError> {
        let _no_denormals = ScopedNoDenormals::new();

        let next = self.lifecycle.on(LifecycleEvent::Process)?;
        self.lifecycle = next;

        let num_samples = buffer.num_samples();
        for channel in self.layout.input_channels()..buffer.num_channels() {
            buffer.clear(channel, 0, num_samples);
        }

        let params = self.shared.snapshot();
        self.engine.set_parameters(&params);
        self.engine.process(buffer);

        Ok(if params.freeze_mode {
            ProcessStatus::Continue
        } else {
            ProcessStatus::ContinueIfNotQuiet
        })
    }

    // ── Buses ───────────────────────────────────────────────────────────

    /// Whether this processor's variant accepts `layout`.
    pub fn is_buses_layout_supported(&self, layout: &BusesLayout) -> bool {
        self.variant.supports(layout)
    }

    /// Active layout.
    pub fn buses_layout(&self) -> BusesLayout {
        self.layout
    }

    /// Switch to `layout`. Refused while processing or if unsupported.
    pub fn set_buses_layout(&mut self, layout: BusesLayout) -> Result<(), ProcessorError> {
        let next = self.lifecycle.on(LifecycleEvent::Reconfigure)?;
        if !self.is_buses_layout_supported(&layout) {
            tracing::debug!(%layout, variant = %self.variant, "rejected bus layout");
            return Err(ProcessorError::UnsupportedLayout);
        }
        tracing::info!(%layout, "bus layout changed");
        self.layout = layout;
        self.lifecycle = next;
        Ok(())
    }

    // ── Metadata ────────────────────────────────────────────────────────

    /// Display name.
    pub fn name(&self) -> &'static str {
        PROCESSOR_NAME
    }

    /// Always `false`.
    pub fn accepts_midi(&self) -> bool {
        false
    }

    /// Always `false`.
    pub fn produces_midi(&self) -> bool {
        false
    }

    /// Always `false`.
    pub fn is_midi_effect(&self) -> bool {
        false
    }

    /// Reported tail; hosts rely on [`ProcessStatus`] instead.
    pub fn tail_length_seconds(&self) -> f64 {
        0.0
    }

    /// No editor is provided.
    pub fn has_editor(&self) -> bool {
        false
    }

    // ── Programs (single fixed program) ─────────────────────────────────

    /// Always 1.
    pub fn num_programs(&self) -> usize {
        1
    }

    /// Always 0.
    pub fn current_program(&self) -> usize {
        0
    }

    /// Accepted and ignored.
    pub fn set_current_program(&mut self, _index: usize) {}

    /// Always empty.
    pub fn program_name(&self, _index: usize) -> &'static str {
        ""
    }

    /// Accepted and ignored.
    pub fn change_program_name(&mut self, _index: usize, _name: &str) {}

    // ── State ───────────────────────────────────────────────────────────

    /// Serialize parameters as JSON keyed by stable parameter ID.
    pub fn get_state_information(&self) -> Result<Vec<u8>, ProcessorError> {
        state::save(&self.shared)
    }

    /// Restore parameters saved by [`get_state_information`](Self::get_state_information).
    ///
    /// The next block picks the values up.
    pub fn set_state_information(&mut self, data: &[u8]) -> Result<(), ProcessorError> {
        state::load(&self.shared, data).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::ChannelSet;

    #[test]
    fn metadata() {
        let p = ReverbProcessor::new(BusVariant::MonoStereo);
        assert_eq!(p.name(), "ThreeVerb");
        assert!(!p.accepts_midi());
        assert!(!p.produces_midi());
        assert!(!p.is_midi_effect());
        assert!(!p.has_editor());
        assert_eq!(p.tail_length_seconds(), 0.0);
    }

    #[test]
    fn programs_are_fixed() {
        let mut p = ReverbProcessor::new(BusVariant::MonoStereo);
        assert_eq!(p.num_programs(), 1);
        assert_eq!(p.current_program(), 0);
        p.set_current_program(3);
        p.change_program_name(0, "Hall");
        assert_eq!(p.current_program(), 0);
        assert_eq!(p.program_name(0), "");
    }

    #[test]
    fn rejects_bad_sample_rates() {
        let mut p = ReverbProcessor::new(BusVariant::MonoStereo);
        for rate in [0.0, -44100.0, f64::NAN, f64::INFINITY, MAX_SAMPLE_RATE + 1.0, 1e12] {
            assert!(matches!(
                p.prepare_to_play(rate, 512),
                Err(ProcessorError::InvalidSampleRate(_))
            ));
        }
        assert_eq!(p.lifecycle_state(), LifecycleState::Uninitialized);

        p.prepare_to_play(MAX_SAMPLE_RATE, 64).unwrap();
        assert_eq!(p.sample_rate(), MAX_SAMPLE_RATE);
    }

    #[test]
    fn not_prepared_leaves_buffer_untouched() {
        let mut p = ReverbProcessor::new(BusVariant::MonoStereo);
        let mut left = [0.25f32; 64];
        let mut right = [0.5f32; 64];
        let mut channels = [&mut left[..], &mut right[..]];
        let mut buffer = AudioBuffer::new(&mut channels).unwrap();
        assert_eq!(p.process_block(&mut buffer), Err(ProcessorError::NotPrepared));
        assert!(left.iter().all(|&s| s == 0.25));
        assert!(right.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn layout_change_rules() {
        let mut p = ReverbProcessor::new(BusVariant::MonoStereo);
        assert_eq!(p.buses_layout(), BusesLayout::symmetric(ChannelSet::Stereo));

        let mono = BusesLayout::symmetric(ChannelSet::Mono);
        assert_eq!(p.set_buses_layout(mono), Ok(()));
        assert_eq!(p.buses_layout(), mono);

        let quad = BusesLayout::symmetric(ChannelSet::FIRST_ORDER_AMBISONIC);
        assert_eq!(p.set_buses_layout(quad), Err(ProcessorError::UnsupportedLayout));
        assert_eq!(p.buses_layout(), mono);

        p.prepare_to_play(48000.0, 64).unwrap();
        let mut data = [0.0f32; 64];
        let mut channels = [&mut data[..]];
        let mut buffer = AudioBuffer::new(&mut channels).unwrap();
        p.process_block(&mut buffer).unwrap();

        assert!(matches!(
            p.set_buses_layout(BusesLayout::symmetric(ChannelSet::Stereo)),
            Err(ProcessorError::InvalidTransition { .. })
        ));

        p.release_resources();
        assert_eq!(
            p.set_buses_layout(BusesLayout::symmetric(ChannelSet::Stereo)),
            Ok(())
        );
    }

    #[test]
    fn freeze_keeps_host_calling() {
        let mut p = ReverbProcessor::new(BusVariant::MonoStereo);
        p.prepare_to_play(44100.0, 32).unwrap();
        let mut l = [0.0f32; 32];
        let mut r = [0.0f32; 32];

        let mut channels = [&mut l[..], &mut r[..]];
        let mut buffer = AudioBuffer::new(&mut channels).unwrap();
        assert_eq!(
            p.process_block(&mut buffer),
            Ok(ProcessStatus::ContinueIfNotQuiet)
        );

        p.shared().set_value(threeverb_core::engine::PARAM_FREEZE, 1.0);
        assert_eq!(p.process_block(&mut buffer), Ok(ProcessStatus::Continue));
    }
}
