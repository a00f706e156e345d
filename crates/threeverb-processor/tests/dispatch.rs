//! Block dispatch against a recording engine: what the engine sees, and in
//! which order.

use threeverb_core::{AudioBuffer, ParamId, ReverbEngine, ReverbParameters};
use threeverb_processor::{
    BusVariant, BusesLayout, ChannelSet, LifecycleState, ProcessorError, ReverbProcessor,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Reset,
    SampleRate(f64),
    Parameters(ReverbParameters),
    Process { seen: Vec<Vec<f32>> },
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<Call>,
    params: ReverbParameters,
}

impl Recorder {
    fn last_process(&self) -> &[Vec<f32>] {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                Call::Process { seen } => Some(seen.as_slice()),
                _ => None,
            })
            .expect("engine never processed")
    }

    fn last_parameters(&self) -> ReverbParameters {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                Call::Parameters(p) => Some(*p),
                _ => None,
            })
            .expect("engine never received parameters")
    }
}

impl ReverbEngine for Recorder {
    fn reset(&mut self) {
        self.calls.push(Call::Reset);
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.calls.push(Call::SampleRate(sample_rate));
    }

    fn set_parameters(&mut self, parameters: &ReverbParameters) {
        self.params = *parameters;
        self.calls.push(Call::Parameters(*parameters));
    }

    fn parameters(&self) -> ReverbParameters {
        self.params
    }

    fn process(&mut self, buffer: &mut AudioBuffer<'_, '_>) {
        let seen = (0..buffer.num_channels())
            .map(|c| buffer.channel(c).unwrap_or_default().to_vec())
            .collect();
        self.calls.push(Call::Process { seen });
    }
}

fn processor(variant: BusVariant) -> ReverbProcessor<Recorder> {
    ReverbProcessor::with_engine(Recorder::default(), variant)
}

fn run_block(p: &mut ReverbProcessor<Recorder>, data: &mut [Vec<f32>]) -> Result<(), ProcessorError> {
    let mut views: Vec<&mut [f32]> = data.iter_mut().map(Vec::as_mut_slice).collect();
    let mut buffer = AudioBuffer::new(&mut views).unwrap();
    p.process_block(&mut buffer).map(|_| ())
}

#[test]
fn prepare_resets_then_sets_rate_then_pushes_parameters() {
    let mut p = processor(BusVariant::MonoStereo);
    p.prepare_to_play(96000.0, 128).unwrap();
    assert_eq!(
        p.engine().calls,
        vec![
            Call::Reset,
            Call::SampleRate(96000.0),
            Call::Parameters(ReverbParameters::default()),
        ]
    );
    assert_eq!(p.lifecycle_state(), LifecycleState::Prepared);
    assert_eq!(p.sample_rate(), 96000.0);
    assert_eq!(p.max_block_size(), 128);
}

#[test]
fn parameters_are_pushed_before_process() {
    let mut p = processor(BusVariant::MonoStereo);
    p.prepare_to_play(48000.0, 16).unwrap();
    p.engine_mut().calls.clear();

    let mut data = vec![vec![0.1f32; 16]; 2];
    run_block(&mut p, &mut data).unwrap();

    let calls = &p.engine().calls;
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], Call::Parameters(_)));
    assert!(matches!(calls[1], Call::Process { .. }));
    assert_eq!(p.lifecycle_state(), LifecycleState::Processing);
}

#[test]
fn every_parameter_reaches_the_engine() {
    let mut p = processor(BusVariant::MonoStereo);
    p.prepare_to_play(48000.0, 8).unwrap();
    let shared = p.shared().clone();

    let values = [0.11f32, 0.22, 0.33, 0.44, 0.55];
    for (i, &v) in values.iter().enumerate() {
        shared.set_value(i, v);
    }
    let mut data = vec![vec![0.0f32; 8]; 2];
    run_block(&mut p, &mut data).unwrap();

    let seen = p.engine().last_parameters();
    assert_eq!(seen.room_size, 0.11);
    assert_eq!(seen.damping, 0.22);
    assert_eq!(seen.width, 0.33);
    assert_eq!(seen.wet_level, 0.44);
    assert_eq!(seen.dry_level, 0.55);
    assert!(!seen.freeze_mode);
}

#[test]
fn freeze_is_forwarded_on_next_block() {
    let mut p = processor(BusVariant::MonoStereo);
    p.prepare_to_play(48000.0, 8).unwrap();
    let freeze = p.shared().index_by_id(ParamId(1505)).unwrap();

    let mut data = vec![vec![0.0f32; 8]; 2];
    run_block(&mut p, &mut data).unwrap();
    assert!(!p.engine().last_parameters().freeze_mode);

    p.shared().set_value(freeze, 1.0);
    run_block(&mut p, &mut data).unwrap();
    assert!(p.engine().last_parameters().freeze_mode);
    assert!(p.engine().parameters().freeze_mode);
}

#[test]
fn extra_channels_are_zeroed_before_the_engine_sees_them() {
    let mut p = processor(BusVariant::MonoStereo);
    p.set_buses_layout(BusesLayout::symmetric(ChannelSet::Mono))
        .unwrap();
    p.prepare_to_play(44100.0, 4).unwrap();

    let mut data = vec![vec![0.5f32; 4], vec![0.75f32; 4], vec![1.0f32; 4]];
    run_block(&mut p, &mut data).unwrap();

    let seen = p.engine().last_process();
    assert_eq!(seen[0], vec![0.5; 4]);
    assert_eq!(seen[1], vec![0.0; 4]);
    assert_eq!(seen[2], vec![0.0; 4]);
}

#[test]
fn stereo_channels_pass_untouched_to_engine() {
    let mut p = processor(BusVariant::MonoStereo);
    p.prepare_to_play(44100.0, 4).unwrap();

    let mut data = vec![vec![0.5f32; 4], vec![0.75f32; 4], vec![1.0f32; 4]];
    run_block(&mut p, &mut data).unwrap();

    let seen = p.engine().last_process();
    assert_eq!(seen[0], vec![0.5; 4]);
    assert_eq!(seen[1], vec![0.75; 4]);
    assert_eq!(seen[2], vec![0.0; 4]);
}

#[test]
fn ambisonic_keeps_four_channels() {
    let mut p = processor(BusVariant::Ambisonic);
    p.prepare_to_play(48000.0, 4).unwrap();

    let mut data: Vec<Vec<f32>> = (1..=5).map(|c| vec![c as f32; 4]).collect();
    run_block(&mut p, &mut data).unwrap();

    let seen = p.engine().last_process();
    for c in 0..4 {
        assert_eq!(seen[c], vec![(c + 1) as f32; 4]);
    }
    assert_eq!(seen[4], vec![0.0; 4]);
}

#[test]
fn process_outside_prepared_is_refused() {
    let mut p = processor(BusVariant::MonoStereo);
    let mut data = vec![vec![0.3f32; 8]; 2];

    assert_eq!(run_block(&mut p, &mut data), Err(ProcessorError::NotPrepared));

    p.prepare_to_play(48000.0, 8).unwrap();
    run_block(&mut p, &mut data).unwrap();
    p.release_resources();
    assert_eq!(p.lifecycle_state(), LifecycleState::Released);

    p.engine_mut().calls.clear();
    let mut fresh = vec![vec![0.3f32; 8]; 2];
    assert_eq!(run_block(&mut p, &mut fresh), Err(ProcessorError::NotPrepared));
    assert!(p.engine().calls.is_empty());
    assert_eq!(fresh, vec![vec![0.3f32; 8]; 2]);

    p.prepare_to_play(48000.0, 8).unwrap();
    assert_eq!(run_block(&mut p, &mut fresh), Ok(()));
}

#[test]
fn empty_buffer_is_dispatched() {
    let mut p = processor(BusVariant::MonoStereo);
    p.prepare_to_play(48000.0, 0).unwrap();

    let mut data: Vec<Vec<f32>> = vec![Vec::new(), Vec::new()];
    run_block(&mut p, &mut data).unwrap();
    assert_eq!(p.engine().last_process(), &[Vec::<f32>::new(), Vec::new()]);
}
