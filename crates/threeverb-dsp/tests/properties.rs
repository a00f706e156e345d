//! Property-based tests for the ThreeVerb engine.

use proptest::prelude::*;
use threeverb_core::{AudioBuffer, ReverbEngine, ReverbParameters};
use threeverb_dsp::ThreeVerb;

fn params_strategy() -> impl Strategy<Value = ReverbParameters> {
    (
        0.0f32..=1.0,
        0.0f32..=1.0,
        0.0f32..=1.0,
        0.0f32..=1.0,
        0.0f32..=1.0,
        any::<bool>(),
    )
        .prop_map(
            |(room_size, damping, width, dry_level, wet_level, freeze_mode)| ReverbParameters {
                room_size,
                damping,
                width,
                dry_level,
                wet_level,
                freeze_mode,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Output stays finite for every buffer size 1..=4096, parameter set and
    /// channel count the processor can hand over.
    #[test]
    fn output_finite_for_any_block(
        block_size in 1usize..=4096,
        channels in 1usize..=4,
        params in params_strategy(),
        seed in any::<u32>(),
    ) {
        let mut reverb = ThreeVerb::new(48000.0);
        reverb.set_parameters(&params);

        let mut state = seed;
        let mut data: Vec<Vec<f32>> = (0..channels)
            .map(|_| {
                (0..block_size)
                    .map(|_| {
                        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                        (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
                    })
                    .collect()
            })
            .collect();

        for _ in 0..4 {
            let mut views: Vec<&mut [f32]> = data.iter_mut().map(Vec::as_mut_slice).collect();
            let mut buffer = AudioBuffer::new(&mut views).unwrap();
            reverb.process(&mut buffer);
        }

        for (ch, samples) in data.iter().enumerate() {
            prop_assert!(
                samples.iter().all(|s| s.is_finite()),
                "channel {} produced non-finite output with {:?}", ch, params
            );
        }
    }

    /// The engine reports back exactly the (in-range) values it was given.
    #[test]
    fn parameters_echo(params in params_strategy()) {
        let mut reverb = ThreeVerb::default();
        reverb.set_parameters(&params);
        prop_assert_eq!(reverb.parameters(), params);
    }
}
